use actix_web::{HttpResponse, Responder, post, web};

use crate::dto::api::ScrutinyReportRequest;
use crate::repository::Backend;
use crate::routes::error_response;
use crate::services::scrutiny as scrutiny_service;

#[post("/v1/scrutiny/_report")]
pub async fn scrutiny_report(
    repo: web::Data<dyn Backend>,
    web::Json(body): web::Json<ScrutinyReportRequest>,
) -> impl Responder {
    match scrutiny_service::load_scrutiny_report(
        repo.get_ref(),
        &body.request_info,
        &body.tenant_id,
        &body.edcr_number,
    )
    .await
    {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(err) => error_response(&err),
    }
}
