use actix_web::{HttpResponse, Responder, post, web};

use crate::dto::api::{ApplicationDetailsRequest, ApplicationResponse, WorkflowActionRequest};
use crate::repository::Backend;
use crate::routes::error_response;
use crate::services::application as application_service;

#[post("/v1/applications/_details")]
pub async fn application_details(
    repo: web::Data<dyn Backend>,
    web::Json(body): web::Json<ApplicationDetailsRequest>,
) -> impl Responder {
    match application_service::load_application(
        repo.get_ref(),
        &body.request_info,
        &body.tenant_id,
        &body.application_no,
    )
    .await
    {
        Ok(application) => HttpResponse::Ok().json(ApplicationResponse { application }),
        Err(err) => error_response(&err),
    }
}

#[post("/v1/applications/_action")]
pub async fn application_action(
    repo: web::Data<dyn Backend>,
    web::Json(body): web::Json<WorkflowActionRequest>,
) -> impl Responder {
    match application_service::apply_workflow_action(
        repo.get_ref(),
        &body.request_info,
        &body.tenant_id,
        body.workflow,
    )
    .await
    {
        Ok(application) => HttpResponse::Ok().json(ApplicationResponse { application }),
        Err(err) => error_response(&err),
    }
}
