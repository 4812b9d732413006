use actix_web::{HttpResponse, Responder, post, web};

use crate::domain::inbox::FilterState;
use crate::dto::api::{InboxResponse, InboxSearchRequest};
use crate::pagination::PageWindow;
use crate::repository::Backend;
use crate::routes::error_response;
use crate::services::{ServiceError, inbox as inbox_service};

#[post("/v1/inbox/_search")]
pub async fn search_inbox(
    repo: web::Data<dyn Backend>,
    web::Json(body): web::Json<InboxSearchRequest>,
) -> impl Responder {
    let filters = match FilterState::try_from(body.filters) {
        Ok(filters) => filters,
        Err(err) => {
            log::warn!("Rejected inbox search form: {err}");
            return error_response(&ServiceError::from(err));
        }
    };

    match inbox_service::load_inbox(repo.get_ref(), &body.request_info, &body.tenant_id, &filters)
        .await
    {
        Ok(page) => {
            let window = PageWindow::new(
                page.total_count,
                filters.table_form.offset,
                filters.table_form.limit,
            );
            HttpResponse::Ok().json(InboxResponse { page, window })
        }
        Err(err) => error_response(&err),
    }
}
