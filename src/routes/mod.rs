//! Actix handlers of the `/api/v1` JSON API.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use crate::dto::api::ErrorResponse;
use crate::services::ServiceError;

pub mod application;
pub mod inbox;
pub mod scrutiny;

/// Maps a service failure to its status code and egov error code.
pub fn error_status(err: &ServiceError) -> (StatusCode, &'static str) {
    match err {
        ServiceError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ServiceError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
        }
        ServiceError::Backend(_) => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
        ServiceError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

/// Renders a service failure in the egov error envelope.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let (status, code) = error_status(err);
    let message = match err {
        ServiceError::Backend(message) => message.clone(),
        ServiceError::Internal(_) => "Something went wrong".to_string(),
        other => other.to_string(),
    };
    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// Rejects malformed JSON bodies with the egov error envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        "INVALID_REQUEST",
        err.to_string(),
    ));
    InternalError::from_response(err, response).into()
}
