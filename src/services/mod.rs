use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod application;
pub mod inbox;
pub mod scrutiny;

/// Errors surfaced by the service layer to the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("backend rejected the request: {0}")]
    Backend(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Backend {
                status: 401 | 403, ..
            } => ServiceError::Unauthorized,
            RepositoryError::Backend { message, .. } => ServiceError::Backend(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
