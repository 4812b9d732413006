//! Form definitions backing the JSON API.

use thiserror::Error;
use validator::ValidationErrors;

pub mod application;
pub mod inbox;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid mobile number")]
    InvalidMobileNumber,

    #[error("invalid application number")]
    InvalidApplicationNumber,

    #[error("invalid workflow action")]
    InvalidAction,
}

/// Trims `value`, mapping blank input to `None`.
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
