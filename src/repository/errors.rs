use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error envelope used by the egov services.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorEnvelope {
    #[serde(rename = "Errors")]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorEntry {
    message: Option<String>,
}

impl RepositoryError {
    /// Builds a backend error, preferring the first message of an
    /// `{"Errors": [{"message": ...}]}` body over the raw text.
    pub fn from_backend_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.errors.into_iter().find_map(|e| e.message))
            .unwrap_or_else(|| body.trim().to_string());
        RepositoryError::Backend { status, message }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::DecodeError(err.to_string())
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::DecodeError(err.to_string())
        } else if err.is_connect() || err.is_timeout() {
            RepositoryError::ConnectionError(err.to_string())
        } else {
            RepositoryError::Unexpected(format!("Unexpected http error: {err}"))
        }
    }
}
