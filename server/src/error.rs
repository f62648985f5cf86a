//! Error types for the serving layer.
//!
//! Every user-visible failure maps to a status code and a machine-readable
//! `{"error": ...}` body. Cleanup failures never appear here; they are
//! logged and absorbed by the artifact store.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Result type alias for serving operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the serving layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The model is still loading; clients should retry.
    #[error("Model is still loading. Please try again later.")]
    NotReady,

    /// The model failed to load; terminal until the process restarts.
    #[error("Model failed to load. Please check server logs.")]
    LoadFailed,

    /// The request was rejected before synthesis was attempted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The synthesis collaborator failed.
    #[error("Error generating speech: {0}")]
    Generation(#[from] murmur_synth::Error),

    /// Persisting the generated audio failed.
    #[error("Error generating speech: {0}")]
    Encode(#[from] murmur_wav::EncodeError),

    /// A blocking task died before reporting a result.
    #[error("Error generating speech: {0}")]
    Task(String),

    /// Transport or filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::LoadFailed
            | Error::Generation(_)
            | Error::Encode(_)
            | Error::Task(_)
            | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::NotReady.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(Error::LoadFailed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            Error::InvalidRequest("text must not be empty".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_generation_error_message() {
        let err = Error::Generation(murmur_synth::Error::Generation("boom".to_string()));
        assert_eq!(err.to_string(), "Error generating speech: generation failed: boom");
    }
}
