use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Unified service error type.
///
/// The service boundary has exactly two failure kinds, and both surface as
/// HTTP 500 with the same JSON payload:
///
/// ```json
/// {"message": "Error retrieving inventory", "error": "storage error: ..."}
/// ```
///
/// `message` is the caller-supplied operation context (stable per endpoint);
/// `error` is the underlying failure rendered as a string. "Not found" is
/// never an error here — lookups on missing ids are successful `null`
/// responses, handled in the API layer.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Storage backend failure. HTTP 500.
    #[error("{message}: {detail}")]
    Storage { message: String, detail: String },

    /// Unexpected internal error. HTTP 500.
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl ServiceError {
    /// Storage failure with operation context.
    pub fn storage(message: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ServiceError::Storage {
            message: message.into(),
            detail: err.to_string(),
        }
    }

    /// Internal failure with operation context.
    pub fn internal(message: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ServiceError::Internal {
            message: message.into(),
            detail: err.to_string(),
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ServiceError::Storage { message, .. } => message,
            ServiceError::Internal { message, .. } => message,
        }
    }

    fn detail(&self) -> &str {
        match self {
            ServiceError::Storage { detail, .. } => detail,
            ServiceError::Internal { detail, .. } => detail,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "message": self.message(),
            "error": self.detail(),
        });
        (status, axum::Json(body)).into_response()
    }
}
