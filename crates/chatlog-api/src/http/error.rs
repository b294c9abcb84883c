//! Application error type mapping to HTTP status codes.
//!
//! Failure responses carry a `{"detail": <reason>}` body: validation
//! failures map to 400, persistence failures to 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatlog_types::error::{MessageError, RepositoryError, ValidationError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Message validation failure (empty or forbidden content).
    Validation(ValidationError),
    /// Storage read/write failure.
    Persistence(RepositoryError),
}

impl From<MessageError> for AppError {
    fn from(e: MessageError) -> Self {
        match e {
            MessageError::Validation(e) => AppError::Validation(e),
            MessageError::Repository(e) => AppError::Persistence(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Persistence(e) => {
                tracing::error!(error = %e, "persistence failure");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
