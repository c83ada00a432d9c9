use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use productos_core::error::CoreError;
use serde_json::json;

/// Message returned for failures that have no operation-specific wording.
const GENERIC_INTERNAL: &str = "Error interno del servidor";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "error": "..." }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `productos_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A malformed request (bad multipart, unreadable JSON, missing file).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error; the message is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Core(core) => match core {
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
                // Duplicate codes are reported as a plain bad request.
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
                CoreError::Internal { message, cause } => {
                    tracing::error!(error = %cause, "{message}");
                    (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
                }
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_INTERNAL.to_string())
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
