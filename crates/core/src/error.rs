/// Domain error returned by every catalog operation.
///
/// The string carried by `NotFound`, `Validation` and `Conflict` is the
/// human-readable message shown to API clients. `Internal` keeps the client
/// message separate from the underlying cause, which is only logged.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{message}: {cause}")]
    Internal { message: &'static str, cause: String },
}

impl CoreError {
    /// Build a closure that wraps any displayable failure as `Internal`
    /// with the given client-facing message.
    pub fn internal<E: std::fmt::Display>(message: &'static str) -> impl FnOnce(E) -> Self {
        move |err| CoreError::Internal {
            message,
            cause: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}
