//! Shared response bodies for API handlers.

use serde::Serialize;

/// `{ "message": "..." }` acknowledgement returned by mutating endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
