//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page-number pagination parameters (`?page=&limit=`).
///
/// Kept as raw strings so malformed values surface as a validation error
/// from `PageRequest::parse` instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}
