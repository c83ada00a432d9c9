//! Page-number pagination over the active catalog.
//!
//! Clients address pages as `?page=&limit=` with 1-based page numbers. The
//! store sees the equivalent `offset`/`limit` window.

use crate::error::CoreError;

/// Message returned when a requested page lies past the last one.
pub const PAGE_NOT_FOUND: &str = "Página no encontrada";

/// A validated `(page, limit)` pair. Both values are at least 1 and the
/// derived offset fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Result<Self, CoreError> {
        if page < 1 {
            return Err(CoreError::Validation(
                "page debe ser un entero mayor o igual a 1".into(),
            ));
        }
        if limit < 1 {
            return Err(CoreError::Validation(
                "limit debe ser un entero mayor o igual a 1".into(),
            ));
        }
        if (page - 1).checked_mul(limit).is_none() {
            return Err(CoreError::Validation("page y limit son demasiado grandes".into()));
        }
        Ok(Self { page, limit })
    }

    /// Parse raw query-string values. Missing or non-numeric input is a
    /// validation error.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, CoreError> {
        let page = parse_param("page", page)?;
        let limit = parse_param("limit", limit)?;
        Self::new(page, limit)
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of active rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Reject pages beyond the last one and return the total page count.
    ///
    /// An empty catalog has zero pages, so even page 1 is rejected.
    pub fn check_against(&self, total_items: i64) -> Result<i64, CoreError> {
        let pages = total_pages(total_items, self.limit);
        if self.page > pages {
            return Err(CoreError::NotFound(PAGE_NOT_FOUND.into()));
        }
        Ok(pages)
    }
}

/// `ceil(total_items / limit)`, with zero items giving zero pages.
pub fn total_pages(total_items: i64, limit: i64) -> i64 {
    if total_items <= 0 || limit <= 0 {
        return 0;
    }
    total_items / limit + i64::from(total_items % limit != 0)
}

fn parse_param(name: &str, raw: Option<&str>) -> Result<i64, CoreError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::Validation(format!("{name} es obligatorio")))?;
    raw.parse::<i64>()
        .map_err(|_| CoreError::Validation(format!("{name} debe ser un número entero")))
}
