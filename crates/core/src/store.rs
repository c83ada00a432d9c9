//! Persistence port for products.
//!
//! The catalog only talks to storage through [`ProductStore`]. The
//! PostgreSQL adapter lives in `productos-db`; [`crate::memory`] provides an
//! in-process implementation.

use async_trait::async_trait;

use crate::product::{NewProduct, Product, ProductChanges};
use crate::types::Timestamp;

/// Errors a store may report.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The unique constraint on `codigo` rejected an insert.
    #[error("Duplicate product code '{0}'")]
    Duplicate(String),

    /// Anything else the backend failed at.
    #[error("Store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Record-oriented product storage.
///
/// "Active" means `deleted = false`. Lookups by `codigo` that are not
/// qualified as active also see soft-deleted rows.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Find a product by code, including soft-deleted rows.
    async fn find_by_codigo(&self, codigo: &str) -> Result<Option<Product>, StoreError>;

    /// Find an active product by code.
    async fn find_active_by_codigo(&self, codigo: &str) -> Result<Option<Product>, StoreError>;

    /// Insert a new active product. Returns [`StoreError::Duplicate`] when the
    /// code is already taken.
    async fn insert(&self, record: &NewProduct) -> Result<Product, StoreError>;

    /// Apply `changes` to the active product with this code.
    ///
    /// Returns `None` if no active row matched.
    async fn update(
        &self,
        codigo: &str,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, StoreError>;

    /// Flag the active product with this code as deleted. Returns `true` if a
    /// row was marked.
    async fn soft_delete(
        &self,
        codigo: &str,
        deleted_by: &str,
        deleted_at: Timestamp,
    ) -> Result<bool, StoreError>;

    /// All active products whose `tipo_producto.categoria` equals `categoria`.
    async fn list_by_category(&self, categoria: &str) -> Result<Vec<Product>, StoreError>;

    /// One window of active products ordered by id, plus the total number of
    /// active products.
    async fn list_page(&self, offset: i64, limit: i64)
        -> Result<(Vec<Product>, i64), StoreError>;
}
