//! [`ProductStore`] implementation over PostgreSQL.

use async_trait::async_trait;
use productos_core::product::{NewProduct, Product, ProductChanges};
use productos_core::store::{ProductStore, StoreError};
use productos_core::types::Timestamp;

use crate::repositories::ProductRepo;
use crate::DbPool;

/// Unique constraint guarding `productos.codigo`.
const CODIGO_CONSTRAINT: &str = "uq_productos_codigo";

/// PostgreSQL unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: DbPool,
}

impl PgProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(Box::new(err))
}

/// Whether `err` is the unique violation on `codigo`.
fn is_duplicate_codigo(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(CODIGO_CONSTRAINT)
        }
        _ => false,
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(backend)
    }

    async fn find_by_codigo(&self, codigo: &str) -> Result<Option<Product>, StoreError> {
        let row = ProductRepo::find_by_codigo(&self.pool, codigo)
            .await
            .map_err(backend)?;
        Ok(row.map(Product::from))
    }

    async fn find_active_by_codigo(&self, codigo: &str) -> Result<Option<Product>, StoreError> {
        let row = ProductRepo::find_active_by_codigo(&self.pool, codigo)
            .await
            .map_err(backend)?;
        Ok(row.map(Product::from))
    }

    async fn insert(&self, record: &NewProduct) -> Result<Product, StoreError> {
        match ProductRepo::create(&self.pool, record).await {
            Ok(row) => Ok(row.into()),
            Err(err) if is_duplicate_codigo(&err) => {
                tracing::debug!(codigo = %record.codigo, "Insert hit unique constraint on codigo");
                Err(StoreError::Duplicate(record.codigo.clone()))
            }
            Err(err) => Err(backend(err)),
        }
    }

    async fn update(
        &self,
        codigo: &str,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, StoreError> {
        let row = ProductRepo::update(&self.pool, codigo, changes)
            .await
            .map_err(backend)?;
        Ok(row.map(Product::from))
    }

    async fn soft_delete(
        &self,
        codigo: &str,
        deleted_by: &str,
        deleted_at: Timestamp,
    ) -> Result<bool, StoreError> {
        ProductRepo::soft_delete(&self.pool, codigo, deleted_by, deleted_at)
            .await
            .map_err(backend)
    }

    async fn list_by_category(&self, categoria: &str) -> Result<Vec<Product>, StoreError> {
        let rows = ProductRepo::list_by_category(&self.pool, categoria)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn list_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), StoreError> {
        let (rows, count) = tokio::try_join!(
            ProductRepo::list_active(&self.pool, offset, limit),
            ProductRepo::count_active(&self.pool),
        )
        .map_err(backend)?;
        Ok((rows.into_iter().map(Product::from).collect(), count))
    }
}
