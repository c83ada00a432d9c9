//! In-process [`ProductStore`] backed by a `Vec`.
//!
//! Mirrors the PostgreSQL adapter's semantics (unique `codigo`, id ordering,
//! active filtering) so the catalog and HTTP layer can run without a
//! database. It can be switched offline to exercise failure paths.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::product::{NewProduct, Product, ProductChanges};
use crate::store::{ProductStore, StoreError};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Default)]
struct Rows {
    products: Vec<Product>,
    last_id: DbId,
}

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    rows: RwLock<Rows>,
    offline: AtomicBool,
}

#[derive(Debug, thiserror::Error)]
#[error("memory store is offline")]
struct Offline;

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every operation fails with [`StoreError::Backend`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of rows, deleted ones included.
    pub async fn len(&self) -> usize {
        self.rows.read().await.products.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(Box::new(Offline)));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }

    async fn find_by_codigo(&self, codigo: &str) -> Result<Option<Product>, StoreError> {
        self.check_online()?;
        let rows = self.rows.read().await;
        Ok(rows.products.iter().find(|p| p.codigo == codigo).cloned())
    }

    async fn find_active_by_codigo(&self, codigo: &str) -> Result<Option<Product>, StoreError> {
        self.check_online()?;
        let rows = self.rows.read().await;
        Ok(rows
            .products
            .iter()
            .find(|p| p.codigo == codigo && !p.deleted)
            .cloned())
    }

    async fn insert(&self, record: &NewProduct) -> Result<Product, StoreError> {
        self.check_online()?;
        let mut rows = self.rows.write().await;
        if rows.products.iter().any(|p| p.codigo == record.codigo) {
            return Err(StoreError::Duplicate(record.codigo.clone()));
        }
        rows.last_id += 1;
        let product = Product {
            id: rows.last_id,
            codigo: record.codigo.clone(),
            modelo: record.modelo.clone(),
            marca: record.marca.clone(),
            tipo_producto: record.tipo_producto.clone(),
            url_imagen: record.url_imagen.clone(),
            created_by: record.created_by.clone(),
            updated_by: None,
            deleted_by: None,
            created_at: record.created_at,
            updated_at: record.created_at,
            deleted_at: None,
            deleted: false,
        };
        rows.products.push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        codigo: &str,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, StoreError> {
        self.check_online()?;
        let mut rows = self.rows.write().await;
        let Some(product) = rows
            .products
            .iter_mut()
            .find(|p| p.codigo == codigo && !p.deleted)
        else {
            return Ok(None);
        };
        product.modelo = changes.modelo.clone();
        product.marca = changes.marca.clone();
        product.tipo_producto = changes.tipo_producto.clone();
        product.url_imagen = changes.url_imagen.clone();
        product.updated_by = Some(changes.updated_by.clone());
        product.updated_at = changes.updated_at;
        Ok(Some(product.clone()))
    }

    async fn soft_delete(
        &self,
        codigo: &str,
        deleted_by: &str,
        deleted_at: Timestamp,
    ) -> Result<bool, StoreError> {
        self.check_online()?;
        let mut rows = self.rows.write().await;
        let Some(product) = rows
            .products
            .iter_mut()
            .find(|p| p.codigo == codigo && !p.deleted)
        else {
            return Ok(false);
        };
        product.deleted = true;
        product.deleted_at = Some(deleted_at);
        product.deleted_by = Some(deleted_by.to_string());
        Ok(true)
    }

    async fn list_by_category(&self, categoria: &str) -> Result<Vec<Product>, StoreError> {
        self.check_online()?;
        let rows = self.rows.read().await;
        Ok(rows
            .products
            .iter()
            .filter(|p| !p.deleted && p.tipo_producto.categoria == categoria)
            .cloned()
            .collect())
    }

    async fn list_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), StoreError> {
        self.check_online()?;
        let rows = self.rows.read().await;
        let active: Vec<&Product> = rows.products.iter().filter(|p| !p.deleted).collect();
        let count = active.len() as i64;
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let page = active
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((page, count))
    }
}
