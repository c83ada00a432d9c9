//! Product lifecycle and query service.
//!
//! [`ProductCatalog`] owns the rules that sit between HTTP and storage:
//! code uniqueness, soft-delete visibility, page math and keeping the image
//! directory in step with `url_imagen`.

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::error::CoreError;
use crate::images::ImageStore;
use crate::pagination::PageRequest;
use crate::product::{
    CreateProduct, DeleteProduct, NewProduct, Product, ProductChanges, ProductPage, UpdateProduct,
};
use crate::store::{ProductStore, StoreError};

pub const CODE_UNAVAILABLE: &str = "Código de producto no disponible";
pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
pub const CATEGORY_EMPTY: &str = "No hay productos en la categoría especificada.";
pub const IMAGE_REQUIRED: &str = "La imagen del producto es obligatoria";

const CREATE_FAILED: &str = "Error al crear el producto";
const UPDATE_FAILED: &str = "Error al actualizar el producto";
const DELETE_FAILED: &str = "Error al eliminar el producto";
const GET_FAILED: &str = "Error al buscar el producto";
const CATEGORY_FAILED: &str = "Error al buscar los productos por categoría.";
const LIST_FAILED: &str = "Error al buscar los productos";

#[derive(Clone)]
pub struct ProductCatalog {
    store: Arc<dyn ProductStore>,
    images: ImageStore,
}

impl std::fmt::Debug for ProductCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCatalog")
            .field("images", &self.images)
            .finish_non_exhaustive()
    }
}

impl ProductCatalog {
    pub fn new(store: Arc<dyn ProductStore>, images: ImageStore) -> Self {
        Self { store, images }
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Whether the persistence store answers.
    pub async fn store_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "Product store ping failed");
                false
            }
        }
    }

    /// Register a new product whose image has already been stored as
    /// `url_imagen`.
    ///
    /// A code is unavailable once used, even if that product was later
    /// soft-deleted. On any failure the uploaded image is discarded.
    pub async fn create(
        &self,
        input: CreateProduct,
        url_imagen: String,
    ) -> Result<Product, CoreError> {
        let result = self.insert_new(input, &url_imagen).await;
        if result.is_err() && !url_imagen.is_empty() {
            self.images.discard(&url_imagen).await;
        }
        result
    }

    async fn insert_new(
        &self,
        input: CreateProduct,
        url_imagen: &str,
    ) -> Result<Product, CoreError> {
        input.validate()?;
        if url_imagen.is_empty() {
            return Err(CoreError::Validation(IMAGE_REQUIRED.into()));
        }

        let existing = self
            .store
            .find_by_codigo(&input.codigo)
            .await
            .map_err(CoreError::internal(CREATE_FAILED))?;
        if existing.is_some() {
            return Err(CoreError::Conflict(CODE_UNAVAILABLE.into()));
        }

        let record = NewProduct::from_input(input, url_imagen.to_string(), Utc::now());
        match self.store.insert(&record).await {
            Ok(product) => {
                tracing::info!(codigo = %product.codigo, id = product.id, "Product created");
                Ok(product)
            }
            // Lost the race against a concurrent insert of the same code.
            Err(StoreError::Duplicate(_)) => Err(CoreError::Conflict(CODE_UNAVAILABLE.into())),
            Err(err) => Err(CoreError::internal(CREATE_FAILED)(err)),
        }
    }

    /// Update an active product.
    ///
    /// The record is written first. Once it is committed the previous image
    /// file is discarded, whether or not a replacement was uploaded; without a
    /// replacement `url_imagen` keeps its old value. A failed removal is
    /// logged and the update still succeeds. If the update fails the new
    /// upload, if any, is discarded.
    pub async fn update(
        &self,
        codigo: &str,
        input: UpdateProduct,
        new_image: Option<String>,
    ) -> Result<Product, CoreError> {
        let (previous, updated) = match self.commit_update(codigo, input, new_image.as_deref()).await
        {
            Ok(pair) => pair,
            Err(err) => {
                if let Some(name) = new_image.as_deref() {
                    self.images.discard(name).await;
                }
                return Err(err);
            }
        };

        // The record is already committed; a stale file only costs disk space.
        self.images.discard(&previous.url_imagen).await;

        tracing::info!(
            codigo,
            replaced_image = new_image.is_some(),
            "Product updated"
        );
        Ok(updated)
    }

    async fn commit_update(
        &self,
        codigo: &str,
        input: UpdateProduct,
        new_image: Option<&str>,
    ) -> Result<(Product, Product), CoreError> {
        input.validate()?;

        let previous = self
            .store
            .find_active_by_codigo(codigo)
            .await
            .map_err(CoreError::internal(UPDATE_FAILED))?
            .ok_or_else(|| CoreError::NotFound(PRODUCT_NOT_FOUND.into()))?;

        let changes = ProductChanges {
            modelo: input.modelo,
            marca: input.marca,
            tipo_producto: input.tipo_producto,
            url_imagen: new_image.unwrap_or(&previous.url_imagen).to_string(),
            updated_by: input.updated_by,
            updated_at: Utc::now(),
        };

        let updated = self
            .store
            .update(codigo, &changes)
            .await
            .map_err(CoreError::internal(UPDATE_FAILED))?
            .ok_or_else(|| CoreError::NotFound(PRODUCT_NOT_FOUND.into()))?;

        Ok((previous, updated))
    }

    /// Flag an active product as deleted. Its image stays on disk.
    pub async fn soft_delete(&self, codigo: &str, input: DeleteProduct) -> Result<(), CoreError> {
        input.validate()?;

        let marked = self
            .store
            .soft_delete(codigo, &input.deleted_by, Utc::now())
            .await
            .map_err(CoreError::internal(DELETE_FAILED))?;
        if !marked {
            return Err(CoreError::NotFound(PRODUCT_NOT_FOUND.into()));
        }

        tracing::info!(codigo, deleted_by = %input.deleted_by, "Product soft-deleted");
        Ok(())
    }

    /// Fetch a product by code. Soft-deleted products are returned too.
    pub async fn get_by_code(&self, codigo: &str) -> Result<Product, CoreError> {
        self.store
            .find_by_codigo(codigo)
            .await
            .map_err(CoreError::internal(GET_FAILED))?
            .ok_or_else(|| CoreError::NotFound(PRODUCT_NOT_FOUND.into()))
    }

    /// Active products in `categoria`. No match is reported as `NotFound`.
    pub async fn get_by_category(&self, categoria: &str) -> Result<Vec<Product>, CoreError> {
        let products = self
            .store
            .list_by_category(categoria)
            .await
            .map_err(CoreError::internal(CATEGORY_FAILED))?;
        if products.is_empty() {
            return Err(CoreError::NotFound(CATEGORY_EMPTY.into()));
        }
        Ok(products)
    }

    /// One page of active products. Pages past the end, including page 1 of
    /// an empty catalog, are `NotFound`.
    pub async fn list(&self, request: PageRequest) -> Result<ProductPage, CoreError> {
        let (productos, count) = self
            .store
            .list_page(request.offset(), request.limit())
            .await
            .map_err(CoreError::internal(LIST_FAILED))?;
        let total_pages = request.check_against(count)?;

        Ok(ProductPage {
            productos,
            current_page: request.page(),
            total_pages,
            total_productos: count,
        })
    }
}
