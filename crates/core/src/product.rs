//! Product entity and the DTOs accepted by the catalog.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

/// Category classification of a product.
///
/// Only `categoria` is interpreted by the catalog; any other keys sent by
/// clients are kept as-is and round-trip through storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TipoProducto {
    #[validate(length(min = 1, message = "categoria es obligatoria"))]
    pub categoria: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TipoProducto {
    pub fn new(categoria: impl Into<String>) -> Self {
        Self {
            categoria: categoria.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// A product row as seen by the rest of the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: DbId,
    pub codigo: String,
    pub modelo: String,
    pub marca: String,
    pub tipo_producto: TipoProducto,
    /// Filename of the image, relative to the public root.
    pub url_imagen: String,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub deleted: bool,
}

/// Input for creating a product. The image filename travels separately.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "codigo es obligatorio"))]
    pub codigo: String,
    #[validate(length(min = 1, message = "modelo es obligatorio"))]
    pub modelo: String,
    #[validate(length(min = 1, message = "marca es obligatoria"))]
    pub marca: String,
    #[validate(nested)]
    pub tipo_producto: TipoProducto,
    #[validate(length(min = 1, message = "created_by es obligatorio"))]
    pub created_by: String,
}

/// Input for updating a product. `codigo` comes from the path and never changes.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "modelo es obligatorio"))]
    pub modelo: String,
    #[validate(length(min = 1, message = "marca es obligatoria"))]
    pub marca: String,
    #[validate(nested)]
    pub tipo_producto: TipoProducto,
    #[validate(length(min = 1, message = "updated_by es obligatorio"))]
    pub updated_by: String,
}

/// Input for soft-deleting a product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteProduct {
    #[validate(length(min = 1, message = "deleted_by es obligatorio"))]
    pub deleted_by: String,
}

/// A fully-resolved record ready to be inserted by a store.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub codigo: String,
    pub modelo: String,
    pub marca: String,
    pub tipo_producto: TipoProducto,
    pub url_imagen: String,
    pub created_by: String,
    pub created_at: Timestamp,
}

impl NewProduct {
    pub fn from_input(input: CreateProduct, url_imagen: String, now: Timestamp) -> Self {
        Self {
            codigo: input.codigo,
            modelo: input.modelo,
            marca: input.marca,
            tipo_producto: input.tipo_producto,
            url_imagen,
            created_by: input.created_by,
            created_at: now,
        }
    }
}

/// Mutable columns written by an update.
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub modelo: String,
    pub marca: String,
    pub tipo_producto: TipoProducto,
    pub url_imagen: String,
    pub updated_by: String,
    pub updated_at: Timestamp,
}

/// One page of the active catalog, in the shape returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub productos: Vec<Product>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_productos: i64,
}
