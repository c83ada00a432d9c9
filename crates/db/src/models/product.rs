//! Row type for the `productos` table.

use productos_core::product::{Product, TipoProducto};
use productos_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from `productos`. `tipo_producto` is stored as JSONB.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: DbId,
    pub codigo: String,
    pub modelo: String,
    pub marca: String,
    pub tipo_producto: Json<TipoProducto>,
    pub url_imagen: String,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub deleted: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            codigo: row.codigo,
            modelo: row.modelo,
            marca: row.marca,
            tipo_producto: row.tipo_producto.0,
            url_imagen: row.url_imagen,
            created_by: row.created_by,
            updated_by: row.updated_by,
            deleted_by: row.deleted_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
            deleted: row.deleted,
        }
    }
}
