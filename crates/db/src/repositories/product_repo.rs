//! Repository for the `productos` table.

use productos_core::product::{NewProduct, ProductChanges};
use productos_core::types::Timestamp;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::product::ProductRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, codigo, modelo, marca, tipo_producto, url_imagen, \
     created_by, updated_by, deleted_by, created_at, updated_at, deleted_at, deleted";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewProduct) -> Result<ProductRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO productos
                (codigo, modelo, marca, tipo_producto, url_imagen, created_by, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(&input.codigo)
            .bind(&input.modelo)
            .bind(&input.marca)
            .bind(Json(&input.tipo_producto))
            .bind(&input.url_imagen)
            .bind(&input.created_by)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a product by code, including soft-deleted rows.
    pub async fn find_by_codigo(
        pool: &PgPool,
        codigo: &str,
    ) -> Result<Option<ProductRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM productos WHERE codigo = $1");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(codigo)
            .fetch_optional(pool)
            .await
    }

    /// Find a product by code. Excludes soft-deleted rows.
    pub async fn find_active_by_codigo(
        pool: &PgPool,
        codigo: &str,
    ) -> Result<Option<ProductRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM productos WHERE codigo = $1 AND deleted = FALSE");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(codigo)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the mutable columns of an active product.
    ///
    /// Returns `None` if no active row with the given code exists.
    pub async fn update(
        pool: &PgPool,
        codigo: &str,
        input: &ProductChanges,
    ) -> Result<Option<ProductRow>, sqlx::Error> {
        let query = format!(
            "UPDATE productos SET
                modelo = $2,
                marca = $3,
                tipo_producto = $4,
                url_imagen = $5,
                updated_by = $6,
                updated_at = $7
             WHERE codigo = $1 AND deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(codigo)
            .bind(&input.modelo)
            .bind(&input.marca)
            .bind(Json(&input.tipo_producto))
            .bind(&input.url_imagen)
            .bind(&input.updated_by)
            .bind(input.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a product by code. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(
        pool: &PgPool,
        codigo: &str,
        deleted_by: &str,
        deleted_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE productos SET deleted = TRUE, deleted_at = $3, deleted_by = $2
             WHERE codigo = $1 AND deleted = FALSE",
        )
        .bind(codigo)
        .bind(deleted_by)
        .bind(deleted_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List active products in a category, ordered by id.
    pub async fn list_by_category(
        pool: &PgPool,
        categoria: &str,
    ) -> Result<Vec<ProductRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM productos
             WHERE deleted = FALSE AND tipo_producto ->> 'categoria' = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(categoria)
            .fetch_all(pool)
            .await
    }

    /// List one window of active products, ordered by id.
    pub async fn list_active(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProductRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM productos
             WHERE deleted = FALSE
             ORDER BY id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count active products.
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM productos WHERE deleted = FALSE")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}
