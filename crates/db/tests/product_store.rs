//! Integration tests for the PostgreSQL product store.
//!
//! These need a live server (`DATABASE_URL`); run them with
//! `cargo test -p productos-db -- --ignored`.

use assert_matches::assert_matches;
use chrono::Utc;
use productos_core::product::{NewProduct, ProductChanges, TipoProducto};
use productos_core::store::{ProductStore, StoreError};
use productos_db::repositories::ProductRepo;
use productos_db::PgProductStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_product(codigo: &str, categoria: &str) -> NewProduct {
    NewProduct {
        codigo: codigo.to_string(),
        modelo: "EliteBook 840".to_string(),
        marca: "HP".to_string(),
        tipo_producto: TipoProducto::new(categoria),
        url_imagen: format!("{codigo}.png"),
        created_by: "ana".to_string(),
        created_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Insert / lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_insert_then_find(pool: PgPool) {
    let store = PgProductStore::new(pool);
    let created = store.insert(&new_product("P1", "laptops")).await.unwrap();
    assert!(!created.deleted);
    assert_eq!(created.tipo_producto.categoria, "laptops");

    let found = store.find_by_codigo("P1").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.url_imagen, "P1.png");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_duplicate_codigo_maps_to_duplicate(pool: PgPool) {
    let store = PgProductStore::new(pool);
    store.insert(&new_product("P1", "laptops")).await.unwrap();

    let result = store.insert(&new_product("P1", "monitores")).await;
    assert_matches!(result, Err(StoreError::Duplicate(code)) if code == "P1");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_extra_tipo_producto_keys_round_trip(pool: PgPool) {
    let store = PgProductStore::new(pool);
    let mut record = new_product("P1", "monitores");
    record
        .tipo_producto
        .extra
        .insert("pulgadas".into(), serde_json::json!(27));
    store.insert(&record).await.unwrap();

    let found = store.find_by_codigo("P1").await.unwrap().unwrap();
    assert_eq!(found.tipo_producto.extra["pulgadas"], 27);
}

// ---------------------------------------------------------------------------
// Soft delete visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_soft_delete_hides_from_active_queries(pool: PgPool) {
    let store = PgProductStore::new(pool.clone());
    store.insert(&new_product("P1", "laptops")).await.unwrap();
    store.insert(&new_product("P2", "laptops")).await.unwrap();

    let deleted = store.soft_delete("P1", "luis", Utc::now()).await.unwrap();
    assert!(deleted, "soft_delete should return true on first call");
    let again = store.soft_delete("P1", "luis", Utc::now()).await.unwrap();
    assert!(!again, "soft_delete should return false on second call");

    assert!(store.find_active_by_codigo("P1").await.unwrap().is_none());
    let any = store.find_by_codigo("P1").await.unwrap().unwrap();
    assert!(any.deleted);
    assert_eq!(any.deleted_by.as_deref(), Some("luis"));

    let laptops = store.list_by_category("laptops").await.unwrap();
    assert_eq!(laptops.len(), 1);
    assert_eq!(laptops[0].codigo, "P2");

    assert_eq!(ProductRepo::count_active(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_skips_deleted_rows(pool: PgPool) {
    let store = PgProductStore::new(pool);
    store.insert(&new_product("P1", "laptops")).await.unwrap();

    let changes = ProductChanges {
        modelo: "ZBook".into(),
        marca: "HP".into(),
        tipo_producto: TipoProducto::new("workstations"),
        url_imagen: "P1-v2.png".into(),
        updated_by: "luis".into(),
        updated_at: Utc::now(),
    };
    let updated = store.update("P1", &changes).await.unwrap().unwrap();
    assert_eq!(updated.modelo, "ZBook");
    assert_eq!(updated.url_imagen, "P1-v2.png");
    assert_eq!(updated.updated_by.as_deref(), Some("luis"));

    store.soft_delete("P1", "luis", Utc::now()).await.unwrap();
    assert!(store.update("P1", &changes).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_list_page_orders_by_id_and_counts_active(pool: PgPool) {
    let store = PgProductStore::new(pool);
    for code in ["A", "B", "C", "D", "E"] {
        store.insert(&new_product(code, "laptops")).await.unwrap();
    }
    store.soft_delete("C", "luis", Utc::now()).await.unwrap();

    let (rows, count) = store.list_page(2, 2).await.unwrap();
    assert_eq!(count, 4);
    let codes: Vec<_> = rows.iter().map(|p| p.codigo.as_str()).collect();
    assert_eq!(codes, ["D", "E"]);
}
