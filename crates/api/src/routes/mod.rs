pub mod health;
pub mod product;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// ```text
/// /productos                        list, create
/// /productos/{codigo}               get, update, soft-delete
/// /productos/categoria/{categoria}  list by category
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/productos", product::router())
}
