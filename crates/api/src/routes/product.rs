//! Route definitions for the `/productos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/productos`.
///
/// ```text
/// GET    /                          -> list (?page=&limit=)
/// POST   /                          -> create (multipart)
/// GET    /{codigo}                  -> get_by_code
/// PUT    /{codigo}                  -> update (multipart)
/// DELETE /{codigo}                  -> delete (soft)
/// GET    /categoria/{categoria}     -> list_by_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route(
            "/{codigo}",
            get(product::get_by_code)
                .put(product::update)
                .delete(product::delete),
        )
        .route("/categoria/{categoria}", get(product::list_by_category))
}
