use std::sync::Arc;

use productos_core::catalog::ProductCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Product lifecycle and query service.
    pub catalog: Arc<ProductCatalog>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
