#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use productos_core::catalog::ProductCatalog;
use productos_core::images::ImageStore;
use productos_core::memory::MemoryProductStore;
use tempfile::TempDir;
use tower::ServiceExt;

use productos_api::config::{LogFormat, ServerConfig};
use productos_api::router::build_app_router;
use productos_api::state::AppState;

/// Minimal PNG signature; enough for format sniffing.
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDRfake-png-body";

/// Minimal JPEG signature.
pub const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0fake-jpeg-body";

const BOUNDARY: &str = "----productos-test-boundary";

/// A router wired to an in-memory store and a temporary public directory.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryProductStore>,
    pub images: ImageStore,
    _public_dir: TempDir,
}

impl TestApp {
    /// A fresh clone of the router for one request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Number of files currently in the public directory.
    pub fn image_count(&self) -> usize {
        std::fs::read_dir(self.images.root()).unwrap().count()
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(public_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://localhost/productos_test".to_string(),
        db_max_connections: 1,
        public_dir,
        max_upload_bytes: 5 * 1024 * 1024,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router with all middleware layers.
///
/// Uses the same builder as `main.rs` so integration tests exercise the
/// production middleware stack.
pub fn build_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().to_path_buf());
    let store = Arc::new(MemoryProductStore::new());
    let images = ImageStore::new(dir.path());

    let state = AppState {
        catalog: Arc::new(ProductCatalog::new(store.clone(), images.clone())),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        images,
        _public_dir: dir,
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_empty(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Encode text fields and an optional `imagen` file as multipart/form-data.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some(data) = image {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"imagen\"; filename=\"foto.bin\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    image: Option<&[u8]>,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, image)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST /productos with a complete form.
pub async fn create_product(app: Router, codigo: &str, categoria: &str) -> Response {
    let tipo = serde_json::json!({ "categoria": categoria }).to_string();
    send_multipart(
        app,
        Method::POST,
        "/productos",
        &[
            ("codigo", codigo),
            ("modelo", "Inspiron 15"),
            ("marca", "Dell"),
            ("tipo_producto", tipo.as_str()),
            ("created_by", "ana"),
        ],
        Some(PNG),
    )
    .await
}

/// PUT /productos/{codigo} with a complete form.
pub async fn update_product(
    app: Router,
    codigo: &str,
    modelo: &str,
    image: Option<&[u8]>,
) -> Response {
    let tipo = serde_json::json!({ "categoria": "laptops" }).to_string();
    send_multipart(
        app,
        Method::PUT,
        &format!("/productos/{codigo}"),
        &[
            ("modelo", modelo),
            ("marca", "Dell"),
            ("tipo_producto", tipo.as_str()),
            ("updated_by", "luis"),
        ],
        image,
    )
    .await
}
