//! Handlers for the `/productos` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use productos_core::catalog::IMAGE_REQUIRED;
use productos_core::pagination::PageRequest;
use productos_core::product::{CreateProduct, DeleteProduct, Product, ProductPage, UpdateProduct};

use crate::error::{AppError, AppResult};
use crate::query::PageParams;
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::upload::{self, ProductForm};

/// POST /productos
///
/// Multipart form with `codigo`, `modelo`, `marca`, `tipo_producto` (JSON),
/// `created_by` and a required `imagen` file.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let mut form = ProductForm::from_multipart(multipart).await?;
    let input = CreateProduct {
        codigo: form.take_text("codigo"),
        modelo: form.take_text("modelo"),
        marca: form.take_text("marca"),
        tipo_producto: form.take_tipo_producto()?,
        created_by: form.take_text("created_by"),
    };
    let image = form
        .image
        .take()
        .ok_or_else(|| AppError::BadRequest(IMAGE_REQUIRED.into()))?;

    let url_imagen = upload::store_image(state.catalog.images(), &image).await?;
    state.catalog.create(input, url_imagen).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Producto agregado exitosamente")),
    ))
}

/// PUT /productos/{codigo}
///
/// Multipart form with `modelo`, `marca`, `tipo_producto` (JSON),
/// `updated_by` and an optional replacement `imagen`.
pub async fn update(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<MessageResponse>> {
    let mut form = ProductForm::from_multipart(multipart).await?;
    let input = UpdateProduct {
        modelo: form.take_text("modelo"),
        marca: form.take_text("marca"),
        tipo_producto: form.take_tipo_producto()?,
        updated_by: form.take_text("updated_by"),
    };

    let new_image = match form.image.take() {
        Some(image) => Some(upload::store_image(state.catalog.images(), &image).await?),
        None => None,
    };
    state.catalog.update(&codigo, input, new_image).await?;

    Ok(Json(MessageResponse::new("Producto actualizado exitosamente")))
}

/// DELETE /productos/{codigo}
///
/// JSON body `{ "deleted_by": "..." }`.
pub async fn delete(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
    body: Result<Json<DeleteProduct>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(input) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    state.catalog.soft_delete(&codigo, input).await?;
    Ok(Json(MessageResponse::new("Producto eliminado")))
}

/// GET /productos/{codigo}
///
/// Soft-deleted products are returned too, with `deleted: true`.
pub async fn get_by_code(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state.catalog.get_by_code(&codigo).await?;
    Ok(Json(product))
}

/// GET /productos/categoria/{categoria}
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(categoria): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.catalog.get_by_category(&categoria).await?;
    Ok(Json(products))
}

/// GET /productos?page=&limit=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<ProductPage>> {
    let request = PageRequest::parse(params.page.as_deref(), params.limit.as_deref())?;
    let page = state.catalog.list(request).await?;
    Ok(Json(page))
}
