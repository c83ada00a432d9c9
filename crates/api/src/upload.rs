//! Multipart upload handling for product forms.
//!
//! The whole form is read before anything touches disk, so a malformed
//! request never leaves an orphaned file behind. The image format is
//! detected from the file contents; the client's filename is ignored.

use std::collections::HashMap;

use axum::extract::Multipart;
use image::ImageFormat;
use productos_core::images::ImageStore;
use productos_core::product::TipoProducto;

use crate::error::{AppError, AppResult};

/// Name of the multipart field carrying the product image.
pub const IMAGE_FIELD: &str = "imagen";

/// An image received in a multipart request, not yet stored.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    /// File extension matching the sniffed format.
    pub extension: &'static str,
}

/// Text fields plus the optional image of a product form.
#[derive(Debug, Default)]
pub struct ProductForm {
    fields: HashMap<String, String>,
    pub image: Option<UploadedImage>,
}

impl ProductForm {
    /// Drain a multipart stream. Unknown file fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = ProductForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == IMAGE_FIELD {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                if data.is_empty() {
                    continue;
                }
                let extension = sniff_image(&data)?;
                form.image = Some(UploadedImage {
                    data: data.to_vec(),
                    extension,
                });
            } else if field.file_name().is_none() && !name.is_empty() {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Take a text field, or an empty string if it was not sent. Emptiness
    /// is caught later by input validation.
    pub fn take_text(&mut self, name: &str) -> String {
        self.fields.remove(name).unwrap_or_default()
    }

    /// Parse `tipo_producto`, sent as a JSON object in a text field.
    pub fn take_tipo_producto(&mut self) -> AppResult<TipoProducto> {
        let raw = self
            .fields
            .remove("tipo_producto")
            .ok_or_else(|| AppError::BadRequest("tipo_producto es obligatorio".into()))?;
        serde_json::from_str(&raw).map_err(|e| {
            AppError::BadRequest(format!(
                "tipo_producto debe ser un objeto JSON con 'categoria': {e}"
            ))
        })
    }
}

/// Identify the image format from its leading bytes.
///
/// Only PNG, JPEG and WebP are accepted.
pub fn sniff_image(data: &[u8]) -> AppResult<&'static str> {
    match image::guess_format(data) {
        Ok(ImageFormat::Png) => Ok("png"),
        Ok(ImageFormat::Jpeg) => Ok("jpg"),
        Ok(ImageFormat::WebP) => Ok("webp"),
        _ => Err(AppError::BadRequest(
            "Formato de imagen no soportado. Formatos aceptados: png, jpg, webp".into(),
        )),
    }
}

/// Write `image` under the public root with a fresh unique name and return
/// that name.
pub async fn store_image(images: &ImageStore, image: &UploadedImage) -> AppResult<String> {
    let filename = format!("{}.{}", uuid::Uuid::new_v4().simple(), image.extension);
    images
        .save(&filename, &image.data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    tracing::debug!(filename = %filename, bytes = image.data.len(), "Stored uploaded image");
    Ok(filename)
}
