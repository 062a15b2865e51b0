//! Image upload endpoint and multipart ingestion

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::StatusCode,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::image::{ImageMimeType, StoredImage};

/// Multipart field that carries the uploaded file
pub const IMAGE_FIELD: &str = "image";

/// Upload response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub message: String,
    pub image_path: String,
}

/// Extractor that parses the multipart form and stores the `image` file, if any
///
/// The whole form is read and checked before anything is written, so a rejected
/// request never leaves a file behind.
#[derive(Debug)]
pub struct ImageUpload(pub Option<StoredImage>);

impl FromRequest<AppState> for ImageUpload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let mut image: Option<(ImageMimeType, Bytes)> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            // Plain form values are ignored
            if field.file_name().is_none() {
                continue;
            }

            let name = field.name().unwrap_or_default().to_string();

            if name != IMAGE_FIELD {
                return Err(ApiError::bad_request(format!("Unexpected field '{}'", name)));
            }

            if image.is_some() {
                return Err(ApiError::bad_request("Only one image file may be uploaded"));
            }

            let mime_type = field
                .content_type()
                .and_then(ImageMimeType::from_mime)
                .ok_or_else(|| {
                    ApiError::bad_request("Only JPEG, PNG, and GIF files are allowed")
                })?;

            let content = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;

            image = Some((mime_type, content));
        }

        let Some((mime_type, content)) = image else {
            return Ok(Self(None));
        };

        let stored = state
            .image_store
            .store(IMAGE_FIELD, mime_type, content)
            .await
            .map_err(|e| ApiError::from_domain(e, "Error uploading image"))?;

        Ok(Self(Some(stored)))
    }
}

/// POST /user/uploadImage
pub async fn upload_image(
    ImageUpload(image): ImageUpload,
) -> Result<(StatusCode, Json<UploadImageResponse>), ApiError> {
    let image = image.ok_or_else(|| ApiError::bad_request("No image file provided"))?;

    debug!(path = %image.path, mime_type = %image.mime_type, size = image.size, "Image uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadImageResponse {
            message: "Image uploaded successfully".to_string(),
            image_path: image.path,
        }),
    ))
}
