//! Standalone image upload.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use folio_auth::AdminSession;
use serde_json::json;

use super::{error::ApiError, form::MultipartParts};
use crate::state::AppState;

/// POST /api/upload - store a single `file` part and return its reference.
pub async fn upload_image(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::new(e.status(), e.body_text()))?;
    let mut parts = MultipartParts::collect(multipart).await?;
    let upload = parts
        .take_file("file")
        .ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    let size = upload.len();
    let image_url = state.images.store(upload).await?;
    tracing::info!(size, backend = %state.images.kind(), "image uploaded");

    Ok((StatusCode::CREATED, Json(json!({ "imageUrl": image_url }))))
}
