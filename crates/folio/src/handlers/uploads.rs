//! Serving files written by the disk image store.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{images::resolve_upload_path, state::AppState};

const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// GET /uploads/{*path}
pub async fn serve_upload(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let Some(file_path) = resolve_upload_path(&state.config.upload_dir, &path) else {
        tracing::warn!(path = %path, "rejected upload path");
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(&file_path).await {
        Ok(contents) => {
            let content_type = mime_guess::from_path(&file_path)
                .first_raw()
                .unwrap_or("application/octet-stream");

            (
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::CACHE_CONTROL, CACHE_CONTROL),
                ],
                Body::from(contents),
            )
                .into_response()
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(error = %e, path = %file_path.display(), "failed to read upload");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
