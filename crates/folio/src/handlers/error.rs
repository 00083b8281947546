use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_core::images::{image_error_to_status_code, ImageError};
use folio_core::project::ProjectError;
use folio_core::storage::{repository_error_to_status_code, RepositoryError};
use serde_json::json;

/// A JSON API error: `{"error": message}` with a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Project not found")
    }

    pub fn slug_taken() -> Self {
        Self::new(StatusCode::CONFLICT, "Slug already exists")
    }

    /// Logs `source` and hides it behind a generic 500 message.
    pub fn internal(message: &str, source: impl std::fmt::Display) -> Self {
        tracing::error!(error = %source, "{message}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Maps a repository failure, using `fallback` for unexpected errors.
    pub fn from_repository(error: RepositoryError, fallback: &str) -> Self {
        match error {
            RepositoryError::NotFound { .. } => Self::not_found(),
            RepositoryError::AlreadyExists { .. } => Self::slug_taken(),
            other => Self::internal(fallback, other),
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(error: ProjectError) -> Self {
        Self::bad_request(error.to_string())
    }
}

impl From<ImageError> for ApiError {
    fn from(error: ImageError) -> Self {
        let status = StatusCode::from_u16(image_error_to_status_code(&error))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(%error, "image store failed");
            return Self::new(status, "Failed to process image");
        }
        Self::new(status, error.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "API error");
        } else {
            tracing::warn!(status = %self.status, message = %self.message, "API error");
        }

        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Catch-all error for HTML routes. Repository errors keep their status.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status_code.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
