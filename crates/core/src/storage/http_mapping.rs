//! HTTP status codes for repository failures.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to the status a project endpoint answers with.
///
/// A missing slug is 404 and a slug collision on create or rename is 409.
/// An unreachable database is 503. Rows that fail to decode and failed
/// queries are 500, while data rejected before it reaches storage is 400.
///
/// ```
/// use folio_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::slug_taken("portfolio");
/// assert_eq!(repository_error_to_status_code(&error), 409);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}
