use thiserror::Error;

/// Errors that can occur when validating a project submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectError {
    #[error("Missing required fields")]
    MissingRequiredFields,
    #[error("Main image is required")]
    MissingImage,
    #[error("Title too long (max 200 characters)")]
    TitleTooLong,
    #[error("Slug too long (max 100 characters)")]
    SlugTooLong,
    #[error("Slug may only contain letters, numbers, hyphens and underscores: {0}")]
    InvalidSlug(String),
    #[error("{field} must be a valid http(s) URL")]
    InvalidUrl { field: &'static str, value: String },
}
