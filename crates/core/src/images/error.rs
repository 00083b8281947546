use thiserror::Error;

/// Errors raised while validating or storing an image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Only image files are allowed")]
    NotAnImage,

    #[error("File size exceeds maximum limit of {}", format_limit(.limit))]
    TooLarge { size: usize, limit: usize },

    #[error("Uploaded file is empty")]
    Empty,

    #[error("image storage failed: {0}")]
    Storage(String),

    /// The remote image service answered with an error.
    #[error("image service error: {0}")]
    Remote(String),
}

// Rounded up so a limit never reads as zero.
fn format_limit(limit: &usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    match *limit {
        l if l >= MB => format!("{}MB", l.div_ceil(MB)),
        l if l >= KB => format!("{}KB", l.div_ceil(KB)),
        l => format!("{l} bytes"),
    }
}

/// Maps an [`ImageError`] to an HTTP status code.
pub fn image_error_to_status_code(error: &ImageError) -> u16 {
    match error {
        ImageError::NotAnImage | ImageError::Empty => 400,
        ImageError::TooLarge { .. } => 413,
        ImageError::Storage(_) => 500,
        ImageError::Remote(_) => 502,
    }
}
