use super::{ImageError, ImageUpload};

/// Default upload size limit: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Checks that an upload is a non-empty image within the size limit.
pub fn validate_upload(upload: &ImageUpload, max_bytes: usize) -> Result<(), ImageError> {
    if !is_image_content_type(&upload.content_type) {
        return Err(ImageError::NotAnImage);
    }
    if upload.is_empty() {
        return Err(ImageError::Empty);
    }
    if upload.len() > max_bytes {
        return Err(ImageError::TooLarge {
            size: upload.len(),
            limit: max_bytes,
        });
    }
    Ok(())
}

pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

/// Picks a file extension for a stored upload.
///
/// The content type wins; the original filename is the fallback; `bin` is
/// the last resort.
pub fn extension_for(upload: &ImageUpload) -> String {
    let from_type = match upload.content_type.trim().to_ascii_lowercase().as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        "image/avif" => Some("avif"),
        "image/bmp" => Some("bmp"),
        "image/x-icon" | "image/vnd.microsoft.icon" => Some("ico"),
        "image/tiff" => Some("tiff"),
        _ => None,
    };
    if let Some(ext) = from_type {
        return ext.to_string();
    }

    upload
        .filename
        .as_deref()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string())
}
