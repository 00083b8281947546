//! Image references and the storage abstraction behind uploads.
//!
//! A project's `image_url` and `screenshots` hold image references in one of
//! three encodings (see [`ImageRef`]). Uploads are validated here and handed
//! to an [`ImageStore`] implementation chosen at startup.

mod classify;
mod data_url;
mod error;
mod traits;
mod types;
mod validation;

pub use classify::{removed_refs, ImageRef, UPLOADS_PREFIX};
pub use data_url::encode_data_url;
pub use error::{image_error_to_status_code, ImageError};
pub use traits::{ImageStore, Result};
pub use types::{ImageStoreKind, ImageUpload};
pub use validation::{
    extension_for, is_image_content_type, validate_upload, DEFAULT_MAX_UPLOAD_BYTES,
};
