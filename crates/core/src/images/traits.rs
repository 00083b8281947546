use async_trait::async_trait;

use super::{ImageError, ImageStoreKind, ImageUpload};

/// Result type for image store operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Backend that turns uploaded images into references stored on projects.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Validates and stores an upload, returning its image reference.
    async fn store(&self, upload: ImageUpload) -> Result<String>;

    /// Removes the image behind `reference` if this store owns it.
    ///
    /// References owned by other backends are ignored.
    async fn discard(&self, reference: &str) -> Result<()>;

    /// Which backend this is.
    fn kind(&self) -> ImageStoreKind;
}
