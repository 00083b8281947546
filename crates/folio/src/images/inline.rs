use async_trait::async_trait;
use folio_core::images::{
    encode_data_url, validate_upload, ImageStore, ImageStoreKind, ImageUpload, Result,
};

/// Stores images inside the project record as Base64 `data:` URLs.
pub struct InlineImageStore {
    max_bytes: usize,
}

impl InlineImageStore {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

#[async_trait]
impl ImageStore for InlineImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<String> {
        validate_upload(&upload, self.max_bytes)?;
        Ok(encode_data_url(upload.content_type.trim(), &upload.bytes))
    }

    // Nothing lives outside the record.
    async fn discard(&self, _reference: &str) -> Result<()> {
        Ok(())
    }

    fn kind(&self) -> ImageStoreKind {
        ImageStoreKind::Inline
    }
}

#[cfg(test)]
mod tests {
    use folio_core::images::ImageError;

    use super::*;

    #[tokio::test]
    async fn store_returns_data_url() {
        let store = InlineImageStore::new(1024);
        let upload = ImageUpload::new(Some("a.png".into()), "image/png", b"png-bytes".to_vec());

        let reference = store.store(upload).await.unwrap();

        assert_eq!(reference, encode_data_url("image/png", b"png-bytes"));
    }

    #[tokio::test]
    async fn store_rejects_non_images() {
        let store = InlineImageStore::new(1024);
        let upload = ImageUpload::new(Some("a.txt".into()), "text/plain", b"hi".to_vec());

        assert_eq!(store.store(upload).await, Err(ImageError::NotAnImage));
    }
}
