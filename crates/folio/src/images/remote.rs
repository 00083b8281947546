use std::time::Duration;

use async_trait::async_trait;
use folio_core::images::{
    extension_for, validate_upload, ImageError, ImageStore, ImageStoreKind, ImageUpload, Result,
};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// Delegates storage to an external image service.
///
/// The service accepts `POST /api/images/upload` with a multipart `file`
/// field and answers `{"url": ...}`. Images are removed with
/// `DELETE /api/images/{id}`, where the id is the last path segment of the
/// returned URL.
pub struct RemoteImageStore {
    client: reqwest::Client,
    base_url: String,
    max_bytes: usize,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: String,
}

impl RemoteImageStore {
    pub fn new(base_url: &str, max_bytes: usize) -> anyhow::Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_bytes,
        })
    }

    /// Returns the service-side id for a reference this service issued.
    fn image_id<'a>(&self, reference: &'a str) -> Option<&'a str> {
        let rest = reference.strip_prefix(&self.base_url)?;
        if !rest.starts_with('/') {
            return None;
        }
        rest.rsplit('/').next().filter(|id| !id.is_empty())
    }
}

/// Turns a non-success response into an [`ImageError::Remote`].
async fn service_error(response: reqwest::Response) -> ImageError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServiceError>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    ImageError::Remote(format!("{status}: {message}"))
}

#[async_trait]
impl ImageStore for RemoteImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<String> {
        validate_upload(&upload, self.max_bytes)?;

        let filename = upload
            .filename
            .clone()
            .unwrap_or_else(|| format!("upload.{}", extension_for(&upload)));
        let part = Part::bytes(upload.bytes)
            .file_name(filename)
            .mime_str(upload.content_type.trim())
            .map_err(|_| ImageError::NotAnImage)?;
        let form = Form::new().part("file", part);

        let url = format!("{}/api/images/upload", self.base_url);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ImageError::Remote(format!("request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ImageError::Remote(format!("unexpected upload response: {e}")))?;

        tracing::debug!(url = %body.url, "stored image on image service");
        Ok(body.url)
    }

    async fn discard(&self, reference: &str) -> Result<()> {
        let Some(id) = self.image_id(reference) else {
            return Ok(());
        };

        let url = format!("{}/api/images/{}", self.base_url, urlencoding::encode(id));
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ImageError::Remote(format!("request to {url} failed: {e}")))?;

        if response.status().is_success() || response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        Err(service_error(response).await)
    }

    fn kind(&self) -> ImageStoreKind {
        ImageStoreKind::Remote
    }
}
