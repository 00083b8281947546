//! Image store backends.
//!
//! Each backend implements [`folio_core::images::ImageStore`]. The active one
//! is chosen at startup from `IMAGE_BACKEND`.

mod disk;
mod inline;
mod remote;

use std::sync::Arc;

use folio_core::images::{ImageStore, ImageStoreKind};

use crate::config::Config;

pub use disk::{resolve_upload_path, DiskImageStore};
pub use inline::InlineImageStore;
pub use remote::RemoteImageStore;

/// Builds the image store selected by the configuration.
pub fn from_config(config: &Config) -> anyhow::Result<Arc<dyn ImageStore>> {
    let store: Arc<dyn ImageStore> = match config.image_backend {
        ImageStoreKind::Inline => Arc::new(InlineImageStore::new(config.max_upload_bytes)),
        ImageStoreKind::Disk => Arc::new(DiskImageStore::new(
            config.upload_dir.clone(),
            config.max_upload_bytes,
        )),
        ImageStoreKind::Remote => Arc::new(RemoteImageStore::new(
            &config.image_service_url,
            config.max_upload_bytes,
        )?),
    };

    tracing::info!(backend = %store.kind(), "image store ready");
    Ok(store)
}
