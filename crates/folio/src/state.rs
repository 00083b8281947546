//! Application state shared by every handler.

use std::sync::Arc;

use folio_auth::AuthState;
use folio_core::images::{ImageRef, ImageStore};
use folio_core::storage::ProjectRepository;

use crate::config::Config;

/// Shared state: storage, the image backend, auth and configuration.
#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<dyn ProjectRepository>,
    pub images: Arc<dyn ImageStore>,
    pub auth: AuthState,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        images: Arc<dyn ImageStore>,
        auth: AuthState,
        config: Config,
    ) -> Self {
        Self {
            projects,
            images,
            auth,
            config: Arc::new(config),
        }
    }

    /// Discards image references that no stored project uses any more.
    ///
    /// Call after the record change is committed. References another project
    /// still points at are kept. Failures are logged and otherwise ignored.
    pub async fn discard_images(&self, references: Vec<String>) {
        for reference in references {
            if ImageRef::classify(&reference).is_inline() {
                continue;
            }

            match self.projects.image_ref_in_use(&reference).await {
                Ok(false) => {}
                Ok(true) => {
                    tracing::debug!(reference = %truncate(&reference), "image still referenced, keeping it");
                    continue;
                }
                Err(error) => {
                    tracing::warn!(%error, reference = %truncate(&reference), "could not check image usage, keeping it");
                    continue;
                }
            }

            if let Err(error) = self.images.discard(&reference).await {
                tracing::warn!(%error, reference = %truncate(&reference), "failed to discard image");
            }
        }
    }
}

impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}

// Data URLs can be megabytes long.
fn truncate(reference: &str) -> &str {
    match reference.char_indices().nth(80) {
        Some((idx, _)) => &reference[..idx],
        None => reference,
    }
}
