use std::{env, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use folio_core::images::{ImageStoreKind, DEFAULT_MAX_UPLOAD_BYTES};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "folio.db")
    pub database_path: String,
    /// Where uploaded images go (default: inline)
    pub image_backend: ImageStoreKind,
    /// Directory for the disk image backend (default: "public/uploads")
    pub upload_dir: PathBuf,
    /// Base URL of the remote image service (default: "http://localhost:8090")
    pub image_service_url: String,
    /// Per-file upload limit in bytes (default: 5 MiB)
    pub max_upload_bytes: usize,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_PATH` - SQLite database path, `:memory:` allowed (default: "folio.db")
    /// - `IMAGE_BACKEND` - `inline`, `disk` or `remote` (default: "inline")
    /// - `UPLOAD_DIR` - Disk backend directory (default: "public/uploads")
    /// - `IMAGE_SERVICE_URL` - Remote backend base URL (default: "http://localhost:8090")
    /// - `MAX_UPLOAD_BYTES` - Per-file upload limit (default: 5242880)
    /// - `REQUEST_TIMEOUT_SECS` - Request timeout (default: 10)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let image_backend = match var("IMAGE_BACKEND") {
            Some(v) => v.parse().map_err(anyhow::Error::msg)?,
            None => ImageStoreKind::Inline,
        };

        let image_service_url = var("IMAGE_SERVICE_URL")
            .unwrap_or_else(|| "http://localhost:8090".to_string())
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&image_service_url)
            .with_context(|| format!("IMAGE_SERVICE_URL is not a valid URL: {image_service_url}"))?;

        Ok(Self {
            database_path: var("DATABASE_PATH").unwrap_or_else(|| "folio.db".to_string()),
            image_backend,
            upload_dir: var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/uploads")),
            image_service_url,
            max_upload_bytes: parse_number(var("MAX_UPLOAD_BYTES"), "MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            request_timeout_secs: parse_number(var("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS")?
                .unwrap_or(10),
        })
    }

    /// Get request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Request body limit: room for a main image, a handful of screenshots
    /// and the text fields of the form.
    pub fn body_limit(&self) -> usize {
        self.max_upload_bytes
            .saturating_mul(MAX_FILES_PER_REQUEST)
            .saturating_add(FORM_OVERHEAD_BYTES)
    }
}

const MAX_FILES_PER_REQUEST: usize = 8;
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

fn parse_number<T: std::str::FromStr>(value: Option<String>, name: &str) -> Result<Option<T>> {
    value
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("{name} must be a number, got '{v}'"))
        })
        .transpose()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: ":memory:".to_string(),
            image_backend: ImageStoreKind::Inline,
            upload_dir: PathBuf::from("public/uploads"),
            image_service_url: "http://localhost:8090".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            request_timeout_secs: 10,
        }
    }
}
