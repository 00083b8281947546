use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use folio_core::images::{
    extension_for, validate_upload, ImageError, ImageRef, ImageStore, ImageStoreKind,
    ImageUpload, Result, UPLOADS_PREFIX,
};
use uuid::Uuid;

/// Writes images under an upload directory served at `/uploads/`.
pub struct DiskImageStore {
    root: PathBuf,
    max_bytes: usize,
}

impl DiskImageStore {
    pub fn new(root: PathBuf, max_bytes: usize) -> Self {
        Self { root, max_bytes }
    }
}

/// Maps a path below `/uploads/` to a file under `root`.
///
/// Returns `None` for anything that could escape `root`: parent components,
/// absolute paths, backslashes or empty paths.
pub fn resolve_upload_path(root: &Path, relative: &str) -> Option<PathBuf> {
    if relative.is_empty() || relative.contains('\\') || relative.contains('\0') {
        return None;
    }

    let relative = Path::new(relative);
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }

    Some(root.join(relative))
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<String> {
        validate_upload(&upload, self.max_bytes)?;

        let filename = format!("{}.{}", Uuid::new_v4(), extension_for(&upload));
        let path = self.root.join(&filename);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ImageError::Storage(format!("create {}: {e}", self.root.display())))?;
        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| ImageError::Storage(format!("write {}: {e}", path.display())))?;

        tracing::debug!(path = %path.display(), bytes = upload.len(), "stored image on disk");
        Ok(format!("{UPLOADS_PREFIX}{filename}"))
    }

    async fn discard(&self, reference: &str) -> Result<()> {
        let ImageRef::Stored(relative) = ImageRef::classify(reference) else {
            return Ok(());
        };
        let Some(path) = resolve_upload_path(&self.root, relative) else {
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "discarded image");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ImageError::Storage(format!(
                "remove {}: {e}",
                path.display()
            ))),
        }
    }

    fn kind(&self) -> ImageStoreKind {
        ImageStoreKind::Disk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rejects_escapes() {
        let root = Path::new("/srv/uploads");

        assert_eq!(
            resolve_upload_path(root, "abc.png"),
            Some(PathBuf::from("/srv/uploads/abc.png"))
        );
        assert_eq!(
            resolve_upload_path(root, "nested/abc.png"),
            Some(PathBuf::from("/srv/uploads/nested/abc.png"))
        );
        assert_eq!(resolve_upload_path(root, "../etc/passwd"), None);
        assert_eq!(resolve_upload_path(root, "a/../../b"), None);
        assert_eq!(resolve_upload_path(root, "/etc/passwd"), None);
        assert_eq!(resolve_upload_path(root, "..\\secret"), None);
        assert_eq!(resolve_upload_path(root, ""), None);
    }

    #[tokio::test]
    async fn store_then_discard() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskImageStore::new(dir.path().join("uploads"), 1024);
        let upload = ImageUpload::new(Some("cat.jpeg".into()), "image/jpeg", vec![0xFF, 0xD8]);

        let reference = store.store(upload).await.unwrap();

        assert!(reference.starts_with("/uploads/"));
        assert!(reference.ends_with(".jpg"));
        let name = reference.trim_start_matches("/uploads/");
        let path = dir.path().join("uploads").join(name);
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xFF, 0xD8]);

        store.discard(&reference).await.unwrap();
        assert!(!path.exists());

        // Discarding twice is fine.
        store.discard(&reference).await.unwrap();
    }

    #[tokio::test]
    async fn discard_ignores_foreign_references() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("keep.png");
        std::fs::write(&outside, b"x").unwrap();
        let store = DiskImageStore::new(dir.path().join("uploads"), 1024);

        store
            .discard("https://example.com/keep.png")
            .await
            .unwrap();
        store.discard("/uploads/../keep.png").await.unwrap();

        assert!(outside.exists());
    }

    #[tokio::test]
    async fn store_rejects_oversized_upload() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskImageStore::new(dir.path().to_path_buf(), 4);
        let upload = ImageUpload::new(None, "image/png", vec![0; 5]);

        assert!(matches!(
            store.store(upload).await,
            Err(ImageError::TooLarge { size: 5, limit: 4 })
        ));
    }
}
