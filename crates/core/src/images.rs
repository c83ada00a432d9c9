//! Local file store for product images.
//!
//! Images live directly under a public root directory and are addressed by
//! bare filename (the value kept in `url_imagen`).

use std::path::{Path, PathBuf};

/// Errors raised by [`ImageStore`].
#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("Invalid image filename '{0}'")]
    InvalidName(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `filename` under the root.
    ///
    /// Only single path components are accepted; separators, `.` and `..`
    /// are rejected so a stored name can never escape the root.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf, ImageStoreError> {
        let invalid = filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains(['/', '\\', '\0']);
        if invalid {
            return Err(ImageStoreError::InvalidName(filename.to_string()));
        }
        Ok(self.root.join(filename))
    }

    /// Create the root directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), ImageStoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| ImageStoreError::Io {
                path: self.root.clone(),
                source,
            })
    }

    /// Write `data` as `filename`, replacing any existing file.
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<(), ImageStoreError> {
        let path = self.path_for(filename)?;
        self.ensure_root().await?;
        tokio::fs::write(&path, data)
            .await
            .map_err(|source| ImageStoreError::Io { path, source })
    }

    /// Remove `filename`. A missing file is an error.
    pub async fn remove(&self, filename: &str) -> Result<(), ImageStoreError> {
        let path = self.path_for(filename)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|source| ImageStoreError::Io { path, source })
    }

    /// Best-effort removal of a file that is no longer wanted, such as an
    /// upload whose request failed. Failures are logged and swallowed.
    pub async fn discard(&self, filename: &str) {
        if let Err(err) = self.remove(filename).await {
            tracing::warn!(filename, error = %err, "Failed to discard image");
        }
    }

    pub async fn exists(&self, filename: &str) -> bool {
        match self.path_for(filename) {
            Ok(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn path_for_rejects_traversal() {
        let store = ImageStore::new("/srv/public");
        assert_matches!(store.path_for("../etc/passwd"), Err(ImageStoreError::InvalidName(_)));
        assert_matches!(store.path_for("a/b.png"), Err(ImageStoreError::InvalidName(_)));
        assert_matches!(store.path_for(".."), Err(ImageStoreError::InvalidName(_)));
        assert_matches!(store.path_for(""), Err(ImageStoreError::InvalidName(_)));
        assert_eq!(
            store.path_for("foto.png").unwrap(),
            PathBuf::from("/srv/public/foto.png")
        );
    }

    #[tokio::test]
    async fn save_creates_root_and_remove_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("public"));

        store.save("a.png", b"data").await.unwrap();
        assert!(store.exists("a.png").await);

        store.remove("a.png").await.unwrap();
        assert!(!store.exists("a.png").await);
    }

    #[tokio::test]
    async fn remove_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        assert_matches!(store.remove("nope.png").await, Err(ImageStoreError::Io { .. }));
    }

    #[tokio::test]
    async fn discard_swallows_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        store.discard("nope.png").await;
        store.discard("../escape.png").await;
    }
}
