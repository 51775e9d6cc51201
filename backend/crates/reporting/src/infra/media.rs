//! Filesystem Media Store

use std::path::PathBuf;

use uuid::Uuid;

use crate::domain::repository::MediaStore;
use crate::error::{ReportError, ReportResult};

/// Writes uploads into a local directory served under `url_prefix`
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    dir: PathBuf,
    url_prefix: String,
}

impl FsMediaStore {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl MediaStore for FsMediaStore {
    async fn store(&self, bytes: &[u8], extension: Option<&str>) -> ReportResult<String> {
        let file_name = match extension {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        let path = platform::fs::write_atomic(&self.dir, &file_name, bytes)
            .await
            .map_err(ReportError::Storage)?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored upload");

        Ok(format!("{}/{file_name}", self.url_prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_keeps_extension_and_returns_url() {
        let root = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(root.path().join("uploads"), "/uploads/");

        let url = store.store(b"jpeg", Some("jpg")).await.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".jpg"));

        let file_name = url.trim_start_matches("/uploads/");
        let stored = tokio::fs::read(store.dir().join(file_name)).await.unwrap();
        assert_eq!(stored, b"jpeg");
    }

    #[tokio::test]
    async fn test_store_names_are_unique() {
        let root = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(root.path(), "/uploads");

        let a = store.store(b"a", None).await.unwrap();
        let b = store.store(b"a", None).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_store_failure_is_storage_error() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("uploads");
        tokio::fs::write(&blocker, b"file").await.unwrap();

        let store = FsMediaStore::new(&blocker, "/uploads");
        let err = store.store(b"x", Some("jpg")).await.unwrap_err();
        assert!(matches!(err, ReportError::Storage(_)));
    }
}
