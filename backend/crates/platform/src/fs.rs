//! Filesystem Helpers

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

/// Write `bytes` to `dir/file_name` without exposing a partial file
///
/// Creates `dir` if missing, writes to a hidden `.{file_name}.part`
/// sibling, flushes it to disk and renames it into place. On failure the
/// temporary file is removed (best effort) and the error returned.
pub async fn write_atomic(dir: &Path, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let final_path = dir.join(file_name);
    let temp_path = dir.join(format!(".{file_name}.part"));

    if let Err(e) = write_and_sync(&temp_path, bytes).await {
        remove_quietly(&temp_path).await;
        return Err(e);
    }

    if let Err(e) = tokio::fs::rename(&temp_path, &final_path).await {
        remove_quietly(&temp_path).await;
        return Err(e);
    }

    Ok(final_path)
}

async fn write_and_sync(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove temporary file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_atomic_creates_directory_and_file() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("uploads");

        let path = write_atomic(&dir, "a.jpg", b"jpeg-bytes").await.unwrap();

        assert_eq!(path, dir.join("a.jpg"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"jpeg-bytes");
        assert!(!dir.join(".a.jpg.part").exists());
    }

    #[tokio::test]
    async fn test_write_atomic_fails_when_dir_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("uploads");
        tokio::fs::write(&blocker, b"not a directory").await.unwrap();

        let result = write_atomic(&blocker, "a.jpg", b"x").await;
        assert!(result.is_err());
    }
}
