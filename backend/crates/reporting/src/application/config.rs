//! Application Configuration
//!
//! Configuration for the reporting application layer.

use std::path::PathBuf;

/// Reporting application configuration
#[derive(Debug, Clone)]
pub struct ReportingConfig {
    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,
    /// URL prefix the upload directory is served under
    pub public_url_prefix: String,
    /// Request body limit for incident uploads
    pub max_upload_bytes: usize,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("./uploads"),
            public_url_prefix: "/uploads".to_string(),
            max_upload_bytes: 10 * 1024 * 1024, // 10 MiB
        }
    }
}

impl ReportingConfig {
    /// Create config for development, writing uploads under `upload_dir`
    pub fn development(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            ..Default::default()
        }
    }
}
