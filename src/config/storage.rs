use std::env;
use std::path::PathBuf;

/// File storage configuration for course uploads.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Directory where uploaded files are written
    pub upload_dir: PathBuf,
    /// Public URL prefix for serving stored files
    pub base_url: String,
    /// Maximum upload size in bytes
    pub max_file_size: usize,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            base_url: env::var("FILES_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/files".to_string()),
            max_file_size: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100 * 1024 * 1024), // 100MB, course videos included
        }
    }
}
