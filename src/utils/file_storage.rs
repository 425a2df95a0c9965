//! File storage abstraction for course uploads.
//!
//! Trait-based so the storage backend (local disk, S3, MinIO) can be swapped
//! without touching the upload bookkeeping logic.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tokio::fs;

/// Abstract trait for file storage backends.
pub trait FileStorage: Send + Sync {
    /// Save file content under a storage key (e.g. `courses/7/abc.pdf`) and
    /// return the key actually used.
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<String, StorageError>> + Send + 'a>>;

    /// Delete a file by key. Deleting a missing file is not an error.
    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>>;

    /// Public URL for accessing a stored file.
    fn get_url(&self, key: &str) -> Result<String, StorageError>;
}

/// Error type for storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Content exceeds the configured maximum size.
    FileTooLarge { max_bytes: usize },
    /// I/O failure while writing or deleting.
    IoError(std::io::Error),
    /// Storage key escaped the base directory or was otherwise unusable.
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileTooLarge { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Local filesystem storage, serving files from a base URL.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
    base_url: String,
    max_file_size: usize,
}

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_file_size,
        }
    }

    /// Rejects keys that could resolve outside the base directory.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("empty key".to_string()));
        }
        if key.starts_with('/') || key.contains("..") || key.contains('\\') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<String, StorageError>> + Send + 'a>> {
        Box::pin(async move {
            Self::validate_key(key)?;

            if content.len() > self.max_file_size {
                return Err(StorageError::FileTooLarge {
                    max_bytes: self.max_file_size,
                });
            }

            let path = self.base_dir.join(key);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&path, content).await?;

            Ok(key.to_string())
        })
    }

    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
        Box::pin(async move {
            Self::validate_key(key)?;

            match fs::remove_file(self.base_dir.join(key)).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        Self::validate_key(key)?;
        Ok(format!("{}/{}", self.base_url, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> LocalFileStorage {
        LocalFileStorage::new(
            std::env::temp_dir().join("campusdesk-storage-tests"),
            "http://localhost:3000/files/".to_string(),
            1024,
        )
    }

    #[tokio::test]
    async fn test_save_and_delete() {
        let storage = storage();
        let key = format!("courses/1/{}.txt", uuid::Uuid::new_v4());

        let saved = storage.save(&key, b"hello").await.unwrap();
        assert_eq!(saved, key);

        storage.delete(&key).await.unwrap();
        // Second delete is a no-op.
        storage.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_content() {
        let storage = storage();
        let content = vec![0u8; 2048];
        match storage.save("courses/1/big.bin", &content).await {
            Err(StorageError::FileTooLarge { max_bytes: 1024 }) => {}
            other => panic!("expected FileTooLarge, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_traversal_keys_rejected() {
        let storage = storage();
        for key in ["../etc/passwd", "/abs/path", "a\\b", ""] {
            assert!(matches!(
                storage.save(key, b"x").await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_get_url_joins_without_double_slash() {
        let storage = storage();
        let url = storage.get_url("courses/1/file.pdf").unwrap();
        assert_eq!(url, "http://localhost:3000/files/courses/1/file.pdf");
    }
}
