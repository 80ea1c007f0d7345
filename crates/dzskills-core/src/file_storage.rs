//! Storage for uploaded files.
//!
//! Course images are written through the [`FileStorage`] trait so the service
//! layer does not care where bytes end up. [`LocalFileStorage`] keeps them on
//! disk under a base directory that the HTTP server also exposes at `/files`.
//!
//! ```ignore
//! let storage = LocalFileStorage::new(PathBuf::from("./uploads"), "http://localhost:3000/files".into());
//! let key = storage.save("courses/abc-1700000000.png", &bytes).await?;
//! let url = storage.get_url(&key)?;
//! storage.delete(&key).await?;
//! ```

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tokio::fs;

pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Upload limit applied by [`LocalFileStorage::new`].
pub const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

pub trait FileStorage: Send + Sync {
    /// Stores `content` under `key` and returns the key.
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String>;

    /// Removes the file stored under `key`. A missing file is not an error.
    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;

    /// Public URL for a stored key.
    fn get_url(&self, key: &str) -> Result<String, StorageError>;
}

#[derive(Debug)]
pub enum StorageError {
    InvalidFileSize { max_bytes: usize },
    IoError(std::io::Error),
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
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

/// Filesystem-backed [`FileStorage`].
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
    base_url: String,
    max_file_size: usize,
}

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self::with_max_size(base_dir, base_url, DEFAULT_MAX_FILE_SIZE)
    }

    pub fn with_max_size(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url,
            max_file_size,
        }
    }

    /// Directory files are written to; served statically by the router.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Keys are relative paths made of `[A-Za-z0-9._/-]` without `..`.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Key must not be empty, contain '..', or start with '/'".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | '.'))
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String> {
        Box::pin(async move {
            Self::validate_key(key)?;

            if content.len() > self.max_file_size {
                return Err(StorageError::InvalidFileSize {
                    max_bytes: self.max_file_size,
                });
            }

            let file_path = self.base_dir.join(key);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&file_path, content).await?;

            tracing::debug!(storage.key = %key, file.size = content.len(), "Stored file");
            Ok(key.to_string())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
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
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage(max: usize) -> (LocalFileStorage, PathBuf) {
        let dir = std::env::temp_dir().join(format!("dzskills-storage-{}", uuid::Uuid::new_v4()));
        (
            LocalFileStorage::with_max_size(dir.clone(), "http://localhost:3000/files".into(), max),
            dir,
        )
    }

    #[test]
    fn test_validate_key() {
        assert!(LocalFileStorage::validate_key("courses/abc-123.png").is_ok());
        assert!(LocalFileStorage::validate_key("courses/image_1.webp").is_ok());
        assert!(LocalFileStorage::validate_key("").is_err());
        assert!(LocalFileStorage::validate_key("../../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("/etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("courses/a b.png").is_err());
    }

    #[test]
    fn test_get_url_trims_trailing_slash() {
        let storage = LocalFileStorage::new(
            PathBuf::from("./uploads"),
            "http://localhost:3000/files/".to_string(),
        );
        assert_eq!(
            storage.get_url("courses/x.png").unwrap(),
            "http://localhost:3000/files/courses/x.png"
        );
    }

    #[tokio::test]
    async fn test_save_then_delete() {
        let (storage, dir) = temp_storage(1024);

        let key = storage.save("courses/a.png", b"png-bytes").await.unwrap();
        assert_eq!(key, "courses/a.png");
        assert_eq!(std::fs::read(dir.join(&key)).unwrap(), b"png-bytes");

        storage.delete(&key).await.unwrap();
        assert!(!dir.join(&key).exists());
        // deleting twice is fine
        storage.delete(&key).await.unwrap();

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_content() {
        let (storage, _dir) = temp_storage(4);
        let err = storage.save("courses/big.png", b"12345").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidFileSize { max_bytes: 4 }));
    }
}
