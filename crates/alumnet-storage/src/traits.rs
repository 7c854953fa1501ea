//! Document store abstraction trait
//!
//! This module defines the `DocumentStore` trait that all storage backends must implement.

use alumnet_core::models::StoredMetadata;
use alumnet_core::AppError;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::StorageBackend;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Metadata insert failed: {0}")]
    MetadataFailed(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid storage path: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    /// Whether retrying the same call may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            StorageError::UploadFailed(_)
            | StorageError::MetadataFailed(_)
            | StorageError::Unavailable(_)
            | StorageError::IoError(_) => true,
            StorageError::InvalidKey(_) | StorageError::ConfigError(_) => false,
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            e if e.is_transient() => AppError::TransientStore(e.to_string()),
            e => AppError::Storage(e.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Document store abstraction trait
///
/// The upload workflow treats `store` followed by `insert_metadata` as one
/// logical attempt; it never calls either outside that pairing.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a blob at `path` and return the path it was stored under
    async fn store(&self, path: &str, data: Bytes, content_type: &str) -> StorageResult<String>;

    /// Record metadata for a stored blob and return the backend's identifier for it
    async fn insert_metadata(&self, metadata: &StoredMetadata) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(StorageError::Unavailable("timeout".into()).is_transient());
        assert!(StorageError::MetadataFailed("conflict".into()).is_transient());
        assert!(!StorageError::InvalidKey("../x".into()).is_transient());
        assert!(!StorageError::ConfigError("missing".into()).is_transient());
    }

    #[test]
    fn test_conversion_to_app_error() {
        let err: AppError = StorageError::UploadFailed("reset".into()).into();
        assert!(matches!(err, AppError::TransientStore(_)));

        let err: AppError = StorageError::InvalidKey("/etc".into()).into();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
