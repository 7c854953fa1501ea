use std::path::{Path, PathBuf};

use alumnet_core::models::StoredMetadata;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::{DocumentStore, StorageError, StorageResult};
use crate::StorageBackend;

const METADATA_SUFFIX: &str = ".meta.json";

/// Local filesystem document store
///
/// Blobs are written under `base_path`; metadata is written as a JSON sidecar
/// next to each blob (`{path}.meta.json`).
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance rooted at `base_path`
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert a storage path to a filesystem path, rejecting anything that
    /// could resolve outside the base directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty() || storage_key.contains("..") || storage_key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage path contains invalid characters".to_string(),
            ));
        }

        let path = self.base_path.join(storage_key);

        let base_canonical = self.base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        if let Ok(canonical) = path.canonicalize() {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage path resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> StorageResult<()> {
        self.ensure_parent_dir(path).await?;

        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for LocalStorage {
    async fn store(&self, path: &str, data: Bytes, _content_type: &str) -> StorageResult<String> {
        let file_path = self.key_to_path(path)?;
        let size = data.len();
        let start = std::time::Instant::now();

        self.write_file(&file_path, &data).await?;

        tracing::info!(
            path = %file_path.display(),
            key = %path,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(path.to_string())
    }

    async fn insert_metadata(&self, metadata: &StoredMetadata) -> StorageResult<String> {
        let sidecar = format!("{}{}", metadata.storage_path, METADATA_SUFFIX);
        let sidecar_path = self.key_to_path(&sidecar)?;

        let body = serde_json::to_vec_pretty(metadata).map_err(|e| {
            StorageError::MetadataFailed(format!("Failed to encode metadata: {}", e))
        })?;

        self.write_file(&sidecar_path, &body).await.map_err(|e| match e {
            StorageError::UploadFailed(msg) => StorageError::MetadataFailed(msg),
            other => other,
        })?;

        tracing::debug!(
            record_id = %metadata.record_id,
            key = %sidecar,
            "Local storage metadata written"
        );

        Ok(metadata.record_id.to_string())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
