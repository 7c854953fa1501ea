#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{DocumentStore, SimulatedStorage, StorageBackend, StorageResult};
#[cfg(not(feature = "storage-local"))]
use crate::StorageError;
use alumnet_core::PortalConfig;
use std::sync::Arc;

/// Create a document store based on configuration.
///
/// When no backend is configured the simulated store is used, so uploads keep
/// working without any remote storage.
pub async fn create_storage(config: &PortalConfig) -> StorageResult<Arc<dyn DocumentStore>> {
    match config.storage_backend() {
        None | Some(StorageBackend::Simulated) => {
            tracing::info!(
                latency_ms = config.simulated_latency().as_millis() as u64,
                "No remote document store configured, using simulated storage"
            );
            Ok(Arc::new(SimulatedStorage::new(config.simulated_latency())))
        }

        #[cfg(feature = "storage-local")]
        Some(StorageBackend::Local) => {
            let base_path = config.local_storage_path().ok_or_else(|| {
                crate::StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let storage = LocalStorage::new(base_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        Some(StorageBackend::Local) => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_defaults_to_simulated() {
        let storage = create_storage(&PortalConfig::default()).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Simulated);
    }

    #[tokio::test]
    async fn test_creates_local_backend() {
        let dir = tempdir().unwrap();
        let config = PortalConfig::default()
            .with_storage_backend(StorageBackend::Local)
            .with_local_storage_path(dir.path().to_string_lossy().to_string());
        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }

    #[tokio::test]
    async fn test_local_without_path_fails() {
        let config = PortalConfig::default().with_storage_backend(StorageBackend::Local);
        assert!(create_storage(&config).await.is_err());
    }
}
