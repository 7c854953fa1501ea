//! Simulated document store
//!
//! Used when no remote store is configured. Every call succeeds after a fixed
//! latency and keeps blobs in memory, so callers see the same success contract
//! (a stored path and a metadata identifier) as with a real backend.

use std::collections::HashMap;
use std::time::Duration;

use alumnet_core::models::StoredMetadata;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::traits::{DocumentStore, StorageError, StorageResult};
use crate::StorageBackend;

pub struct SimulatedStorage {
    latency: Duration,
    blobs: RwLock<HashMap<String, Bytes>>,
}

impl SimulatedStorage {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            blobs: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DocumentStore for SimulatedStorage {
    async fn store(&self, path: &str, data: Bytes, _content_type: &str) -> StorageResult<String> {
        if path.contains("..") || path.starts_with('/') {
            return Err(StorageError::InvalidKey(path.to_string()));
        }

        tokio::time::sleep(self.latency).await;

        let size = data.len();
        self.blobs.write().await.insert(path.to_string(), data);

        tracing::info!(
            key = %path,
            size_bytes = size,
            latency_ms = self.latency.as_millis() as u64,
            "Simulated storage upload successful"
        );

        Ok(path.to_string())
    }

    async fn insert_metadata(&self, metadata: &StoredMetadata) -> StorageResult<String> {
        let remote_id = Uuid::new_v4().to_string();
        tracing::debug!(
            record_id = %metadata.record_id,
            remote_id = %remote_id,
            "Simulated storage metadata recorded"
        );
        Ok(remote_id)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Simulated
    }
}
