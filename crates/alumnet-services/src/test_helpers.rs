//! Test helpers for workflow unit tests
//!
//! Provides a scripted document store and record fixtures so workflows can be
//! exercised without a filesystem.

use std::sync::Mutex;

use alumnet_core::models::{DocumentRecord, DocumentStatus, StoredMetadata};
use alumnet_storage::{DocumentStore, StorageBackend, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::time::Instant;
use uuid::Uuid;

use crate::upload::UploadFile;

/// Document store that fails a scripted number of times before succeeding
pub struct FlakyStore {
    store_failures: Mutex<u32>,
    metadata_failures: Mutex<u32>,
    permanent_error: bool,
    store_calls: Mutex<Vec<Instant>>,
    metadata_calls: Mutex<u32>,
}

impl FlakyStore {
    /// Fail the first `failures` blob stores with a transient error
    pub fn failing(failures: u32) -> Self {
        Self {
            store_failures: Mutex::new(failures),
            metadata_failures: Mutex::new(0),
            permanent_error: false,
            store_calls: Mutex::new(Vec::new()),
            metadata_calls: Mutex::new(0),
        }
    }

    /// Store blobs fine but fail the first `failures` metadata inserts
    pub fn failing_metadata(failures: u32) -> Self {
        let store = Self::failing(0);
        *store.metadata_failures.lock().unwrap() = failures;
        store
    }

    /// Fail every blob store with a non-retryable error
    pub fn misconfigured() -> Self {
        Self {
            permanent_error: true,
            ..Self::failing(0)
        }
    }

    pub fn store_calls(&self) -> usize {
        self.store_calls.lock().unwrap().len()
    }

    pub fn metadata_calls(&self) -> u32 {
        *self.metadata_calls.lock().unwrap()
    }

    /// Instants at which `store` was called
    pub fn call_times(&self) -> Vec<Instant> {
        self.store_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn store(&self, path: &str, _data: Bytes, _content_type: &str) -> StorageResult<String> {
        self.store_calls.lock().unwrap().push(Instant::now());

        if self.permanent_error {
            return Err(StorageError::ConfigError("bucket not configured".to_string()));
        }

        let mut remaining = self.store_failures.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            return Err(StorageError::Unavailable("connection reset".to_string()));
        }
        Ok(path.to_string())
    }

    async fn insert_metadata(&self, metadata: &StoredMetadata) -> StorageResult<String> {
        *self.metadata_calls.lock().unwrap() += 1;

        let mut remaining = self.metadata_failures.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            return Err(StorageError::MetadataFailed("insert timed out".to_string()));
        }
        Ok(format!("remote-{}", metadata.record_id))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Simulated
    }
}

pub fn pending_document(owner: &str, title: &str) -> DocumentRecord {
    DocumentRecord {
        id: Uuid::new_v4(),
        owner: owner.to_string(),
        title: title.to_string(),
        original_filename: "document.pdf".to_string(),
        category: "certificate".to_string(),
        content_type: "application/pdf".to_string(),
        status: DocumentStatus::Pending,
        uploaded_at: Utc::now(),
        file_size: 1024,
        comment: String::new(),
        storage_path: None,
        remote_id: None,
        decided_at: None,
    }
}

pub fn pdf_file(name: &str, size: usize) -> UploadFile {
    let mut data = b"%PDF-1.7\n".to_vec();
    data.resize(size.max(data.len()), b' ');
    data.truncate(size);
    UploadFile::new(name, "application/pdf", data)
}
