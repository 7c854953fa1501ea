//! Document upload workflow
//!
//! An upload moves through `Idle -> Attempting -> {Success, Attempting, Exhausted}`.
//! Each attempt stores the blob and then inserts its metadata; a failure of
//! either fails the attempt. Transient failures are retried with a linear
//! backoff (`retry_delay * attempt`) until `max_retries` attempts have been made.
//! The repository only sees a new record once an attempt fully succeeds.

use std::sync::Arc;
use std::time::Duration;

use alumnet_core::models::{DocumentRecord, DocumentStatus, StoredMetadata, UploadReceipt};
use alumnet_core::validation::ValidationError;
use alumnet_core::{AppError, DocumentValidator, PortalConfig};
use alumnet_storage::{generate_document_path, DocumentStore, StorageError};
use bytes::Bytes;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::documents::DocumentRepository;
use crate::identity::IdentityStore;

/// Bounded retry with linear backoff
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &PortalConfig) -> Self {
        Self {
            max_retries: config.upload_max_retries(),
            retry_delay: config.upload_retry_delay(),
        }
    }

    /// Wait before the attempt following failed attempt number `attempt` (1-based)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(attempt)
    }
}

/// A file submitted for upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file: UploadFile,
    pub owner: String,
    pub category: String,
    pub title: String,
}

pub struct UploadWorkflow {
    store: Arc<dyn DocumentStore>,
    repository: Arc<DocumentRepository>,
    identities: Arc<dyn IdentityStore>,
    validator: DocumentValidator,
    policy: RetryPolicy,
}

impl UploadWorkflow {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        repository: Arc<DocumentRepository>,
        identities: Arc<dyn IdentityStore>,
        validator: DocumentValidator,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            store,
            repository,
            identities,
            validator,
            policy,
        }
    }

    /// Upload a document and record it as pending.
    ///
    /// Validation failures return before the store is touched. The token is
    /// checked before every attempt and during every backoff wait.
    pub async fn upload(
        &self,
        request: UploadRequest,
        cancel: &CancellationToken,
    ) -> Result<UploadReceipt, AppError> {
        self.validate(&request)?;

        let uploaded_at = Utc::now();
        let record_id = self.repository.fresh_id().await;
        let path = generate_document_path(&request.owner, &request.file.filename, uploaded_at);
        let metadata = StoredMetadata {
            record_id,
            owner: request.owner.clone(),
            title: request.title.trim().to_string(),
            category: request.category.trim().to_string(),
            original_filename: request.file.filename.clone(),
            content_type: request.file.content_type.to_lowercase(),
            file_size: request.file.size() as u64,
            storage_path: path.clone(),
            uploaded_at,
        };

        let mut attempt: u32 = 0;
        let (stored_path, remote_id) = loop {
            if cancel.is_cancelled() {
                return Err(self.cancelled(&metadata, attempt));
            }
            attempt += 1;

            match self.attempt(&request.file, &metadata).await {
                Ok(result) => break result,
                Err(e) if !e.is_transient() => {
                    tracing::error!(
                        record_id = %record_id,
                        attempt,
                        error = %e,
                        "Document upload failed with a non-retryable error"
                    );
                    return Err(e.into());
                }
                Err(e) if attempt >= self.policy.max_retries => {
                    tracing::warn!(
                        record_id = %record_id,
                        owner = %metadata.owner,
                        attempts = attempt,
                        error = %e,
                        "Document upload exhausted its retries"
                    );
                    return Err(AppError::UploadExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
                Err(e) => {
                    let delay = self.policy.delay_for_attempt(attempt);
                    tracing::warn!(
                        record_id = %record_id,
                        attempt,
                        max_retries = self.policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Document upload attempt failed, retrying"
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => return Err(self.cancelled(&metadata, attempt)),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        };

        let record = DocumentRecord {
            id: record_id,
            owner: metadata.owner,
            title: metadata.title,
            original_filename: metadata.original_filename,
            category: metadata.category,
            content_type: metadata.content_type,
            status: DocumentStatus::Pending,
            uploaded_at,
            file_size: metadata.file_size,
            comment: String::new(),
            storage_path: Some(stored_path.clone()),
            remote_id: Some(remote_id),
            decided_at: None,
        };
        self.repository.append(record).await?;

        tracing::info!(
            record_id = %record_id,
            path = %stored_path,
            attempts = attempt,
            backend = %self.store.backend_type(),
            "Document uploaded"
        );

        Ok(UploadReceipt {
            path: stored_path,
            record_id,
        })
    }

    fn validate(&self, request: &UploadRequest) -> Result<(), AppError> {
        if request.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title").into());
        }
        if request.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category").into());
        }

        if let Err(e) = self.validator.validate_all(
            &request.file.filename,
            &request.file.content_type,
            request.file.size(),
        ) {
            tracing::debug!(
                filename = %request.file.filename,
                size_bytes = request.file.size(),
                error = %e,
                "Upload rejected by validation"
            );
            return Err(e.into());
        }

        if self.identities.lookup(&request.owner).is_none() {
            return Err(AppError::NotFound(format!(
                "Identity {} not found",
                request.owner
            )));
        }
        Ok(())
    }

    /// One store + metadata attempt. A metadata failure leaves the stored blob in
    /// place; it is not rolled back.
    async fn attempt(
        &self,
        file: &UploadFile,
        metadata: &StoredMetadata,
    ) -> Result<(String, String), StorageError> {
        let stored_path = self
            .store
            .store(&metadata.storage_path, file.data.clone(), &metadata.content_type)
            .await?;

        match self.store.insert_metadata(metadata).await {
            Ok(remote_id) => Ok((stored_path, remote_id)),
            Err(e) => {
                tracing::warn!(
                    record_id = %metadata.record_id,
                    path = %stored_path,
                    error = %e,
                    "Metadata insert failed after blob was stored; blob left for reconciliation"
                );
                Err(e)
            }
        }
    }

    fn cancelled(&self, metadata: &StoredMetadata, attempts: u32) -> AppError {
        tracing::info!(
            record_id = %metadata.record_id,
            attempts,
            "Document upload cancelled"
        );
        AppError::Cancelled(format!(
            "Upload of {} cancelled after {} attempts",
            metadata.original_filename, attempts
        ))
    }
}
