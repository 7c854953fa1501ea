//! Document repository
//!
//! Ordered, append-only collection of document records. Records are appended by
//! the upload workflow and decided by the approval workflow; nothing else
//! mutates them and nothing deletes them.

use alumnet_core::models::{Decision, DocumentRecord, DocumentStatus};
use alumnet_core::AppError;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct DocumentRepository {
    records: RwLock<Vec<DocumentRecord>>,
}

impl DocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<DocumentRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Append a record, refusing an identifier that is already taken
    pub async fn append(&self, record: DocumentRecord) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(AppError::Internal(format!(
                "Document id {} already exists",
                record.id
            )));
        }
        records.push(record);
        Ok(())
    }

    /// Generate an identifier not used by any current record
    pub async fn fresh_id(&self) -> Uuid {
        let records = self.records.read().await;
        loop {
            let id = Uuid::new_v4();
            if !records.iter().any(|r| r.id == id) {
                return id;
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<DocumentRecord> {
        self.records.read().await.iter().find(|r| r.id == id).cloned()
    }

    pub async fn list(&self) -> Vec<DocumentRecord> {
        self.records.read().await.clone()
    }

    pub async fn by_owner(&self, owner: &str) -> Vec<DocumentRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect()
    }

    pub async fn pending_ids(&self) -> Vec<Uuid> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.is_pending())
            .map(|r| r.id)
            .collect()
    }

    pub async fn count_by_status(&self, status: DocumentStatus) -> usize {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.status == status)
            .count()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Apply a decision to one record under the write lock, so two concurrent
    /// deciders cannot both see it as pending.
    pub async fn decide(
        &self,
        id: Uuid,
        decision: Decision,
        comment: &str,
    ) -> Result<DocumentRecord, AppError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))?;

        record.apply_decision(decision, comment, Utc::now())?;
        Ok(record.clone())
    }
}
