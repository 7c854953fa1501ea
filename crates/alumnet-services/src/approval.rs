//! Document approval workflow
//!
//! Admin-only transition of a pending document to approved or rejected. Every
//! successful decision sends exactly one notification to the document owner.

use std::sync::Arc;

use alumnet_core::models::{Decision, DocumentRecord, DocumentStatus};
use alumnet_core::{AppError, NotificationSink};
use serde::Serialize;
use uuid::Uuid;

use crate::documents::DocumentRepository;
use crate::session::Session;

/// Outcome of a bulk approval. Each record is decided independently.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkDecision {
    pub decided: Vec<Uuid>,
    pub failed: Vec<BulkFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkFailure {
    pub id: Uuid,
    pub error: String,
}

pub struct ApprovalWorkflow {
    repository: Arc<DocumentRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl ApprovalWorkflow {
    pub fn new(
        repository: Arc<DocumentRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    /// Decide a pending document.
    ///
    /// Deciding a record that is no longer pending fails with
    /// `InvalidTransition` and sends nothing.
    pub async fn decide(
        &self,
        session: &Session,
        document_id: Uuid,
        decision: Decision,
        comment: &str,
    ) -> Result<DocumentRecord, AppError> {
        session.require_admin()?;

        let record = self
            .repository
            .decide(document_id, decision, comment)
            .await
            .inspect_err(|e| {
                tracing::debug!(document_id = %document_id, error = %e, "Decision refused");
            })?;

        self.notifications
            .notify(session.email(), &record.owner, &notification_text(&record))
            .await;

        tracing::info!(
            document_id = %document_id,
            owner = %record.owner,
            status = %record.status,
            admin = %session.email(),
            "Document decided"
        );

        Ok(record)
    }

    /// Approve every document that is pending when the call starts.
    pub async fn bulk_approve(
        &self,
        session: &Session,
        comment: &str,
    ) -> Result<BulkDecision, AppError> {
        session.require_admin()?;

        let mut outcome = BulkDecision::default();
        for id in self.repository.pending_ids().await {
            match self.decide(session, id, Decision::Approve, comment).await {
                Ok(_) => outcome.decided.push(id),
                Err(e) => outcome.failed.push(BulkFailure {
                    id,
                    error: e.to_string(),
                }),
            }
        }

        tracing::info!(
            decided = outcome.decided.len(),
            failed = outcome.failed.len(),
            "Bulk approval finished"
        );
        Ok(outcome)
    }
}

fn notification_text(record: &DocumentRecord) -> String {
    let verdict = match record.status {
        DocumentStatus::Approved => "approved",
        DocumentStatus::Rejected => "rejected",
        DocumentStatus::Pending => "updated",
    };
    format!(
        "Your document \"{}\" has been {}. Comment: {}",
        record.title, verdict, record.comment
    )
}
