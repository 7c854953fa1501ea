use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_APPROVE_COMMENT, DEFAULT_REJECT_COMMENT};
use crate::error::AppError;

/// Review status of a submitted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
}

impl Display for DocumentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentStatus::Pending => write!(f, "pending"),
            DocumentStatus::Approved => write!(f, "approved"),
            DocumentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Admin decision on a pending document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target_status(self) -> DocumentStatus {
        match self {
            Decision::Approve => DocumentStatus::Approved,
            Decision::Reject => DocumentStatus::Rejected,
        }
    }

    pub fn default_comment(self) -> &'static str {
        match self {
            Decision::Approve => DEFAULT_APPROVE_COMMENT,
            Decision::Reject => DEFAULT_REJECT_COMMENT,
        }
    }
}

impl FromStr for Decision {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" | "approved" => Ok(Decision::Approve),
            "reject" | "rejected" => Ok(Decision::Reject),
            _ => Err(anyhow::anyhow!("Invalid decision: {}", s)),
        }
    }
}

/// A submitted document and its review state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub owner: String,
    pub title: String,
    pub original_filename: String,
    pub category: String,
    pub content_type: String,
    pub status: DocumentStatus,
    pub uploaded_at: DateTime<Utc>,
    pub file_size: u64,
    pub comment: String,
    pub storage_path: Option<String>,
    pub remote_id: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl DocumentRecord {
    pub fn is_pending(&self) -> bool {
        self.status == DocumentStatus::Pending
    }

    /// Apply a decision. Only `Pending` records can be decided, and only once.
    ///
    /// An empty or whitespace-only comment is replaced by the decision's default.
    pub fn apply_decision(
        &mut self,
        decision: Decision,
        comment: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if !self.is_pending() {
            return Err(AppError::InvalidTransition {
                id: self.id,
                from: self.status.to_string(),
            });
        }

        let comment = comment.trim();
        self.status = decision.target_status();
        self.comment = if comment.is_empty() {
            decision.default_comment().to_string()
        } else {
            comment.to_string()
        };
        self.decided_at = Some(at);
        Ok(())
    }
}

/// Metadata handed to the document store alongside the blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMetadata {
    pub record_id: Uuid,
    pub owner: String,
    pub title: String,
    pub category: String,
    pub original_filename: String,
    pub content_type: String,
    pub file_size: u64,
    pub storage_path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub path: String,
    pub record_id: Uuid,
}

/// Read-only view of a document for the view layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub owner: String,
    pub title: String,
    pub filename: String,
    pub category: String,
    pub status: DocumentStatus,
    pub uploaded_at: DateTime<Utc>,
    pub file_size: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<DocumentRecord> for DocumentResponse {
    fn from(doc: DocumentRecord) -> Self {
        DocumentResponse {
            id: doc.id,
            owner: doc.owner,
            title: doc.title,
            filename: doc.original_filename,
            category: doc.category,
            status: doc.status,
            uploaded_at: doc.uploaded_at,
            file_size: doc.file_size,
            comment: doc.comment,
            path: doc.storage_path,
        }
    }
}
