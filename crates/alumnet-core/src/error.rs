//! Error types module
//!
//! All workflow failures are unified under the `AppError` enum. Each variant
//! describes itself through `ErrorMetadata` so a view layer can render a message
//! without matching on variants.
//!
//! Validation failures are raised before any work begins, transient store
//! failures are retried internally by the upload workflow, and everything else
//! propagates to the caller. None of them is fatal to the process.

use std::io;

use uuid::Uuid;

use crate::validation::ValidationError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like exhausted retries
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error presentation - lets errors self-describe how they should
/// be surfaced to a user.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "UPLOAD_EXHAUSTED")
    fn error_code(&self) -> &'static str;

    /// Whether the user can re-trigger the action and expect it to work
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transient store error: {0}")]
    TransientStore(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Upload failed after {attempts} attempts: {last_error}")]
    UploadExhausted { attempts: u32, last_error: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid transition for {id}: record is already {from}")]
    InvalidTransition { id: Uuid, from: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Capacity reached for {id}: {capacity} of {capacity} places taken")]
    CapacityReached { id: Uuid, capacity: u32 },

    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AppError::Validation(_) => (
            "VALIDATION_ERROR",
            false,
            Some("Check the submitted fields and file, then try again"),
            LogLevel::Debug,
        ),
        AppError::TransientStore(_) => (
            "TRANSIENT_STORE_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Warn,
        ),
        AppError::Storage(_) => (
            "STORAGE_ERROR",
            false,
            Some("Contact the portal administrator"),
            LogLevel::Error,
        ),
        AppError::UploadExhausted { .. } => (
            "UPLOAD_EXHAUSTED",
            true,
            Some("Upload the document again"),
            LogLevel::Warn,
        ),
        AppError::NotFound(_) => (
            "NOT_FOUND",
            false,
            Some("Verify the record exists"),
            LogLevel::Debug,
        ),
        AppError::InvalidTransition { .. } => (
            "INVALID_TRANSITION",
            false,
            Some("Refresh to see the current status"),
            LogLevel::Debug,
        ),
        AppError::Auth(_) => (
            "INVALID_CREDENTIALS",
            false,
            Some("Check email, password and role"),
            LogLevel::Debug,
        ),
        AppError::Forbidden(_) => (
            "FORBIDDEN",
            false,
            Some("Sign in with an account that has the required role"),
            LogLevel::Debug,
        ),
        AppError::CapacityReached { .. } => (
            "CAPACITY_REACHED",
            false,
            Some("Choose another event"),
            LogLevel::Debug,
        ),
        AppError::Cancelled(_) => ("CANCELLED", true, None, LogLevel::Debug),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::TransientStore(_) => "TransientStore",
            AppError::Storage(_) => "Storage",
            AppError::UploadExhausted { .. } => "UploadExhausted",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidTransition { .. } => "InvalidTransition",
            AppError::Auth(_) => "Auth",
            AppError::Forbidden(_) => "Forbidden",
            AppError::CapacityReached { .. } => "CapacityReached",
            AppError::Cancelled(_) => "Cancelled",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(ref msg) => msg.clone(),
            AppError::TransientStore(_) => {
                "The document store is temporarily unavailable".to_string()
            }
            AppError::Storage(_) => "Failed to access document storage".to_string(),
            AppError::UploadExhausted { attempts, .. } => {
                format!("Upload failed after {} attempts", attempts)
            }
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::InvalidTransition { from, .. } => {
                format!("This record has already been {}", from)
            }
            AppError::Auth(_) => "Invalid credentials".to_string(),
            AppError::Forbidden(ref msg) => msg.clone(),
            AppError::CapacityReached { capacity, .. } => {
                format!("All {} places have been taken", capacity)
            }
            AppError::Cancelled(_) => "The operation was cancelled".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal error".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_validation() {
        let err = AppError::Validation("File too large".to_string());
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "File too large");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_upload_exhausted() {
        let err = AppError::UploadExhausted {
            attempts: 3,
            last_error: "connection reset".to_string(),
        };
        assert_eq!(err.error_code(), "UPLOAD_EXHAUSTED");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Upload failed after 3 attempts");
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_invalid_transition() {
        let err = AppError::InvalidTransition {
            id: Uuid::nil(),
            from: "approved".to_string(),
        };
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert_eq!(err.client_message(), "This record has already been approved");
        assert_eq!(err.error_type(), "InvalidTransition");
    }

    #[test]
    fn test_auth_error_hides_details() {
        let err = AppError::Auth("no such user: someone@example.com".to_string());
        assert_eq!(err.client_message(), "Invalid credentials");
        assert_eq!(err.suggested_action(), Some("Check email, password and role"));
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let source = anyhow::anyhow!("disk full").context("writing sidecar");
        let err = AppError::from(source);
        assert!(err.detailed_message().contains("Caused by"));
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
