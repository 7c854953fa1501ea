use std::path::Path;

use alumnet_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;

/// Error body printed on stdout when a command fails
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code
    pub code: String,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorReport {
    /// Details and the error type are hidden in production and for auth failures.
    pub fn new(error: &AppError, is_production: bool) -> Self {
        let hide_details = is_production || matches!(error, AppError::Auth(_));
        Self {
            error: error.client_message(),
            details: (!hide_details).then(|| error.detailed_message()),
            error_type: (!hide_details).then(|| error.error_type().to_string()),
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
        }
    }
}

pub fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Command failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Command failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Command failed");
        }
    }
}

/// Guess a document content type from its file extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Initialize tracing for CLI binaries. Logs go to stderr so stdout stays valid JSON.
///
/// `LOG_FORMAT=json` switches to JSON log lines.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("alumnet=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn error_report_hides_auth_details() {
        let err = AppError::Auth("no account for someone@alumni.edu".to_string());
        let report = ErrorReport::new(&err, false);
        assert_eq!(report.error, "Invalid credentials");
        assert!(report.details.is_none());
        assert!(report.error_type.is_none());
        assert!(!serde_json::to_string(&report).unwrap().contains("someone@"));
    }

    #[test]
    fn error_report_details_outside_production() {
        let err = AppError::InvalidTransition {
            id: Uuid::nil(),
            from: "approved".to_string(),
        };
        let report = ErrorReport::new(&err, false);
        assert_eq!(report.code, "INVALID_TRANSITION");
        assert_eq!(report.error_type.as_deref(), Some("InvalidTransition"));
        assert!(report.details.is_some());

        let report = ErrorReport::new(&err, true);
        assert!(report.details.is_none());
        assert!(report.error_type.is_none());
    }

    #[test]
    fn content_type_from_extension() {
        assert_eq!(content_type_for(Path::new("cv.PDF")), "application/pdf");
        assert_eq!(content_type_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("photo.jpg")), "image/jpeg");
        assert_eq!(
            content_type_for(Path::new("notes.txt")),
            "application/octet-stream"
        );
        assert_eq!(content_type_for(Path::new("README")), "application/octet-stream");
    }
}
