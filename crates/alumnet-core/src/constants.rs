//! Portal-wide constants.

/// Recipient marker for messages addressed to every alumni identity.
pub const BROADCAST_RECIPIENT: &str = "all";

/// Default upload size limit (10 MiB).
pub const MAX_UPLOAD_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Attempts made against the document store before an upload is abandoned.
pub const UPLOAD_MAX_RETRIES: u32 = 3;

/// Base of the linear backoff between upload attempts.
pub const UPLOAD_RETRY_DELAY_MS: u64 = 1000;

/// Latency of the simulated store used when no remote backend is configured.
pub const SIMULATED_LATENCY_MS: u64 = 800;

pub const DEFAULT_APPROVE_COMMENT: &str = "Document approved.";
pub const DEFAULT_REJECT_COMMENT: &str = "Document rejected. Please review and resubmit.";
