//! Hooks and traits for notification delivery
//!
//! Workflows announce state changes through `NotificationSink` without depending
//! on the messaging store directly. Delivery is fire-and-forget: a sink logs its
//! own failures and never reports them back to the workflow.

use async_trait::async_trait;

/// Receiver of workflow notifications (e.g. "your document was approved")
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, from: &str, to: &str, text: &str);
}

/// No-op implementation for when notifications are disabled
pub struct NoOpNotificationSink;

#[async_trait]
impl NotificationSink for NoOpNotificationSink {
    async fn notify(&self, _from: &str, _to: &str, _text: &str) {}
}
