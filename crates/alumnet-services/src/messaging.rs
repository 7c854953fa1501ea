//! Messaging store
//!
//! Append-only log of directed and broadcast messages, kept in send order.

use std::collections::BTreeSet;

use alumnet_core::constants::BROADCAST_RECIPIENT;
use alumnet_core::models::{DeliveryStatus, MessageRecord};
use alumnet_core::{AppError, NotificationSink};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MessageStore {
    messages: RwLock<Vec<MessageRecord>>,
    admin: Option<String>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Broadcasts from `email` are shown in every conversation
    pub fn with_admin(mut self, email: impl Into<String>) -> Self {
        self.admin = Some(email.into());
        self
    }

    pub async fn append(
        &self,
        from: &str,
        to: &str,
        text: &str,
    ) -> Result<MessageRecord, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Message text must not be empty".to_string(),
            ));
        }
        if to.trim().is_empty() {
            return Err(AppError::Validation(
                "Message recipient is required".to_string(),
            ));
        }

        let record = MessageRecord {
            id: Uuid::new_v4(),
            from: from.to_string(),
            to: to.to_string(),
            text: text.to_string(),
            sent_at: Utc::now(),
            delivery: if to == BROADCAST_RECIPIENT {
                DeliveryStatus::Sent
            } else {
                DeliveryStatus::Delivered
            },
            read_by: BTreeSet::new(),
        };
        self.messages.write().await.push(record.clone());

        tracing::debug!(message_id = %record.id, from = %from, to = %to, "Message appended");
        Ok(record)
    }

    /// Messages exchanged between `a` and `b`, plus admin broadcasts, in send order
    pub async fn conversation(&self, a: &str, b: &str) -> Vec<MessageRecord> {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.is_between(a, b) || self.is_admin_broadcast(m))
            .cloned()
            .collect()
    }

    /// Messages addressed to `email`, directly or by broadcast
    pub async fn inbox(&self, email: &str) -> Vec<MessageRecord> {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.is_addressed_to(email))
            .cloned()
            .collect()
    }

    pub async fn unread_count(&self, email: &str) -> usize {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.is_addressed_to(email) && !m.is_read_by(email))
            .count()
    }

    /// Mark message `id` read for `reader`. Other recipients of a broadcast keep
    /// their own read state.
    pub async fn mark_read(&self, id: Uuid, reader: &str) -> Result<(), AppError> {
        let mut messages = self.messages.write().await;
        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Message {} not found", id)))?;
        if !message.is_addressed_to(reader) {
            return Err(AppError::Forbidden(format!(
                "Message {} is not addressed to {}",
                id, reader
            )));
        }
        message.read_by.insert(reader.to_string());
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }

    fn is_admin_broadcast(&self, message: &MessageRecord) -> bool {
        message.is_broadcast() && self.admin.as_deref() == Some(message.from.as_str())
    }
}

#[async_trait]
impl NotificationSink for MessageStore {
    async fn notify(&self, from: &str, to: &str, text: &str) {
        if let Err(e) = self.append(from, to, text).await {
            tracing::warn!(from = %from, to = %to, error = %e, "Notification dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: &str = "admin@alumni.edu";

    #[tokio::test]
    async fn test_rejects_empty_text() {
        let store = MessageStore::new();
        let err = store.append("a@x.edu", "b@x.edu", "   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_conversation_includes_both_directions_and_admin_broadcasts() {
        let store = MessageStore::new().with_admin(ADMIN);
        store.append("a@x.edu", "b@x.edu", "hi b").await.unwrap();
        store.append("c@x.edu", "a@x.edu", "hi a").await.unwrap();
        store.append(ADMIN, "all", "Reunion on Friday").await.unwrap();
        store.append("b@x.edu", "a@x.edu", "hi a, from b").await.unwrap();
        store.append("c@x.edu", "all", "not an admin").await.unwrap();

        let texts: Vec<_> = store
            .conversation("a@x.edu", "b@x.edu")
            .await
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(texts, vec!["hi b", "Reunion on Friday", "hi a, from b"]);
    }

    #[tokio::test]
    async fn test_unread_and_mark_read() {
        let store = MessageStore::new().with_admin(ADMIN);
        let direct = store.append(ADMIN, "a@x.edu", "Welcome").await.unwrap();
        store.append(ADMIN, "all", "Newsletter").await.unwrap();

        assert_eq!(store.unread_count("a@x.edu").await, 2);
        assert_eq!(store.unread_count(ADMIN).await, 0);

        store.mark_read(direct.id, "a@x.edu").await.unwrap();
        assert_eq!(store.unread_count("a@x.edu").await, 1);

        assert!(matches!(
            store.mark_read(Uuid::new_v4(), "a@x.edu").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_broadcast_read_state_is_per_recipient() {
        let store = MessageStore::new().with_admin(ADMIN);
        let news = store.append(ADMIN, "all", "News").await.unwrap();

        store.mark_read(news.id, "a@x.edu").await.unwrap();
        assert_eq!(store.unread_count("a@x.edu").await, 0);
        assert_eq!(store.unread_count("b@x.edu").await, 1);
    }

    #[tokio::test]
    async fn test_cannot_mark_someone_elses_message() {
        let store = MessageStore::new().with_admin(ADMIN);
        let direct = store.append(ADMIN, "b@x.edu", "Private").await.unwrap();

        let err = store.mark_read(direct.id, "a@x.edu").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(store.unread_count("b@x.edu").await, 1);
    }

    #[tokio::test]
    async fn test_notify_appends() {
        let store = MessageStore::new();
        store.notify(ADMIN, "a@x.edu", "Approved").await;
        store.notify(ADMIN, "a@x.edu", "").await;
        assert_eq!(store.len().await, 1);
    }
}
