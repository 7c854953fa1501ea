use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::BROADCAST_RECIPIENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
}

/// A directed message. `to` is an email or the broadcast marker `"all"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    pub delivery: DeliveryStatus,
    /// Recipients who have read the message. A broadcast is read per recipient.
    #[serde(default)]
    pub read_by: BTreeSet<String>,
}

impl MessageRecord {
    pub fn is_broadcast(&self) -> bool {
        self.to == BROADCAST_RECIPIENT
    }

    /// Whether the message belongs to the conversation between `a` and `b`
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    pub fn is_addressed_to(&self, email: &str) -> bool {
        self.to == email || (self.is_broadcast() && self.from != email)
    }

    pub fn is_read_by(&self, email: &str) -> bool {
        self.read_by.contains(email)
    }
}
