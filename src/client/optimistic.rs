//! # Optimistic Sends
//!
//! Every outgoing message is shown immediately under a temporary ID of the
//! form `temp-<unix millis>` and moves through a small state machine:
//!
//! ```text
//! Pending ──confirm──▶ Confirmed
//!    │
//!    └──fail──▶ Failed ──retry──▶ Pending
//! ```
//!
//! A failed entry is never dropped; the user decides whether to resend it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::messaging::{Message, MessageType};

/// Delivery state of a message in the client cache
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Shown locally, waiting for the server
    Pending,
    /// Matches a server record
    Confirmed,
    /// The send failed; kept so it can be retried
    Failed,
}

/// A message as the client holds it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientMessage {
    #[serde(flatten)]
    pub message: Message,
    pub status: DeliveryStatus,
}

impl ClientMessage {
    /// A server record
    pub fn confirmed(message: Message) -> Self {
        Self {
            message,
            status: DeliveryStatus::Confirmed,
        }
    }

    /// A provisional local record whose ID is the temporary ID
    pub fn provisional(temp_id: String, chat_id: &str, sender_id: &str, content: &str, now: DateTime<Utc>) -> Self {
        Self {
            message: Message {
                id: temp_id,
                chat_id: chat_id.to_string(),
                sender_id: sender_id.to_string(),
                content: content.to_string(),
                message_type: MessageType::Text,
                is_read: false,
                created_at: now,
            },
            status: DeliveryStatus::Pending,
        }
    }

    pub fn id(&self) -> &str {
        &self.message.id
    }

    pub fn is_temporary(&self) -> bool {
        is_temp_id(&self.message.id)
    }
}

const TEMP_PREFIX: &str = "temp-";

/// `temp-<millis>`
pub fn temp_id(millis: i64) -> String {
    format!("{TEMP_PREFIX}{millis}")
}

pub fn is_temp_id(id: &str) -> bool {
    id.strip_prefix(TEMP_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}
