//! Chat Message Data Structure
//!
//! Represents a message in a chat, plus the bodies and query parameters of
//! the message endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::chat::LastMessage;
use crate::shared::error::SharedError;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Largest page a single request can return
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Type of message content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain text message
    #[default]
    Text,
    /// Image reference
    Image,
    /// File reference
    File,
    /// System message (e.g., "User joined")
    System,
}

impl MessageType {
    /// Convert to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Image => "image",
            MessageType::File => "file",
            MessageType::System => "system",
        }
    }

    /// Parse from string (database); unknown values read back as text
    pub fn parse(s: &str) -> Self {
        match s {
            "image" => MessageType::Image,
            "file" => MessageType::File,
            "system" => MessageType::System,
            _ => MessageType::Text,
        }
    }
}

/// Represents a chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message ID
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub content: String,
    #[serde(rename = "type", default)]
    pub message_type: MessageType,
    #[serde(rename = "read", default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Preview text (first 50 chars)
    pub fn preview(&self) -> String {
        if self.content.chars().count() > 50 {
            let head: String = self.content.chars().take(50).collect();
            format!("{}...", head)
        } else {
            self.content.clone()
        }
    }

    /// Snapshot stored on the chat after this message is appended
    pub fn snapshot(&self) -> LastMessage {
        LastMessage {
            content: self.content.clone(),
            sender_id: self.sender_id.clone(),
            created_at: self.created_at,
        }
    }
}

/// Request body for `POST /api/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
}

impl SendMessageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.chat_id.is_empty() {
            return Err(SharedError::validation("chatId", "Chat ID is required"));
        }
        if self.sender_id.is_empty() {
            return Err(SharedError::validation("senderId", "Sender ID is required"));
        }
        if self.content.trim().is_empty() {
            return Err(SharedError::validation("content", "Message content cannot be empty"));
        }
        Ok(())
    }
}

/// Query parameters for `GET /api/messages/{chatId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Cursor: id of the oldest message of the previously fetched page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<String>,
}

impl ListMessagesParams {
    /// Effective page size: absent or zero means the default, capped at the maximum
    pub fn page_limit(&self) -> usize {
        let limit = match self.limit {
            None | Some(0) => DEFAULT_PAGE_LIMIT,
            Some(n) => n.min(MAX_PAGE_LIMIT),
        };
        limit as usize
    }

    /// The cursor, with an empty string treated as no cursor
    pub fn cursor(&self) -> Option<&str> {
        self.last_message_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Request body for `PUT /api/messages/{chatId}/{messageId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMessageRequest {
    #[serde(default)]
    pub content: String,
}
