//! Chat Data Structure
//!
//! A chat is a conversation between two or more users. A non-group chat with
//! exactly two participants is a *pairwise* chat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Snapshot of the newest message of a chat, shown in chat lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    pub content: String,
    pub sender_id: String,
    pub created_at: DateTime<Utc>,
}

/// Represents a chat
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Unique chat ID
    pub id: String,
    /// Participant user IDs in insertion order
    pub participants: Vec<String>,
    /// Whether this is a named group chat
    #[serde(default)]
    pub is_group: bool,
    /// Group name, `None` for non-group chats
    #[serde(default)]
    pub name: Option<String>,
    /// Newest message, `None` until the first message is sent
    #[serde(default)]
    pub last_message: Option<LastMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    /// True for a two-party non-group chat
    pub fn is_pairwise(&self) -> bool {
        !self.is_group && self.participants.len() == 2
    }

    /// The other party of a pairwise chat
    pub fn other_participant(&self, user_id: &str) -> Option<&str> {
        if !self.is_pairwise() || !self.has_participant(user_id) {
            return None;
        }
        self.participants
            .iter()
            .find(|p| p.as_str() != user_id)
            .map(String::as_str)
    }
}

/// Request body for `POST /api/chats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatRequest {
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CreateChatRequest {
    /// Validate the request and return the participant list with duplicates
    /// collapsed (first occurrence wins)
    pub fn validate(&self) -> Result<Vec<String>, SharedError> {
        let mut participants: Vec<String> = Vec::with_capacity(self.participants.len());
        for id in &self.participants {
            if id.is_empty() {
                return Err(SharedError::validation(
                    "participants",
                    "Participant IDs cannot be empty",
                ));
            }
            if !participants.contains(id) {
                participants.push(id.clone());
            }
        }

        if participants.len() < 2 {
            return Err(SharedError::validation(
                "participants",
                "At least 2 participants are required",
            ));
        }

        if self.is_group && self.group_name().is_none() {
            return Err(SharedError::validation("name", "Group name is required"));
        }

        Ok(participants)
    }

    /// The trimmed group name, if one was given
    pub fn group_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
