//! Client state store
//!
//! In-memory cache of what the UI shows. Mutations are synchronous and
//! last-write-wins. Only the current user and the authentication flag are
//! persisted (see [`PersistedSession`]).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::optimistic::{temp_id, ClientMessage, DeliveryStatus};
use crate::shared::messaging::{Chat, Message, User};

/// The slice of [`ClientState`] that survives restarts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub current_user: Option<User>,
    pub is_authenticated: bool,
}

#[derive(Debug, Clone)]
pub struct ClientState {
    pub current_user: Option<User>,
    pub is_authenticated: bool,
    pub chats: Vec<Chat>,
    pub active_chat: Option<Chat>,
    messages: HashMap<String, Vec<ClientMessage>>,
    pub sidebar_open: bool,
    pub loading: bool,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            current_user: None,
            is_authenticated: false,
            chats: Vec::new(),
            active_chat: None,
            messages: HashMap::new(),
            sidebar_open: true,
            loading: false,
        }
    }
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State rebuilt from a persisted session
    pub fn restore(session: PersistedSession) -> Self {
        Self {
            current_user: session.current_user,
            is_authenticated: session.is_authenticated,
            ..Self::default()
        }
    }

    pub fn session(&self) -> PersistedSession {
        PersistedSession {
            current_user: self.current_user.clone(),
            is_authenticated: self.is_authenticated,
        }
    }

    /// Set or clear the current user; the auth flag follows
    pub fn set_current_user(&mut self, user: Option<User>) {
        self.is_authenticated = user.is_some();
        self.current_user = user;
    }

    pub fn set_chats(&mut self, chats: Vec<Chat>) {
        self.chats = chats;
    }

    /// Add a chat to the top of the list, replacing any entry with the same ID
    pub fn add_chat(&mut self, chat: Chat) {
        self.chats.retain(|c| c.id != chat.id);
        self.chats.insert(0, chat);
    }

    /// Replace a chat in the list and in the active slot
    pub fn update_chat(&mut self, chat: Chat) {
        if let Some(existing) = self.chats.iter_mut().find(|c| c.id == chat.id) {
            *existing = chat.clone();
        }
        if self.active_chat.as_ref().is_some_and(|c| c.id == chat.id) {
            self.active_chat = Some(chat);
        }
    }

    /// Drop a chat, its cached messages, and the active chat if it matches
    pub fn remove_chat(&mut self, chat_id: &str) {
        self.chats.retain(|c| c.id != chat_id);
        self.messages.remove(chat_id);
        if self.active_chat.as_ref().is_some_and(|c| c.id == chat_id) {
            self.active_chat = None;
        }
    }

    pub fn set_active_chat(&mut self, chat: Option<Chat>) {
        self.active_chat = chat;
    }

    /// Replace a chat's messages with server records
    pub fn set_messages(&mut self, chat_id: &str, messages: Vec<Message>) {
        let entries = messages.into_iter().map(ClientMessage::confirmed).collect();
        self.messages.insert(chat_id.to_string(), entries);
    }

    /// Append a server record unless one with the same ID is already cached
    pub fn add_message(&mut self, message: Message) {
        let entries = self.messages.entry(message.chat_id.clone()).or_default();
        if !entries.iter().any(|m| m.message.id == message.id) {
            entries.push(ClientMessage::confirmed(message));
        }
    }

    pub fn messages(&self, chat_id: &str) -> &[ClientMessage] {
        self.messages.get(chat_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Clear the user, auth flag and active chat
    pub fn logout(&mut self) {
        self.current_user = None;
        self.is_authenticated = false;
        self.active_chat = None;
    }

    /// Show an outgoing message right away; returns its temporary ID
    pub fn begin_send(&mut self, chat_id: &str, sender_id: &str, content: &str) -> String {
        self.begin_send_at(chat_id, sender_id, content, Utc::now())
    }

    /// [`begin_send`](Self::begin_send) with an explicit clock reading
    pub fn begin_send_at(&mut self, chat_id: &str, sender_id: &str, content: &str, now: DateTime<Utc>) -> String {
        let entries = self.messages.entry(chat_id.to_string()).or_default();

        let mut millis = now.timestamp_millis();
        while entries.iter().any(|m| m.message.id == temp_id(millis)) {
            millis += 1;
        }
        let id = temp_id(millis);

        entries.push(ClientMessage::provisional(id.clone(), chat_id, sender_id, content, now));
        id
    }

    /// Swap the provisional entry for the server record
    ///
    /// Leaves exactly one entry carrying the server ID, and refreshes the
    /// chat's last message snapshot.
    pub fn confirm_send(&mut self, temp_id: &str, server: Message) {
        let entries = self.messages.entry(server.chat_id.clone()).or_default();

        let temp_pos = entries.iter().position(|m| m.message.id == temp_id);
        let server_pos = entries.iter().position(|m| m.message.id == server.id);

        match (temp_pos, server_pos) {
            (Some(t), None) => entries[t] = ClientMessage::confirmed(server.clone()),
            (Some(t), Some(s)) => {
                entries[s] = ClientMessage::confirmed(server.clone());
                entries.remove(t);
            }
            (None, Some(_)) => {}
            (None, None) => entries.push(ClientMessage::confirmed(server.clone())),
        }

        self.refresh_last_message(&server);
    }

    /// Mark a provisional entry as failed; returns false if none matched
    pub fn fail_send(&mut self, temp_id: &str) -> bool {
        self.set_status(temp_id, DeliveryStatus::Pending, DeliveryStatus::Failed)
    }

    /// Put a failed entry back to pending and return it for resending
    pub fn retry_send(&mut self, temp_id: &str) -> Option<ClientMessage> {
        if !self.set_status(temp_id, DeliveryStatus::Failed, DeliveryStatus::Pending) {
            return None;
        }
        self.find(temp_id).cloned()
    }

    fn find(&self, id: &str) -> Option<&ClientMessage> {
        self.messages.values().flatten().find(|m| m.message.id == id)
    }

    fn set_status(&mut self, id: &str, from: DeliveryStatus, to: DeliveryStatus) -> bool {
        match self
            .messages
            .values_mut()
            .flatten()
            .find(|m| m.message.id == id && m.status == from)
        {
            Some(entry) => {
                entry.status = to;
                true
            }
            None => false,
        }
    }

    fn refresh_last_message(&mut self, message: &Message) {
        let apply = |chat: &mut Chat| {
            if chat.id == message.chat_id {
                chat.last_message = Some(message.snapshot());
                chat.updated_at = message.created_at;
            }
        };
        self.chats.iter_mut().for_each(apply);
        if let Some(active) = self.active_chat.as_mut() {
            apply(active);
        }
    }
}
