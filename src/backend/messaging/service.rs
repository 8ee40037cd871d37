//! Chat and message service
//!
//! Owns chat identity, appends, pagination, edits and deletes. Handlers of
//! both API families go through this type.

use std::sync::Arc;

use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio::sync::Mutex;

use crate::backend::auth::users;
use crate::backend::error::{BackendError, StoreError};
use crate::backend::messaging::{db, pagination};
use crate::shared::messaging::{
    Chat, CreateChatRequest, ListMessagesParams, Message, MessageType, SendMessageRequest,
};

#[derive(Clone)]
pub struct ChatService {
    pool: SqlitePool,
    /// Serializes get-or-create of pairwise chats
    ensure_lock: Arc<Mutex<()>>,
}

impl ChatService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            ensure_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Write transaction that takes the database write lock at `BEGIN`
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin_with("BEGIN IMMEDIATE").await
    }

    /// Get or create the pairwise chat between two users, in either order
    pub async fn ensure_chat(&self, party_a: &str, party_b: &str) -> Result<Chat, BackendError> {
        if party_a.is_empty() || party_b.is_empty() {
            return Err(BackendError::validation("Sender and receiver are required"));
        }
        if party_a == party_b {
            return Err(BackendError::validation("Cannot create a chat with yourself"));
        }

        let _guard = self.ensure_lock.lock().await;
        let mut tx = self.begin_write().await?;

        for party in [party_a, party_b] {
            if !users::user_exists(&mut *tx, party).await? {
                return Err(BackendError::not_found("User not found"));
            }
        }

        if let Some(chat) = db::find_pairwise_chat(&mut tx, party_a, party_b).await? {
            tracing::debug!(chat_id = %chat.id, "Pairwise chat already exists");
            return Ok(chat);
        }

        let participants = [party_a.to_string(), party_b.to_string()];
        let chat = db::create_chat(&mut tx, &participants, false, None).await?;
        tx.commit().await?;

        tracing::info!(chat_id = %chat.id, "Created pairwise chat");
        Ok(chat)
    }

    /// Create a new chat; never reuses an existing one
    pub async fn create_chat(&self, request: &CreateChatRequest) -> Result<Chat, BackendError> {
        let participants = request.validate()?;
        let name = if request.is_group { request.group_name() } else { None };

        let mut tx = self.begin_write().await?;
        let chat = db::create_chat(&mut tx, &participants, request.is_group, name).await?;
        tx.commit().await?;

        tracing::info!(chat_id = %chat.id, participants = chat.participants.len(), "Created chat");
        Ok(chat)
    }

    pub async fn get_chat(&self, chat_id: &str) -> Result<Chat, BackendError> {
        let mut conn = self.pool.acquire().await?;
        db::get_chat(&mut conn, chat_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Chat not found"))
    }

    /// Chats the user takes part in, most recently updated first
    pub async fn chats_for_user(&self, user_id: &str) -> Result<Vec<Chat>, BackendError> {
        let mut conn = self.pool.acquire().await?;
        Ok(db::chats_for_user(&mut conn, user_id).await?)
    }

    /// Append a message to an existing chat
    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<Message, BackendError> {
        request.validate()?;

        let mut tx = self.begin_write().await?;
        if !db::chat_exists(&mut tx, &request.chat_id).await? {
            return Err(BackendError::not_found("Chat not found"));
        }
        if !users::user_exists(&mut *tx, &request.sender_id).await? {
            return Err(BackendError::not_found("Sender not found"));
        }

        let message = db::insert_message(
            &mut tx,
            &request.chat_id,
            &request.sender_id,
            &request.content,
            request.message_type.unwrap_or_default(),
        )
        .await?;
        tx.commit().await?;

        tracing::debug!(chat_id = %message.chat_id, message_id = %message.id, "Message appended");
        Ok(message)
    }

    /// Append a message to the pairwise chat between sender and receiver
    ///
    /// The chat must already exist.
    pub async fn send_pairwise_message(
        &self,
        sender_id: &str,
        receiver_id: &str,
        text: &str,
    ) -> Result<Message, BackendError> {
        if text.trim().is_empty() {
            return Err(BackendError::validation("Message content cannot be empty"));
        }

        let mut tx = self.begin_write().await?;
        for party in [sender_id, receiver_id] {
            if !users::user_exists(&mut *tx, party).await? {
                return Err(BackendError::not_found("User not found"));
            }
        }

        let chat = db::find_pairwise_chat(&mut tx, sender_id, receiver_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Chat not found"))?;

        let message = db::insert_message(&mut tx, &chat.id, sender_id, text, MessageType::Text).await?;
        tx.commit().await?;

        Ok(message)
    }

    /// One page of a chat's history, oldest first
    pub async fn get_messages(
        &self,
        chat_id: &str,
        params: &ListMessagesParams,
    ) -> Result<Vec<Message>, BackendError> {
        let limit = params.page_limit();
        let mut conn = self.pool.acquire().await?;

        if !db::chat_exists(&mut conn, chat_id).await? {
            return Err(BackendError::not_found("Chat not found"));
        }

        let before = match params.cursor() {
            Some(cursor) => db::message_key(&mut conn, chat_id, cursor).await?,
            None => None,
        };

        match db::scan_messages_desc(&mut conn, chat_id, before.as_ref(), limit).await {
            Ok(mut page) => {
                page.reverse();
                Ok(page)
            }
            Err(StoreError::IndexMissing { index }) => {
                tracing::warn!(chat_id, index, "Message index missing, paginating in memory");
                let all = db::all_messages(&mut conn, chat_id).await?;
                Ok(pagination::paginate(all, params.cursor(), limit))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Page of the pairwise chat between two users
    pub async fn get_pairwise_messages(
        &self,
        party_a: &str,
        party_b: &str,
        params: &ListMessagesParams,
    ) -> Result<Vec<Message>, BackendError> {
        let chat_id = {
            let mut conn = self.pool.acquire().await?;
            db::find_pairwise_chat(&mut conn, party_a, party_b)
                .await?
                .map(|chat| chat.id)
                .ok_or_else(|| BackendError::not_found("Chat not found"))?
        };
        self.get_messages(&chat_id, params).await
    }

    /// Replace a message's text; timestamp and read flag are kept
    pub async fn edit_message(
        &self,
        chat_id: &str,
        message_id: &str,
        new_text: &str,
    ) -> Result<Chat, BackendError> {
        if new_text.trim().is_empty() {
            return Err(BackendError::validation("Message content cannot be empty"));
        }

        let mut conn = self.pool.acquire().await?;
        if !db::chat_exists(&mut conn, chat_id).await? {
            return Err(BackendError::not_found("Chat not found"));
        }
        if !db::update_message_content(&mut conn, chat_id, message_id, new_text).await? {
            return Err(BackendError::not_found("Message not found"));
        }

        db::get_chat(&mut conn, chat_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Chat not found"))
    }

    /// Remove a message; removing a message that is already gone is a no-op
    pub async fn delete_message(&self, chat_id: &str, message_id: &str) -> Result<Chat, BackendError> {
        let mut conn = self.pool.acquire().await?;
        let chat = db::get_chat(&mut conn, chat_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Chat not found"))?;

        if !db::delete_message(&mut conn, chat_id, message_id).await? {
            tracing::debug!(chat_id, message_id, "Delete of absent message ignored");
        }
        Ok(chat)
    }

    pub async fn mark_read(&self, chat_id: &str, message_id: &str) -> Result<(), BackendError> {
        let mut conn = self.pool.acquire().await?;
        if !db::chat_exists(&mut conn, chat_id).await? {
            return Err(BackendError::not_found("Chat not found"));
        }
        if !db::mark_message_read(&mut conn, chat_id, message_id).await? {
            return Err(BackendError::not_found("Message not found"));
        }
        Ok(())
    }

    /// Remove a chat together with its participants and messages, atomically
    pub async fn delete_chat(&self, chat_id: &str) -> Result<(), BackendError> {
        let mut tx = self.begin_write().await?;
        if !db::chat_exists(&mut tx, chat_id).await? {
            return Err(BackendError::not_found("Chat not found"));
        }
        let removed = db::delete_chat_cascade(&mut tx, chat_id).await?;
        tx.commit().await?;

        tracing::info!(chat_id, messages = removed, "Deleted chat");
        Ok(())
    }
}
