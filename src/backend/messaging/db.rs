//! Database operations for messaging
//!
//! Chats, participants and flat messages. Every function takes a plain
//! connection so the service can run several of them inside one transaction.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use crate::backend::auth::users::millis_to_datetime;
use crate::backend::error::StoreError;
use crate::shared::messaging::{Chat, LastMessage, Message, MessageType};

/// Composite index the ordered message scan depends on
pub const MESSAGE_ORDER_INDEX: &str = "idx_messages_chat_created";

const MESSAGE_COLUMNS: &str = "id, chat_id, sender_id, content, message_type, is_read, created_at";

const CHAT_COLUMNS: &str = "id, is_group, name, last_message_content, last_message_sender_id, \
     last_message_created_at, created_at, updated_at";

/// Position of a message in the (created_at, id) order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageKey {
    pub created_at: i64,
    pub id: String,
}

fn message_from_row(row: &SqliteRow) -> Message {
    let message_type: String = row.get("message_type");
    Message {
        id: row.get("id"),
        chat_id: row.get("chat_id"),
        sender_id: row.get("sender_id"),
        content: row.get("content"),
        message_type: MessageType::parse(&message_type),
        is_read: row.get("is_read"),
        created_at: millis_to_datetime(row.get("created_at")),
    }
}

fn chat_from_row(row: &SqliteRow, participants: Vec<String>) -> Chat {
    let last_content: Option<String> = row.get("last_message_content");
    let last_sender: Option<String> = row.get("last_message_sender_id");
    let last_created: Option<i64> = row.get("last_message_created_at");

    let last_message = match (last_content, last_sender, last_created) {
        (Some(content), Some(sender_id), Some(created_at)) => Some(LastMessage {
            content,
            sender_id,
            created_at: millis_to_datetime(created_at),
        }),
        _ => None,
    };

    Chat {
        id: row.get("id"),
        participants,
        is_group: row.get("is_group"),
        name: row.get("name"),
        last_message,
        created_at: millis_to_datetime(row.get("created_at")),
        updated_at: millis_to_datetime(row.get("updated_at")),
    }
}

async fn participants_of(conn: &mut SqliteConnection, chat_id: &str) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT user_id FROM chat_participants WHERE chat_id = ? ORDER BY position ASC")
        .bind(chat_id)
        .fetch_all(&mut *conn)
        .await
}

async fn hydrate_chats(conn: &mut SqliteConnection, rows: Vec<SqliteRow>) -> Result<Vec<Chat>, sqlx::Error> {
    let mut chats = Vec::with_capacity(rows.len());
    for row in rows {
        let id: String = row.get("id");
        let participants = participants_of(conn, &id).await?;
        chats.push(chat_from_row(&row, participants));
    }
    Ok(chats)
}

/// Insert a chat and its participant rows
pub async fn create_chat(
    conn: &mut SqliteConnection,
    participants: &[String],
    is_group: bool,
    name: Option<&str>,
) -> Result<Chat, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp_millis();

    sqlx::query(
        r#"
        INSERT INTO chats (id, is_group, name, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(is_group)
    .bind(name)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    for (position, user_id) in participants.iter().enumerate() {
        sqlx::query("INSERT INTO chat_participants (chat_id, user_id, position) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(user_id)
            .bind(position as i64)
            .execute(&mut *conn)
            .await?;
    }

    Ok(Chat {
        id,
        participants: participants.to_vec(),
        is_group,
        name: name.map(str::to_string),
        last_message: None,
        created_at: millis_to_datetime(now),
        updated_at: millis_to_datetime(now),
    })
}

/// Get a chat by ID
pub async fn get_chat(conn: &mut SqliteConnection, chat_id: &str) -> Result<Option<Chat>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {CHAT_COLUMNS} FROM chats WHERE id = ?"))
        .bind(chat_id)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => {
            let participants = participants_of(conn, chat_id).await?;
            Ok(Some(chat_from_row(&row, participants)))
        }
        None => Ok(None),
    }
}

pub async fn chat_exists(conn: &mut SqliteConnection, chat_id: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chats WHERE id = ?")
        .bind(chat_id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

/// Find the non-group two-party chat between `a` and `b`, in either order
pub async fn find_pairwise_chat(
    conn: &mut SqliteConnection,
    a: &str,
    b: &str,
) -> Result<Option<Chat>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        SELECT {CHAT_COLUMNS} FROM chats c
        WHERE c.is_group = 0
          AND (SELECT COUNT(*) FROM chat_participants p WHERE p.chat_id = c.id) = 2
          AND EXISTS (SELECT 1 FROM chat_participants p WHERE p.chat_id = c.id AND p.user_id = ?)
          AND EXISTS (SELECT 1 FROM chat_participants p WHERE p.chat_id = c.id AND p.user_id = ?)
        ORDER BY c.created_at ASC, c.id ASC
        LIMIT 1
        "#
    ))
    .bind(a)
    .bind(b)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => {
            let id: String = row.get("id");
            let participants = participants_of(conn, &id).await?;
            Ok(Some(chat_from_row(&row, participants)))
        }
        None => Ok(None),
    }
}

/// Chats containing `user_id`, most recently updated first
pub async fn chats_for_user(conn: &mut SqliteConnection, user_id: &str) -> Result<Vec<Chat>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {CHAT_COLUMNS} FROM chats
        WHERE id IN (SELECT chat_id FROM chat_participants WHERE user_id = ?)
        ORDER BY updated_at DESC, id DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    hydrate_chats(conn, rows).await
}

/// Append a message and refresh the chat's snapshot
///
/// Does not check that the chat exists; callers do that in the same transaction.
pub async fn insert_message(
    conn: &mut SqliteConnection,
    chat_id: &str,
    sender_id: &str,
    content: &str,
    message_type: MessageType,
) -> Result<Message, sqlx::Error> {
    let id = Uuid::now_v7().to_string();
    let now = Utc::now().timestamp_millis();

    sqlx::query(
        r#"
        INSERT INTO messages (id, chat_id, sender_id, content, message_type, is_read, created_at)
        VALUES (?, ?, ?, ?, ?, 0, ?)
        "#,
    )
    .bind(&id)
    .bind(chat_id)
    .bind(sender_id)
    .bind(content)
    .bind(message_type.as_str())
    .bind(now)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        UPDATE chats SET
            last_message_content = ?,
            last_message_sender_id = ?,
            last_message_created_at = ?,
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(content)
    .bind(sender_id)
    .bind(now)
    .bind(now)
    .bind(chat_id)
    .execute(&mut *conn)
    .await?;

    Ok(Message {
        id,
        chat_id: chat_id.to_string(),
        sender_id: sender_id.to_string(),
        content: content.to_string(),
        message_type,
        is_read: false,
        created_at: millis_to_datetime(now),
    })
}

/// Order key of a message, if it belongs to `chat_id`
pub async fn message_key(
    conn: &mut SqliteConnection,
    chat_id: &str,
    message_id: &str,
) -> Result<Option<MessageKey>, sqlx::Error> {
    let row = sqlx::query("SELECT id, created_at FROM messages WHERE chat_id = ? AND id = ?")
        .bind(chat_id)
        .bind(message_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.map(|row| MessageKey {
        created_at: row.get("created_at"),
        id: row.get("id"),
    }))
}

async fn index_exists(conn: &mut SqliteConnection, index: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = ?")
        .bind(index)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

/// Newest-first range scan: up to `limit` messages strictly older than `before`
///
/// Fails with `StoreError::IndexMissing` when the ordering index is absent.
pub async fn scan_messages_desc(
    conn: &mut SqliteConnection,
    chat_id: &str,
    before: Option<&MessageKey>,
    limit: usize,
) -> Result<Vec<Message>, StoreError> {
    if !index_exists(conn, MESSAGE_ORDER_INDEX).await? {
        return Err(StoreError::IndexMissing {
            index: MESSAGE_ORDER_INDEX,
        });
    }

    let rows = match before {
        Some(key) => {
            sqlx::query(&format!(
                r#"
                SELECT {MESSAGE_COLUMNS} FROM messages
                WHERE chat_id = ?
                  AND (created_at < ? OR (created_at = ? AND id < ?))
                ORDER BY created_at DESC, id DESC
                LIMIT ?
                "#
            ))
            .bind(chat_id)
            .bind(key.created_at)
            .bind(key.created_at)
            .bind(&key.id)
            .bind(limit as i64)
            .fetch_all(&mut *conn)
            .await?
        }
        None => {
            sqlx::query(&format!(
                r#"
                SELECT {MESSAGE_COLUMNS} FROM messages
                WHERE chat_id = ?
                ORDER BY created_at DESC, id DESC
                LIMIT ?
                "#
            ))
            .bind(chat_id)
            .bind(limit as i64)
            .fetch_all(&mut *conn)
            .await?
        }
    };

    Ok(rows.iter().map(message_from_row).collect())
}

/// Every message of a chat, in no particular order
pub async fn all_messages(conn: &mut SqliteConnection, chat_id: &str) -> Result<Vec<Message>, sqlx::Error> {
    let rows = sqlx::query(&format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE chat_id = ?"))
        .bind(chat_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows.iter().map(message_from_row).collect())
}

/// Replace a message's content; returns false if no such message in the chat
pub async fn update_message_content(
    conn: &mut SqliteConnection,
    chat_id: &str,
    message_id: &str,
    content: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE messages SET content = ? WHERE chat_id = ? AND id = ?")
        .bind(content)
        .bind(chat_id)
        .bind(message_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn mark_message_read(
    conn: &mut SqliteConnection,
    chat_id: &str,
    message_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE messages SET is_read = 1 WHERE chat_id = ? AND id = ?")
        .bind(chat_id)
        .bind(message_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete one message; deleting a missing message is not an error
pub async fn delete_message(
    conn: &mut SqliteConnection,
    chat_id: &str,
    message_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM messages WHERE chat_id = ? AND id = ?")
        .bind(chat_id)
        .bind(message_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove a chat with its participants and messages
///
/// Run inside a transaction; returns the number of messages removed.
pub async fn delete_chat_cascade(conn: &mut SqliteConnection, chat_id: &str) -> Result<u64, sqlx::Error> {
    let messages = sqlx::query("DELETE FROM messages WHERE chat_id = ?")
        .bind(chat_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM chat_participants WHERE chat_id = ?")
        .bind(chat_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM chats WHERE id = ?")
        .bind(chat_id)
        .execute(&mut *conn)
        .await?;

    Ok(messages)
}
