/**
 * User Model and Database Operations
 *
 * This module handles the `users` table. Timestamps are stored as Unix
 * milliseconds and the password hash stays inside the backend.
 */

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};

use crate::shared::messaging::{UpdateUserRequest, User};

const USER_COLUMNS: &str =
    "id, name, phone, email, password_hash, about, avatar, online, created_at";

/// Row of the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// bcrypt hash, only set for users created through signup
    pub password_hash: Option<String>,
    pub about: String,
    pub avatar: Option<String>,
    pub online: bool,
    pub created_at: i64,
}

impl UserRecord {
    /// Public view of the user, without the password hash
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            about: self.about,
            avatar: self.avatar,
            online: self.online,
            created_at: millis_to_datetime(self.created_at),
        }
    }
}

/// Convert stored Unix milliseconds back into a UTC timestamp
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Fields of a user about to be inserted
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub about: String,
    pub avatar: Option<String>,
}

/// Create a new user
///
/// Unique violations on `phone` or `email` surface as `sqlx::Error::Database`;
/// callers map them to a conflict.
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<UserRecord, sqlx::Error> {
    let record = UserRecord {
        id: uuid::Uuid::new_v4().to_string(),
        name: new_user.name,
        phone: new_user.phone,
        email: new_user.email,
        password_hash: new_user.password_hash,
        about: new_user.about,
        avatar: new_user.avatar,
        online: false,
        created_at: Utc::now().timestamp_millis(),
    };

    sqlx::query(
        r#"
        INSERT INTO users (id, name, phone, email, password_hash, about, avatar, online, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(&record.name)
    .bind(&record.phone)
    .bind(&record.email)
    .bind(&record.password_hash)
    .bind(&record.about)
    .bind(&record.avatar)
    .bind(record.online)
    .bind(record.created_at)
    .execute(pool)
    .await?;

    Ok(record)
}

/// Get user by ID
pub async fn get_user_by_id<'e, E>(executor: E, id: &str) -> Result<Option<UserRecord>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, UserRecord>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Get user by phone number
pub async fn get_user_by_phone(pool: &SqlitePool, phone: &str) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!("SELECT {USER_COLUMNS} FROM users WHERE phone = ?"))
        .bind(phone)
        .fetch_optional(pool)
        .await
}

/// Get user by email
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Whether a user with this ID exists
pub async fn user_exists<'e, E>(executor: E, id: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(executor)
        .await?;
    Ok(count > 0)
}

/// All users, oldest first
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, id ASC"
    ))
    .fetch_all(pool)
    .await
}

/// Apply a partial update; returns `None` if the user does not exist
pub async fn update_user(
    pool: &SqlitePool,
    id: &str,
    changes: &UpdateUserRequest,
) -> Result<Option<UserRecord>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users SET
            name = COALESCE(?, name),
            phone = COALESCE(?, phone),
            email = COALESCE(?, email),
            about = COALESCE(?, about),
            avatar = COALESCE(?, avatar)
        WHERE id = ?
        "#,
    )
    .bind(&changes.name)
    .bind(&changes.phone)
    .bind(&changes.email)
    .bind(&changes.about)
    .bind(&changes.avatar)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_user_by_id(pool, id).await
}

/// Delete a user; chats and messages that reference the user are kept
pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
