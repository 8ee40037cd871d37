/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are returned by the services and handlers and are converted
 * to HTTP responses in `conversion.rs`.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Validation` - malformed or missing input (400)
 * - `Auth` - bad credentials, missing or expired token (401)
 * - `NotFound` - a referenced user, chat or message does not exist (404)
 * - `Conflict` - a unique field (phone, email) is already taken (409)
 *
 * ## Server Errors
 *
 * - `Database`, `Store`, `Hash` - storage and hashing failures (500)
 *
 * `StoreError::IndexMissing` is raised by the ordered message scan when its
 * composite index is absent. The chat service handles it by taking the
 * in-memory fallback path, so it does not normally reach a response.
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Message returned for every credential or token failure
pub const AUTH_FAILED: &str = "Auth failed";

/// Message returned for a missing, unknown or expired bearer token
pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// Errors reported by the storage layer that callers may want to react to
#[derive(Debug, Error)]
pub enum StoreError {
    /// An ordered scan needs an index that is not present
    #[error("required index `{index}` is missing")]
    IndexMissing { index: &'static str },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Backend-specific error types
///
/// ```rust
/// use yapyap::backend::error::BackendError;
///
/// let err = BackendError::not_found("Chat not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Invalid input
    #[error("{message}")]
    Validation { message: String },

    /// Authentication failure
    #[error("{message}")]
    Auth { message: String },

    #[error("{message}")]
    NotFound { message: String },

    /// Unique constraint violation
    #[error("{message}")]
    Conflict { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl BackendError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// The uniform credential failure
    pub fn auth_failed() -> Self {
        Self::auth(AUTH_FAILED)
    }

    pub fn invalid_token() -> Self {
        Self::auth(INVALID_TOKEN)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Map a sqlx error, turning unique constraint violations into `Conflict`
    pub fn from_write(err: sqlx::Error, conflict_message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::conflict(conflict_message),
            _ => Self::Database(err),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Auth { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Store(_) | Self::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Auth { message }
            | Self::NotFound { message }
            | Self::Conflict { message } => message.clone(),
            Self::Database(_) | Self::Store(_) | Self::Hash(_) => "Internal server error".to_string(),
        }
    }

    /// Underlying failure text for server errors
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Database(err) => Some(err.to_string()),
            Self::Store(err) => Some(err.to_string()),
            Self::Hash(err) => Some(err.to_string()),
            _ => None,
        }
    }
}
