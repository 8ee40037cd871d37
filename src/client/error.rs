//! Client error types

use thiserror::Error;

/// Errors returned by the client library
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, bad body)
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No optimistic entry with this temporary ID is waiting to be resent
    #[error("No failed message with id {0}")]
    UnknownTempId(String),
}

impl ClientError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
