//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the client and the backend. Everything here is plain data designed for
//! JSON serialization over the REST API.
//!
//! # Overview
//!
//! - **`messaging`** - Users, chats, messages and their request/response bodies
//! - **`error`** - Validation and serialization errors raised by shared types
//! - **`config`** - Client configuration (API base URL, session file location)

/// Shared error types
pub mod error;

/// Client configuration
pub mod config;

/// Messaging data structures
pub mod messaging;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use messaging::{Chat, LastMessage, Message, MessageType, User};
