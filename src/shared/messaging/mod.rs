//! Messaging Module
//!
//! This module contains all the data structures for the messaging system:
//!
//! - `User` - A registered user
//! - `Chat` - A pairwise or multi-party conversation
//! - `Message` - A message in a chat
//!
//! # Usage
//!
//! ```rust
//! use yapyap::shared::messaging::{Chat, Message, User};
//! ```

pub mod chat;
pub mod message;
pub mod user;

// Re-export all types
pub use chat::{Chat, CreateChatRequest, LastMessage};
pub use message::{
    EditMessageRequest, ListMessagesParams, Message, MessageType, SendMessageRequest,
    DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
pub use user::{
    is_valid_phone, validate_phone, CreateUserRequest, UpdateUserRequest, User,
    ValidatePhoneResponse,
};
