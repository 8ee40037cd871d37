//! Messaging Module
//!
//! Chats and flat messages: storage, pagination, the chat service and the
//! handlers of both API families.

pub mod db;
pub mod handlers;
pub mod pagination;
pub mod pairwise;
pub mod service;

pub use service::ChatService;
