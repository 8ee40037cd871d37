//! Authentication Module
//!
//! User storage, credentialed signup and login, and bearer token sessions.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User rows and database operations
//! ├── sessions.rs     - Token store trait and token registry
//! ├── service.rs      - AuthService (signup, login, token lifecycle)
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are 32 random bytes, hex encoded, and expire after a configurable TTL
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// Token store and registry
pub mod sessions;

/// Auth service
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use service::AuthService;
pub use sessions::{MemoryTokenStore, TokenRecord, TokenRegistry, TokenStore};
