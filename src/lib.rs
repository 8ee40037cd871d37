//! YapYap - Main Library
//!
//! A basic messaging application: a REST backend and a chat client library.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between client and backend
//!   - Users, chats, messages and their request bodies
//!   - Validation errors
//!   - Client configuration
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server with the REST and pairwise API families
//!   - SQLite persistence through `sqlx`
//!   - bcrypt signup/login and an injectable bearer token registry
//!
//! - **`client`** - Client library
//!   - `ApiClient` over the REST family
//!   - `ClientState` cache with the optimistic send protocol
//!   - Persisted session slice
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend modules (default)
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use yapyap::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), sqlx::Error> {
//! let app = create_app(ServerConfig::from_env()).await?;
//! // Serve with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! ## Client
//!
//! ```rust,no_run
//! use yapyap::client::{ApiClient, ClientState};
//! use yapyap::shared::AppConfig;
//!
//! # async fn example() -> Result<(), yapyap::client::ClientError> {
//! let api = ApiClient::new(AppConfig::default());
//! let mut state = ClientState::default();
//! api.send_optimistic(&mut state, "chat-id", "user-id", "hello").await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Client library
pub mod client;
