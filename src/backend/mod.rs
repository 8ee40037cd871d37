//! Backend Module
//!
//! All server-side code: the axum HTTP server, services, storage and the
//! token registry. Only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, state and app assembly
//! - **`routes`** - Router, CORS and tracing layers
//! - **`auth`** - Users table, token registry, signup/login
//! - **`users`** - `/api/users` handlers
//! - **`messaging`** - Chats, messages, pagination and the pairwise family
//! - **`middleware`** - Bearer token extractor
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Configuration, state and initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and sessions
//! ├── users/          - User profile handlers
//! ├── messaging/      - Chats and messages
//! ├── middleware/     - Request extractors
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! handler → `AuthService` / `ChatService` → SQLite (`sqlx`) or the token
//! registry → JSON response. Services are cheap to clone and shared through
//! `AppState`.
//!
//! # Example
//!
//! ```rust,no_run
//! use yapyap::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// User profile endpoints
pub mod users;

/// Middleware for request processing
pub mod middleware;

/// Chats and messages
pub mod messaging;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::create_app;
