//! Server Module
//!
//! Server initialization, application state and configuration.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs     - Module exports
//! ├── state.rs   - AppState and FromRef implementations
//! ├── config.rs  - Environment configuration
//! └── init.rs    - Database connection and app assembly
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{AllowedOrigins, ServerConfig};
pub use init::{connect_database, connect_in_memory, create_app, create_app_with};
pub use state::AppState;
