//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used by the services and HTTP handlers and can be
//! converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use yapyap::backend::error::BackendError;
//! use axum::response::Response;
//!
//! async fn handler() -> Result<Response, BackendError> {
//!     Err(BackendError::not_found("User not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, StoreError, AUTH_FAILED, INVALID_TOKEN};
