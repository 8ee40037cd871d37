//! Authentication Handlers Module
//!
//! HTTP handlers for signup, login and the bearer token endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - POST /user/signup
//! ├── login.rs    - POST /user/login
//! └── tokens.rs   - /api/auth/token and /api/auth/validate
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: name, phone and password → user created → token returned
//! 2. **Login**: email or phone plus password → credentials verified → token returned
//! 3. **Validate**: bearer token → registry lookup → user returned

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Token issue, validation and logout
pub mod tokens;

pub use types::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};

pub use login::login;
pub use signup::signup;
pub use tokens::{generate_token, logout, validate_token};
