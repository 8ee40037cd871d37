//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! - **`auth`** - Bearer token extractor for protected routes
//! - **`json`** - JSON body extractor with uniform 400 rejections

pub mod auth;
pub mod json;

pub use auth::{bearer_token, AuthUser};
pub use json::ApiJson;
