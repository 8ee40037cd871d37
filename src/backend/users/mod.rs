//! Users Module
//!
//! Profile endpoints under `/api/users`. Storage lives in `auth::users`.

pub mod handlers;

pub use handlers::*;
