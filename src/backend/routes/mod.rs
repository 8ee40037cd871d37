//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs              - Module exports and documentation
//! ├── router.rs           - Router assembly, CORS and tracing layers
//! ├── api_routes.rs       - REST family under /api
//! └── pairwise_routes.rs  - /chat and /user endpoints
//! ```
//!
//! `GET /health` is mounted at the root next to both families.

pub mod api_routes;
pub mod pairwise_routes;
pub mod router;

pub use router::create_router;
