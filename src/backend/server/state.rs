/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * The `AppState` struct holds:
 * - The SQLite connection pool
 * - The chat/message service
 * - The auth service (which owns the token registry)
 * - The loaded server configuration
 *
 * Everything inside is cheap to clone; services share the pool and the
 * token store through `Arc`s.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::service::AuthService;
use crate::backend::messaging::service::ChatService;
use crate::backend::server::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub chats: ChatService,
    pub auth: AuthService,
    pub config: Arc<ServerConfig>,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for ChatService {
    fn from_ref(state: &AppState) -> Self {
        state.chats.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
