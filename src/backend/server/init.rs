/**
 * Server Initialization
 *
 * Database connection, migrations, state assembly and router creation.
 *
 * # Initialization Process
 *
 * 1. Open the SQLite pool named by `DATABASE_URL`
 * 2. Run the embedded migrations
 * 3. Build the token registry, services and `AppState`
 * 4. Create the router with all routes and layers
 */

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::backend::auth::service::AuthService;
use crate::backend::auth::sessions::TokenRegistry;
use crate::backend::messaging::service::ChatService;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// How long a writer waits for the write lock before failing
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the database and bring its schema up to date
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database ready");

    Ok(pool)
}

/// Single-connection in-memory database with migrations applied
///
/// The connection is never recycled, so the database lives as long as the pool.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}

/// Assemble the application state from its parts
pub fn build_state(pool: SqlitePool, tokens: TokenRegistry, config: ServerConfig) -> AppState {
    AppState {
        chats: ChatService::new(pool.clone()),
        auth: AuthService::new(pool.clone(), tokens, config.bcrypt_cost),
        pool,
        config: Arc::new(config),
    }
}

/// Router over an existing pool and token registry
pub fn create_app_with(pool: SqlitePool, tokens: TokenRegistry, config: ServerConfig) -> Router {
    create_router(build_state(pool, tokens, config))
}

/// Connect, migrate and build the full application
pub async fn create_app(config: ServerConfig) -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing YapYap backend server");

    let pool = connect_database(&config.database_url).await?;
    let tokens = TokenRegistry::in_memory(config.token_ttl);

    Ok(create_app_with(pool, tokens, config))
}
