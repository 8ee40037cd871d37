/**
 * YapYap Server Entry Point
 *
 * Loads `.env`, initializes tracing, connects the database and serves both
 * API families.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use yapyap::backend::server::{create_app, ServerConfig};

    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ServerConfig::from_env();
    let port = config.port;
    tracing::info!(allowed_origins = ?config.allowed_origins, token_ttl_hours = config.token_ttl.num_hours(), "Configuration loaded");

    let app = create_app(config).await.map_err(|e| {
        tracing::error!("Failed to initialize database: {}", e);
        e
    })?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin yapyap-server --features ssr");
    std::process::exit(1);
}
