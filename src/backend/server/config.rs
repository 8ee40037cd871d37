/**
 * Server Configuration
 *
 * Loaded from environment variables (a `.env` file is read first by the
 * binary). Every setting has a default so the server starts with zero
 * configuration for local development.
 *
 * | Variable          | Default                        |
 * |-------------------|--------------------------------|
 * | `PORT`            | `5000`                         |
 * | `DATABASE_URL`    | `sqlite://yapyap.db?mode=rwc`  |
 * | `ALLOWED_ORIGINS` | `http://localhost:3000`        |
 * | `TOKEN_TTL_HOURS` | `24`                           |
 * | `BCRYPT_COST`     | `bcrypt::DEFAULT_COST`         |
 *
 * `RUST_LOG` is read by the tracing subscriber directly.
 */

use chrono::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://yapyap.db?mode=rwc";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Which origins the CORS layer accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Parse a comma separated list; a `*` entry allows any origin
    pub fn parse(value: &str) -> Self {
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.iter().any(|o| o == "*") {
            Self::Any
        } else if origins.is_empty() {
            Self::List(vec![DEFAULT_ALLOWED_ORIGIN.to_string()])
        } else {
            Self::List(origins)
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub allowed_origins: AllowedOrigins,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            allowed_origins: AllowedOrigins::List(vec![DEFAULT_ALLOWED_ORIGIN.to_string()]),
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!(value = %port, "Invalid PORT, using default"),
            }
        }

        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            config.database_url = url;
        }

        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            config.allowed_origins = AllowedOrigins::parse(&origins);
        }

        if let Some(hours) = lookup("TOKEN_TTL_HOURS") {
            let ttl = hours
                .parse::<i64>()
                .ok()
                .filter(|h| (1..=MAX_TOKEN_TTL_HOURS).contains(h))
                .and_then(Duration::try_hours);
            match ttl {
                Some(ttl) => config.token_ttl = ttl,
                None => tracing::warn!(value = %hours, "Invalid TOKEN_TTL_HOURS, using default"),
            }
        }

        if let Some(cost) = lookup("BCRYPT_COST") {
            match cost.parse::<u32>() {
                Ok(cost) if (4..=31).contains(&cost) => config.bcrypt_cost = cost,
                _ => tracing::warn!(value = %cost, "Invalid BCRYPT_COST, using default"),
            }
        }

        config
    }
}
