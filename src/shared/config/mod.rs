//! Client configuration module
//!
//! Where the client finds the API and where it keeps its persisted session.

use std::path::PathBuf;
use thiserror::Error;

/// API base used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the REST family, including the `/api` prefix
    pub api_url: String,
    /// File holding the persisted session slice
    pub session_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_path: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Build a configuration from `YAPYAP_API_URL`, falling back to the default URL
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var("YAPYAP_API_URL") {
            builder = builder.api_url(url);
        }
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.api_url.clone()));
        }
        Ok(())
    }

    /// Build a full endpoint URL from a path such as `/users`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_url: Option<String>,
    session_path: Option<PathBuf>,
}

impl AppConfigBuilder {
    /// Set the API base URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the session file location
    pub fn session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            api_url: self.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            session_path: self.session_path,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
