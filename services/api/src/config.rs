//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    /// Credential for the upstream recipe API. Deliberately optional: a
    /// missing credential is the gateway's configuration-error path (searches
    /// answer with sample data), not a startup failure.
    pub rakuten_app_id: Option<String>,
    pub rakuten_api_base: String,
    pub categories_path: PathBuf,
    /// When set, the category table is fetched from this URL instead of the
    /// local file.
    pub categories_url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Recipe API Settings ---
        let rakuten_app_id = std::env::var("RAKUTEN_APP_ID")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let rakuten_api_base = std::env::var("RAKUTEN_API_BASE")
            .unwrap_or_else(|_| "https://app.rakuten.co.jp/services/api".to_string());

        // --- Load Category Table Settings ---
        let categories_path = std::env::var("CATEGORIES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/categories.tsv"));
        let categories_url = std::env::var("CATEGORIES_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            rakuten_app_id,
            rakuten_api_base,
            categories_path,
            categories_url,
        })
    }
}
