//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

/// Upper bound on `TOKEN_TTL_HOURS`; one year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 366;

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
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub openrouter_api_key: Option<String>,
    pub llm_api_base: String,
    pub emotion_model: String,
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
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Load Server and Database Settings ---
        let bind_address_str = lookup("BIND_ADDRESS")
            .or_else(|| lookup("PORT").map(|port| format!("0.0.0.0:{}", port)))
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("SQLITE_DB_PATH").map(|path| format!("sqlite://{}?mode=rwc", path)))
            .unwrap_or_else(|| "sqlite://journal.db?mode=rwc".to_string());

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Token Settings ---
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingVar("JWT_SECRET".to_string()))?;

        let token_ttl_hours = match lookup("TOKEN_TTL_HOURS") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(hours) if (1..=MAX_TOKEN_TTL_HOURS).contains(&hours) => hours,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "TOKEN_TTL_HOURS".to_string(),
                        format!(
                            "'{}' is not a number of hours between 1 and {}",
                            raw, MAX_TOKEN_TTL_HOURS
                        ),
                    ))
                }
            },
            None => 24,
        };

        // --- Load Analysis Endpoint Settings ---
        let openrouter_api_key = lookup("OPENROUTER_API_KEY").filter(|s| !s.is_empty());
        let llm_api_base = lookup("LLM_API_BASE")
            .unwrap_or_else(|| "https://openrouter.ai/api/v1".to_string());
        let emotion_model = lookup("EMOTION_MODEL")
            .unwrap_or_else(|| "mistralai/mistral-7b-instruct:free".to_string());

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            jwt_secret,
            token_ttl_hours,
            openrouter_api_key,
            llm_api_base,
            emotion_model,
        })
    }
}
