//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use lesson_planner_core::DEFAULT_ARCHIVE_KEY;
use tracing::Level;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_LESSON_MODEL: &str = "gemini-2.5-flash";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub lesson_model: String,
    /// When set, the archive lives in PostgreSQL instead of the file store.
    pub database_url: Option<String>,
    pub archive_dir: PathBuf,
    pub archive_key: String,
    /// When set, CORS only allows this origin.
    pub cors_origin: Option<HeaderValue>,
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
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Generator Settings ---
        let gemini_api_key = var("GEMINI_API_KEY").filter(|key| !key.trim().is_empty());
        let gemini_base_url =
            var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());
        let lesson_model = var("LESSON_MODEL").unwrap_or_else(|| DEFAULT_LESSON_MODEL.to_string());

        // --- Storage Settings ---
        let database_url = var("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let archive_dir = var("ARCHIVE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));
        let archive_key = var("ARCHIVE_KEY").unwrap_or_else(|| DEFAULT_ARCHIVE_KEY.to_string());
        if archive_key.is_empty()
            || !archive_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::InvalidValue(
                "ARCHIVE_KEY".to_string(),
                "only ASCII letters, digits, '_' and '-' are allowed".to_string(),
            ));
        }

        let cors_origin = var("CORS_ORIGIN")
            .filter(|origin| !origin.trim().is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin.trim()).map_err(|e| {
                    ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            bind_address,
            log_level,
            gemini_api_key,
            gemini_base_url,
            lesson_model,
            database_url,
            archive_dir,
            archive_key,
            cors_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.lesson_model, DEFAULT_LESSON_MODEL);
        assert_eq!(config.database_url, None);
        assert_eq!(config.archive_dir, PathBuf::from("./data"));
        assert_eq!(config.archive_key, DEFAULT_ARCHIVE_KEY);
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("RUST_LOG", "debug"),
            ("GEMINI_API_KEY", "secret"),
            ("LESSON_MODEL", "gemini-2.0-flash"),
            ("ARCHIVE_KEY", "school-7"),
            ("CORS_ORIGIN", "http://localhost:5173"),
        ])
        .unwrap();
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.gemini_api_key.as_deref(), Some("secret"));
        assert_eq!(config.lesson_model, "gemini-2.0-flash");
        assert_eq!(config.archive_key, "school-7");
        assert_eq!(
            config.cors_origin,
            Some(HeaderValue::from_static("http://localhost:5173"))
        );
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = load(&[("GEMINI_API_KEY", "  ")]).unwrap();
        assert_eq!(config.gemini_api_key, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("BIND_ADDRESS", "not-an-address")]),
            Err(ConfigError::InvalidValue(name, _)) if name == "BIND_ADDRESS"
        ));
        assert!(matches!(
            load(&[("RUST_LOG", "chatty")]),
            Err(ConfigError::InvalidValue(name, _)) if name == "RUST_LOG"
        ));
        assert!(matches!(
            load(&[("ARCHIVE_KEY", "../etc/passwd")]),
            Err(ConfigError::InvalidValue(name, _)) if name == "ARCHIVE_KEY"
        ));
        assert!(matches!(
            load(&[("CORS_ORIGIN", "http://bad\norigin")]),
            Err(ConfigError::InvalidValue(name, _)) if name == "CORS_ORIGIN"
        ));
    }
}
