//! Configuration management for the Gemini agent.
//!
//! Configuration can be set via environment variables:
//! - `GEMINI_API_KEY` - Required. Your Google Gemini API key.
//! - `GEMINI_MODEL` - Optional. Model identifier. Defaults to `gemini-2.0-flash`.
//! - `GEMINI_TEMPERATURE` - Optional. Sampling temperature. Defaults to `0.7`.
//! - `GEMINI_MAX_TOKENS` - Optional. Maximum output tokens. Defaults to `1000`.
//! - `LOG_LEVEL` - Optional. Console log verbosity. Defaults to `info`.
//! - `LOG_DIR` - Optional. Directory for dated log files. Defaults to `logs`.
//! - `HOST` - Optional. Web UI host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Web UI port. Defaults to `3000`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration. Set once at startup; never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key
    pub api_key: String,

    /// Gemini model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum output tokens per response
    pub max_output_tokens: u32,

    /// Console log verbosity
    pub log_level: String,

    /// Directory for dated log files
    pub log_dir: PathBuf,

    /// Web UI host
    pub host: String,

    /// Web UI port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GEMINI_API_KEY` is not set
    /// or is empty, and `ConfigError::InvalidValue` for unparseable numeric
    /// variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-2.0-flash".to_string());

        let temperature = std::env::var("GEMINI_TEMPERATURE")
            .unwrap_or_else(|_| "0.7".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("GEMINI_TEMPERATURE".to_string(), format!("{}", e)))?;

        let max_output_tokens = std::env::var("GEMINI_MAX_TOKENS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("GEMINI_MAX_TOKENS".to_string(), format!("{}", e)))?;

        let log_level = std::env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .to_lowercase();

        let log_dir = std::env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        let host = std::env::var("HOST")
            .unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        Ok(Self {
            api_key,
            model,
            temperature,
            max_output_tokens,
            log_level,
            log_dir,
            host,
            port,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            temperature: 0.7,
            max_output_tokens: 1000,
            log_level: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}
