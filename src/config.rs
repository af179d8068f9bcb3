//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup. A `.env` file is honoured for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default wall-clock budget for a plan generation round trip.
pub const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 45;

/// Default delay of the simulated federated login.
pub const DEFAULT_FEDERATED_LOGIN_DELAY_MS: u64 = 1500;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Gemini model used for every generator call
    pub gemini_model: String,
    /// Gemini API base URL (overridable for local stubs)
    pub gemini_base_url: String,
    /// Budget for a plan generation call
    pub generator_timeout: Duration,
    /// Artificial latency of the simulated Google login
    pub federated_login_delay: Duration,
    /// Local key/value store file. `None` keeps everything in memory.
    pub data_path: Option<PathBuf>,

    // --- Secrets ---
    /// Gemini API key
    pub gemini_api_key: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Config for tests: in-memory store, short timeouts, dummy secrets.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            gemini_model: crate::services::gemini::DEFAULT_MODEL.to_string(),
            gemini_base_url: crate::services::gemini::API_BASE_URL.to_string(),
            generator_timeout: Duration::from_millis(200),
            federated_login_delay: Duration::ZERO,
            data_path: None,
            gemini_api_key: "test_api_key".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_var("PORT", 8080)?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| crate::services::gemini::DEFAULT_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| crate::services::gemini::API_BASE_URL.to_string()),
            generator_timeout: Duration::from_secs(parse_var(
                "GENERATOR_TIMEOUT_SECS",
                DEFAULT_GENERATOR_TIMEOUT_SECS,
            )?),
            federated_login_delay: Duration::from_millis(parse_var(
                "FEDERATED_LOGIN_DELAY_MS",
                DEFAULT_FEDERATED_LOGIN_DELAY_MS,
            )?),
            data_path: match env::var("DATA_PATH") {
                Ok(p) if p.trim().is_empty() || p == ":memory:" => None,
                Ok(p) => Some(PathBuf::from(p)),
                Err(_) => Some(PathBuf::from("data/fitlife_store.json")),
            },

            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }
}

/// Parse an optional numeric variable, rejecting garbage instead of silently defaulting.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
