//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `QUANTUMPAY_AUTH_URL` - Base URL of the authentication service
//! - `QUANTUMPAY_TRANSACTION_URL` - Base URL of the transaction service
//!
//! ## Optional
//! - `QUANTUMPAY_STORAGE_PATH` - Durable client state file
//!   (default: `.quantum-pay.json`)
//! - `RUST_LOG` - Log filtering, honoured by the tracing subscriber

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use quantum_pay_client::ServiceEndpoints;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Remote service base URLs.
    pub endpoints: ServiceEndpoints,
    /// Where the durable client state lives.
    pub storage_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a base
    /// URL does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let auth_base = parse_base_url("QUANTUMPAY_AUTH_URL", &get_required_env("QUANTUMPAY_AUTH_URL")?)?;
        let transaction_base = parse_base_url(
            "QUANTUMPAY_TRANSACTION_URL",
            &get_required_env("QUANTUMPAY_TRANSACTION_URL")?,
        )?;
        let storage_path =
            PathBuf::from(get_env_or_default("QUANTUMPAY_STORAGE_PATH", ".quantum-pay.json"));

        Ok(Self {
            endpoints: ServiceEndpoints {
                auth_base,
                transaction_base,
            },
            storage_path,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a service base URL, naming the variable in the error.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_valid() {
        let url = parse_base_url("TEST_VAR", "https://api.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1");
    }

    #[test]
    fn test_parse_base_url_invalid() {
        let err = parse_base_url("TEST_VAR", "not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "TEST_VAR"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("QUANTUMPAY_AUTH_URL".to_owned());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: QUANTUMPAY_AUTH_URL"
        );
    }
}
