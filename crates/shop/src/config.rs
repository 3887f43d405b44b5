//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOP_API_BASE_URL` - Base URL of the commerce backend
//!   (default: `http://localhost:5000`, the local development server)
//! - `SHOP_REQUEST_TIMEOUT_SECS` - Per-request timeout for the two
//!   remote calls (default: 10)
//! - `SHOP_STORAGE_DIR` - Directory for the durable local store
//!   (default: `.morelufs`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default backend for local development, matching the dev fallback of
/// the embedded web surface.
const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

const DEFAULT_STORAGE_DIR: &str = ".morelufs";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shop application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Base URL of the commerce backend.
    pub api_base_url: Url,
    /// Bounded timeout applied to each remote call.
    pub request_timeout: Duration,
    /// Directory backing the durable local store.
    pub storage_dir: PathBuf,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(&get_env_or_default(
            "SHOP_API_BASE_URL",
            DEFAULT_API_BASE_URL,
        ))?;

        let request_timeout = get_env_or_default(
            "SHOP_REQUEST_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| {
            ConfigError::InvalidEnvVar("SHOP_REQUEST_TIMEOUT_SECS".to_owned(), e.to_string())
        })?;

        let storage_dir = PathBuf::from(get_env_or_default("SHOP_STORAGE_DIR", DEFAULT_STORAGE_DIR));

        Ok(Self {
            api_base_url,
            request_timeout,
            storage_dir,
        })
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default URL is valid"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

/// Parse and sanity-check the backend base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("SHOP_API_BASE_URL".to_owned(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            "SHOP_API_BASE_URL".to_owned(),
            format!("not a base URL: {raw}"),
        ));
    }
    Ok(url)
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_valid() {
        let url = parse_base_url("https://shop.example.com/api").unwrap();
        assert_eq!(url.host_str(), Some("shop.example.com"));
    }

    #[test]
    fn test_parse_base_url_invalid() {
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("mailto:orders@example.com").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = ShopConfig::default();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.storage_dir, PathBuf::from(".morelufs"));
    }
}
