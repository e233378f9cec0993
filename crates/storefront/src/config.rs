//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `BAZAAR_API_URL` - Backend API base URL (default: `http://localhost:8080/api`)
//! - `BAZAAR_STATE_DIR` - Directory for the local key-value store (default: `.bazaar`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default directory for persisted client state.
pub const DEFAULT_STATE_DIR: &str = ".bazaar";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend API base URL, without a trailing slash
    pub api_url: String,
    /// Directory backing the local key-value store
    pub state_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., production, staging)
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("BAZAAR_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let api_url = validate_api_url("BAZAAR_API_URL", &api_url)?;

        let state_dir = lookup("BAZAAR_STATE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STATE_DIR), PathBuf::from);

        Ok(Self {
            api_url,
            state_dir,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Override the backend base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is not an absolute http(s) URL.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = validate_api_url("api_url", api_url)?;
        Ok(self)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Check that the base URL is an absolute http(s) URL and strip any
/// trailing slash so endpoint paths can be appended directly.
fn validate_api_url(var_name: &str, value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_owned(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_owned(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_owned(),
            "must not contain a query or fragment".to_owned(),
        ));
    }

    Ok(url.as_str().trim_end_matches('/').to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.state_dir, PathBuf::from(DEFAULT_STATE_DIR));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_api_url_trailing_slash_is_stripped() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[(
            "BAZAAR_API_URL",
            "https://shop.test/api/",
        )]))
        .unwrap();
        assert_eq!(config.api_url, "https://shop.test/api");
    }

    #[test]
    fn test_api_url_must_be_http() {
        let result =
            StorefrontConfig::from_lookup(lookup_from(&[("BAZAAR_API_URL", "ftp://shop.test")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(name, _)) if name == "BAZAAR_API_URL"));
    }

    #[test]
    fn test_api_url_must_parse() {
        let result = StorefrontConfig::from_lookup(lookup_from(&[("BAZAAR_API_URL", "not a url")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_state_dir_falls_back_to_default() {
        let config =
            StorefrontConfig::from_lookup(lookup_from(&[("BAZAAR_STATE_DIR", "  ")])).unwrap();
        assert_eq!(config.state_dir, PathBuf::from(DEFAULT_STATE_DIR));
    }

    #[test]
    fn test_empty_sentry_dsn_is_ignored() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("SENTRY_DSN", ""),
            ("SENTRY_ENVIRONMENT", "staging"),
        ]))
        .unwrap();
        assert!(config.sentry_dsn.is_none());
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_with_api_url_override() {
        let config = StorefrontConfig::default()
            .with_api_url("http://127.0.0.1:9999/api")
            .unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:9999/api");
    }
}
