//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `PHARMACART_HOST` - Bind address (default: 127.0.0.1)
//! - `PHARMACART_PORT` - Listen port (default: 3000)
//! - `PHARMACART_STORAGE_PATH` - JSON storage file (default: data/pharmacart.json)
//! - `PHARMACART_API_URL` - Backend API base URL (default: <http://localhost:3001/api>)
//! - `PHARMACART_PAYMENT_DELAY_MS` - Mock payment delay (default: 2000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate between 0.0 and 1.0 (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_STORAGE_PATH: &str = "data/pharmacart.json";
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_PAYMENT_DELAY_MS: &str = "2000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path of the JSON key-value storage file
    pub storage_path: PathBuf,
    /// Base URL of the backend API
    pub api_url: Url,
    /// How long the mock payment gateway takes to confirm
    pub payment_delay: Duration,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
///
/// Implements `Debug` manually to redact the DSN.
#[derive(Clone)]
pub struct SentryConfig {
    /// Sentry DSN; error tracking is disabled when unset
    pub dsn: Option<SecretString>,
    /// Environment tag attached to events
    pub environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
        }
    }
}

impl std::fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryConfig")
            .field("dsn", &self.dsn.as_ref().map(|_| "[REDACTED]"))
            .field("environment", &self.environment)
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}

impl SentryConfig {
    /// The DSN as a plain string, for `sentry::init`.
    #[must_use]
    pub fn dsn(&self) -> Option<&str> {
        self.dsn.as_ref().map(ExposeSecret::expose_secret)
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = parse_var("PHARMACART_HOST", &var("PHARMACART_HOST", DEFAULT_HOST))?;
        let port = parse_var("PHARMACART_PORT", &var("PHARMACART_PORT", DEFAULT_PORT))?;
        let storage_path = PathBuf::from(var("PHARMACART_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        let api_url = parse_var("PHARMACART_API_URL", &var("PHARMACART_API_URL", DEFAULT_API_URL))?;
        let payment_delay = Duration::from_millis(parse_var(
            "PHARMACART_PAYMENT_DELAY_MS",
            &var("PHARMACART_PAYMENT_DELAY_MS", DEFAULT_PAYMENT_DELAY_MS),
        )?);

        let sample_rate: f32 = parse_var("SENTRY_SAMPLE_RATE", &var("SENTRY_SAMPLE_RATE", "1.0"))?;
        if !(0.0..=1.0).contains(&sample_rate) {
            return Err(ConfigError::InvalidEnvVar(
                "SENTRY_SAMPLE_RATE".to_string(),
                format!("must be between 0.0 and 1.0 (got {sample_rate})"),
            ));
        }
        let sentry = SentryConfig {
            dsn: lookup("SENTRY_DSN")
                .filter(|dsn| !dsn.is_empty())
                .map(SecretString::from),
            environment: lookup("SENTRY_ENVIRONMENT"),
            sample_rate,
        };

        Ok(Self {
            host,
            port,
            storage_path,
            api_url,
            payment_delay,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse a variable's value, naming the variable in the error.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.storage_path, PathBuf::from("data/pharmacart.json"));
        assert_eq!(config.api_url.as_str(), "http://localhost:3001/api");
        assert_eq!(config.payment_delay, Duration::from_millis(2000));
        assert!(config.sentry.dsn().is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PHARMACART_HOST", "0.0.0.0"),
            ("PHARMACART_PORT", "8080"),
            ("PHARMACART_PAYMENT_DELAY_MS", "0"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.payment_delay, Duration::ZERO);
        assert_eq!(config.sentry.environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PHARMACART_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "PHARMACART_PORT"));
    }

    #[test]
    fn test_invalid_api_url() {
        assert!(load(&[("PHARMACART_API_URL", "not a url")]).is_err());
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
    }

    #[test]
    fn test_sentry_config_debug_redacts_dsn() {
        let config = load(&[("SENTRY_DSN", "https://secret_key@o0.ingest.sentry.io/1")]).unwrap();
        let debug_output = format!("{:?}", config.sentry);

        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("secret_key"));
        assert_eq!(config.sentry.dsn(), Some("https://secret_key@o0.ingest.sentry.io/1"));
    }
}
