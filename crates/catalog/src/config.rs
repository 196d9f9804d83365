//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `CATALOG_HOST` - Bind address (default: 127.0.0.1)
//! - `CATALOG_PORT` - Listen port (default: 8080)
//! - `CATALOG_CORS_ORIGIN` - Browser origin allowed to call the API (default: `http://localhost:3000`)
//! - `CATALOG_CATEGORY_POLICY` - `required` or `optional` (default: required)
//! - `CATALOG_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

use shop_catalog_core::CategoryPolicy;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

/// Catalog application configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// The single origin allowed by CORS
    pub cors_origin: HeaderValue,
    /// Whether products must reference a category
    pub category_policy: CategoryPolicy,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., "production")
    pub sentry_environment: Option<String>,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);

        let database_url = vars
            .get("CATALOG_DATABASE_URL")
            .or_else(|| vars.get("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("CATALOG_DATABASE_URL".to_string()))?;

        let host = vars.parse("CATALOG_HOST", "127.0.0.1", str::parse::<IpAddr>)?;
        let port = vars.parse("CATALOG_PORT", "8080", str::parse::<u16>)?;
        let cors_origin = vars.parse(
            "CATALOG_CORS_ORIGIN",
            "http://localhost:3000",
            HeaderValue::from_str,
        )?;
        let category_policy =
            vars.parse("CATALOG_CATEGORY_POLICY", "required", str::parse::<CategoryPolicy>)?;
        let log_format = vars.parse("CATALOG_LOG_FORMAT", "text", parse_log_format)?;

        Ok(Self {
            database_url,
            host,
            port,
            cors_origin,
            category_policy,
            log_format,
            sentry_dsn: vars.get("SENTRY_DSN"),
            sentry_environment: vars.get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Vars<'_, F> {
    /// Get a variable, treating empty values as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable (or its default) and parse it.
    fn parse<T, E: ToString>(
        &self,
        key: &str,
        default: &str,
        parse: impl FnOnce(&str) -> Result<T, E>,
    ) -> Result<T, ConfigError> {
        let value = self.get(key).unwrap_or_else(|| default.to_string());
        parse(value.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    match value.to_ascii_lowercase().as_str() {
        "text" | "pretty" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(format!("unknown log format '{other}' (expected 'text' or 'json')")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<CatalogConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CatalogConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("CATALOG_DATABASE_URL", "postgres://localhost/catalog")]).unwrap();

        assert_eq!(config.database_url.expose_secret(), "postgres://localhost/catalog");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.category_policy, CategoryPolicy::Required);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://fly/catalog")]).unwrap();
        assert_eq!(config.database_url.expose_secret(), "postgres://fly/catalog");
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "CATALOG_DATABASE_URL"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CATALOG_DATABASE_URL", "postgres://localhost/catalog"),
            ("CATALOG_HOST", "0.0.0.0"),
            ("CATALOG_PORT", "9000"),
            ("CATALOG_CORS_ORIGIN", "https://shop.example.com"),
            ("CATALOG_CATEGORY_POLICY", "optional"),
            ("CATALOG_LOG_FORMAT", "JSON"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.cors_origin, "https://shop.example.com");
        assert_eq!(config.category_policy, CategoryPolicy::Optional);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.sentry_dsn.as_deref(), Some("https://key@sentry.example.com/1"));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[
            ("CATALOG_DATABASE_URL", "postgres://localhost/catalog"),
            ("CATALOG_PORT", "eighty"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "CATALOG_PORT"));
    }

    #[test]
    fn test_invalid_policy() {
        let err = load(&[
            ("CATALOG_DATABASE_URL", "postgres://localhost/catalog"),
            ("CATALOG_CATEGORY_POLICY", "maybe"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "CATALOG_CATEGORY_POLICY"));
    }

    #[test]
    fn test_database_url_is_redacted_in_debug() {
        let config = load(&[("CATALOG_DATABASE_URL", "postgres://user:hunter2@db/catalog")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
