//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CATALOG_API_URL` - Base URL of the remote catalog
//!   (default: `https://637f1c9c5b1cc8d6f93aca6d.mockapi.io/`)
//! - `CATALOG_CATEGORIES_PATH` - Category list path (default: `categoriesOfElectronic`)
//! - `CATALOG_PRODUCTS_PATH` - Product list path (default: `productsOfElectronics`)
//! - `CATALOG_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `CATALOG_CATEGORY_MATCH` - `name` or `id` (default: `name`)
//! - `CATALOG_PREVIEW_LIMIT` - Products shown before "See all" (default: 4)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;
use voltcart_core::catalog::CategoryMatchMode;

const DEFAULT_CATALOG_API_URL: &str = "https://637f1c9c5b1cc8d6f93aca6d.mockapi.io/";

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
    /// Remote catalog configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// Remote catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; endpoint paths are joined onto it
    pub api_url: Url,
    /// Path of the category list endpoint
    pub categories_path: String,
    /// Path of the product list endpoint
    pub products_path: String,
    /// Timeout applied to each request
    pub timeout: Duration,
    /// How a selected category is matched against products
    pub category_match: CategoryMatchMode,
    /// Products shown on the catalog screen before "See all"
    pub preview_limit: usize,
}

impl CatalogConfig {
    /// Catalog settings pointing at `api_url` with every other value defaulted.
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            categories_path: "categoriesOfElectronic".to_string(),
            products_path: "productsOfElectronics".to_string(),
            timeout: Duration::from_secs(10),
            category_match: CategoryMatchMode::default(),
            preview_limit: 4,
        }
    }

    /// Full URL of the category list.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn categories_url(&self) -> Result<Url, url::ParseError> {
        self.api_url.join(&self.categories_path)
    }

    /// Full URL of the product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn products_url(&self) -> Result<Url, url::ParseError> {
        self.api_url.join(&self.products_path)
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

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or_default(&lookup, "STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or_default(&lookup, "STOREFRONT_PORT", 3000_u16)?;
        let catalog = CatalogConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            catalog,
            sentry_dsn: non_empty(&lookup, "SENTRY_DSN"),
            sentry_environment: non_empty(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = non_empty(lookup, "CATALOG_API_URL")
            .unwrap_or_else(|| DEFAULT_CATALOG_API_URL.to_string());
        let api_url = parse_base_url(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e))?;

        let mut config = Self::new(api_url);

        if let Some(path) = non_empty(lookup, "CATALOG_CATEGORIES_PATH") {
            config.categories_path = path;
        }
        if let Some(path) = non_empty(lookup, "CATALOG_PRODUCTS_PATH") {
            config.products_path = path;
        }

        let timeout_secs: u64 = parse_or_default(lookup, "CATALOG_TIMEOUT_SECS", 10)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        config.timeout = Duration::from_secs(timeout_secs);
        config.category_match =
            parse_or_default(lookup, "CATALOG_CATEGORY_MATCH", config.category_match)?;
        config.preview_limit =
            parse_or_default(lookup, "CATALOG_PREVIEW_LIMIT", config.preview_limit)?;

        Ok(config)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating blank values as unset.
fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Parse a variable if set, otherwise use the default.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    non_empty(lookup, key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a base URL, making sure it ends in `/` so paths join beneath it.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme: {}", url.scheme()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
