//! Remote catalog access.
//!
//! # Architecture
//!
//! - [`CatalogClient`] fetches the category and product lists over HTTP
//! - [`CatalogStore`] holds the fetched catalog behind an explicit load
//!   state (`Loading`, `Ready`, `Failed`)
//! - [`CatalogLoad`] owns the background fetch task; dropping it cancels
//!   the fetch
//!
//! The app starts immediately with an empty catalog. A background task
//! fetches both lists and swaps them in atomically when ready.
//!
//! # Example
//!
//! ```rust,ignore
//! use voltcart_storefront::catalog::{CatalogClient, CatalogStore};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let store = CatalogStore::new();
//! let load = store.load_in_background(client);
//!
//! // Readers see an empty catalog until the load finishes.
//! let snapshot = store.snapshot();
//! ```

mod client;
mod store;

pub use client::{CatalogClient, CategoryRecord, ProductRecord};
pub use store::{CatalogLoad, CatalogSnapshot, CatalogStatus, CatalogStore};

use thiserror::Error;

/// Errors that can occur when loading the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// The catalog is not loaded, so the requested product cannot be found.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// The load was cancelled before it finished.
    #[error("catalog load cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Status {
            url: "http://localhost/products".to_string(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(
            err.to_string(),
            "http://localhost/products returned HTTP 503 Service Unavailable"
        );
        assert_eq!(CatalogError::Cancelled.to_string(), "catalog load cancelled");
        assert_eq!(
            CatalogError::Unavailable("HTTP error".to_string()).to_string(),
            "catalog unavailable: HTTP error"
        );
    }
}
