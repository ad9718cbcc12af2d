//! Application state shared across handlers.

use std::sync::{Arc, Mutex, PoisonError};

use crate::cart::CartStore;
use crate::catalog::{CatalogClient, CatalogError, CatalogLoad, CatalogStore};
use crate::config::StorefrontConfig;
use crate::shell::Shell;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It is the single owner of
/// the shopper's cart and navigation shell; handlers reach them only
/// through the accessors here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog_client: CatalogClient,
    catalog: CatalogStore,
    cart: CartStore,
    shell: Shell,
    /// The in-flight (or last) catalog load. Replacing it cancels the old one.
    catalog_load: Mutex<Option<CatalogLoad>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built from the
    /// configuration.
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog_client = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog_client,
                catalog: CatalogStore::new(),
                cart: CartStore::new(),
                shell: Shell::new(),
                catalog_load: Mutex::new(None),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Get a reference to the shopper's cart.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the navigation shell.
    #[must_use]
    pub fn shell(&self) -> &Shell {
        &self.inner.shell
    }

    /// Start (or restart) fetching the catalog in the background.
    ///
    /// A load already in flight is cancelled.
    pub fn start_catalog_load(&self) {
        let load = self
            .inner
            .catalog
            .load_in_background(self.inner.catalog_client.clone());

        let previous = self
            .inner
            .catalog_load
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(load);
        drop(previous);
    }

    /// Take ownership of the current catalog load, if any.
    ///
    /// Used to await the load (tests, readiness checks) or cancel it.
    #[must_use]
    pub fn take_catalog_load(&self) -> Option<CatalogLoad> {
        self.inner
            .catalog_load
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
