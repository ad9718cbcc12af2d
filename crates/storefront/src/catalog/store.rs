//! Catalog store with an explicit load state.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use voltcart_core::catalog::Catalog;

use super::{CatalogClient, CatalogError};

/// Where the catalog is in its load lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// No load has been started.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed or was cancelled; the catalog is empty.
    Failed(String),
}

impl CatalogStatus {
    /// The failure message, if the last load failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A consistent view of the store at one instant.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub status: CatalogStatus,
    pub catalog: Arc<Catalog>,
}

struct StoreState {
    /// Bumped by every load so results of superseded loads can be dropped.
    generation: u64,
    status: CatalogStatus,
    catalog: Arc<Catalog>,
}

/// Shared catalog state.
///
/// Starts empty; a background load swaps the fetched catalog in atomically.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<RwLock<StoreState>>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Create an empty, idle store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreState {
                generation: 0,
                status: CatalogStatus::Idle,
                catalog: Arc::new(Catalog::default()),
            })),
        }
    }

    /// Current status and catalog.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        CatalogSnapshot {
            status: state.status.clone(),
            catalog: Arc::clone(&state.catalog),
        }
    }

    #[must_use]
    pub fn status(&self) -> CatalogStatus {
        self.snapshot().status
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status() == CatalogStatus::Ready
    }

    /// Start fetching the catalog on a background task.
    ///
    /// Any earlier load is superseded: its result, should it still arrive,
    /// is discarded. The returned handle cancels the fetch when dropped.
    #[must_use = "dropping the handle cancels the load"]
    pub fn load_in_background(&self, client: CatalogClient) -> CatalogLoad {
        let generation = self.begin_load();
        let store = self.clone();

        info!(generation, "Spawning background catalog load");
        let handle = tokio::spawn(async move {
            let result = client.fetch_catalog().await;
            store.finish_load(generation, result);
        });

        CatalogLoad {
            store: self.clone(),
            generation,
            handle: Some(handle),
        }
    }

    /// Mark a new load as started and return its generation.
    fn begin_load(&self) -> u64 {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        state.status = CatalogStatus::Loading;
        state.generation
    }

    /// Apply the result of load `generation`. Returns `false` if the load
    /// was superseded and the result dropped.
    pub(crate) fn finish_load(
        &self,
        generation: u64,
        result: Result<Catalog, CatalogError>,
    ) -> bool {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation != generation {
            debug!(
                generation,
                current = state.generation,
                "Discarding result of superseded catalog load"
            );
            return false;
        }

        match result {
            Ok(catalog) => {
                info!(
                    categories = catalog.categories.len(),
                    products = catalog.products.len(),
                    "Catalog loaded"
                );
                state.catalog = Arc::new(catalog);
                state.status = CatalogStatus::Ready;
            }
            Err(e) => {
                error!(error = %e, "Failed to load catalog");
                state.catalog = Arc::new(Catalog::default());
                state.status = CatalogStatus::Failed(e.to_string());
            }
        }
        true
    }

    /// Move a still-running load `generation` to the cancelled state.
    fn cancel(&self, generation: u64) {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation == generation && state.status == CatalogStatus::Loading {
            info!(generation, "Catalog load cancelled");
            state.catalog = Arc::new(Catalog::default());
            state.status = CatalogStatus::Failed(CatalogError::Cancelled.to_string());
        }
    }
}

/// Handle to a background catalog load.
///
/// Dropping the handle aborts the fetch; if it had not finished the store
/// ends up `Failed` with a cancellation message instead of stuck `Loading`.
#[derive(Debug)]
pub struct CatalogLoad {
    store: CatalogStore,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl CatalogLoad {
    /// Wait for the load to finish and return the resulting status.
    pub async fn wait(mut self) -> CatalogStatus {
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            error!(error = %e, "Catalog load task did not complete");
            self.store.cancel(self.generation);
        }
        self.store.status()
    }

    /// Abort the fetch now.
    pub fn cancel(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(handle) = self.handle.take()
            && !handle.is_finished()
        {
            handle.abort();
            self.store.cancel(self.generation);
        }
    }
}

impl Drop for CatalogLoad {
    fn drop(&mut self) {
        self.abort();
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
