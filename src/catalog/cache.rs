use std::sync::{Arc, Mutex, PoisonError};

use crate::catalog::{CatalogRow, CatalogSource};
use crate::error::AssetError;

/// Snapshot of the catalog, fetched on first use and kept for the lifetime
/// of the cache.
///
/// The fetch-and-store sequence runs under a lock, so a cache shared across
/// threads downloads at most once. A failed fetch leaves the cache empty;
/// the next [`CatalogCache::get`] tries again.
#[derive(Debug)]
pub struct CatalogCache<S> {
    source: S,
    rows: Mutex<Option<Arc<[CatalogRow]>>>,
}

impl<S: CatalogSource> CatalogCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            rows: Mutex::new(None),
        }
    }

    /// Returns the cached rows, downloading them on the first call.
    ///
    /// Only rows with a usable power curve are kept.
    pub fn get(&self) -> Result<Arc<[CatalogRow]>, AssetError> {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = rows.as_ref() {
            return Ok(Arc::clone(cached));
        }

        tracing::info!(url = self.source.url(), "fetching turbine catalog");
        let fetched = self.source.fetch().inspect_err(|e| {
            tracing::info!(url = self.source.url(), error = %e, "connection to turbine catalog failed");
        })?;
        let total = fetched.len();
        let usable: Arc<[CatalogRow]> = fetched
            .into_iter()
            .filter(CatalogRow::has_usable_curve)
            .collect();
        tracing::info!(total, usable = usable.len(), "turbine catalog cached");

        *rows = Some(Arc::clone(&usable));
        Ok(usable)
    }

    pub fn is_populated(&self) -> bool {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
