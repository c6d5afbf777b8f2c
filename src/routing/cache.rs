//! In-memory route list cache.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::{load_route_list, ConfigError, RouteList};
use crate::observability::metrics;

/// Shared, atomically swappable route list.
///
/// Cloning the cache clones the handle; all clones observe the same list.
/// Reads are lock-free, so one snapshot per request costs a single atomic load.
#[derive(Debug, Clone)]
pub struct RouteCache {
    inner: Arc<ArcSwap<RouteList>>,
}

impl RouteCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(RouteList::default())),
        }
    }

    /// Load the route list at `path` and swap it in.
    ///
    /// On failure the cached list is left untouched. Returns the number of
    /// route keys now cached.
    pub fn reload_from(&self, path: &Path) -> Result<usize, ConfigError> {
        let list = load_route_list(path)?;
        let count = list.len();
        self.replace(list);

        tracing::info!(path = %path.display(), route_keys = count, "Route list loaded");
        Ok(count)
    }

    /// Atomically replace the cached list.
    pub fn replace(&self, list: RouteList) {
        metrics::set_route_keys_loaded(list.len());
        self.inner.store(Arc::new(list));
    }

    /// Current snapshot of the route list (possibly empty).
    pub fn get(&self) -> Arc<RouteList> {
        self.inner.load_full()
    }

    /// Reset the cache to an empty list.
    pub fn clear(&self) {
        self.replace(RouteList::default());
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new()
    }
}
