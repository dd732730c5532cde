// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration registry.
//!
//! A [`Registry`] owns an ordered list of sources, the tree merged from their
//! subtrees, and the background refresh lifecycle. Later sources win over
//! earlier ones on merge conflicts. Lookups address the merged tree with
//! `/`-separated keys.

mod refresher;

use crate::domain::{key_path, merge, ConfigTree, ConfigValue, Result};
use crate::sources::Source;
use refresher::Refresher;
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::time::Duration;

/// Default period between two background refreshes.
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(15);

/// Shared internals of one registry.
///
/// The merged tree sits behind its own lock so readers never wait on a fetch:
/// rebuilds serialize on `rebuild_lock`, fetch with no tree lock held, and
/// take the write lock only for the final swap.
pub(crate) struct RegistryInner {
    sources: Mutex<Vec<Arc<Source>>>,
    tree: RwLock<Option<ConfigTree>>,
    rebuild_lock: Mutex<()>,
}

impl RegistryInner {
    fn new() -> Self {
        Self {
            sources: Mutex::new(Vec::new()),
            tree: RwLock::new(None),
            rebuild_lock: Mutex::new(()),
        }
    }

    fn snapshot_sources(&self) -> Vec<Arc<Source>> {
        self.sources
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Fetches every source and merges the results, in source order.
    fn load(&self) -> Result<ConfigTree> {
        let sources = self.snapshot_sources();
        tracing::debug!("rebuilding registry from {} sources", sources.len());

        let mut result = ConfigTree::new();
        for source in sources {
            let conf = source.get_conf()?;
            merge::merge_into(&mut result, conf);
        }
        Ok(result)
    }

    /// Rebuilds the merged tree and swaps it in atomically.
    ///
    /// With `reset_sources` every source cache is cleared first, forcing a
    /// full re-fetch regardless of refresh flags. An error leaves the
    /// previous tree untouched.
    pub(crate) fn rebuild(&self, reset_sources: bool) -> Result<()> {
        let _guard = self.rebuild_lock.lock().unwrap_or_else(|e| e.into_inner());

        if reset_sources {
            for source in self.snapshot_sources() {
                source.reset();
            }
        }

        let fresh = self.load()?;

        let mut tree = self.tree.write().unwrap_or_else(|e| e.into_inner());
        *tree = Some(fresh);
        Ok(())
    }
}

/// The in-memory merged configuration tree plus its refresh and lookup
/// operations.
///
/// All operations take `&self`; a registry can be shared freely between the
/// foreground and its own background refresh thread. Dropping the registry
/// stops the background thread.
///
/// # Examples
///
/// ```rust,no_run
/// use fwissr::registry::Registry;
/// use fwissr::sources::{Source, SourceOptions};
///
/// # fn main() -> fwissr::domain::Result<()> {
/// let registry = Registry::new();
/// registry.add_source(Source::file("/etc/my_app/conf", SourceOptions::default())?)?;
///
/// if let Some(host) = registry.get("/my_app/database/host")? {
///     println!("database host: {}", host);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Registry {
    inner: Arc<RegistryInner>,
    refresh_period: Duration,
    refresher: Mutex<Option<Refresher>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("refresh_period", &self.refresh_period)
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Creates a registry with the default refresh period (15 seconds).
    pub fn new() -> Self {
        Self::with_refresh_period(DEFAULT_REFRESH_PERIOD)
    }

    /// Creates a registry with an explicit refresh period.
    ///
    /// A zero period disables background refresh entirely.
    pub fn with_refresh_period(period: Duration) -> Self {
        Self {
            inner: Arc::new(RegistryInner::new()),
            refresh_period: period,
            refresher: Mutex::new(None),
        }
    }

    /// The period between two background refreshes.
    pub fn refresh_period(&self) -> Duration {
        self.refresh_period
    }

    /// Appends a source and folds its configuration into the merged tree.
    ///
    /// Also (re)starts the background refresh loop when this registry has a
    /// non-zero refresh period and at least one refreshable source. A fetch
    /// failure propagates; the source stays listed and is retried on the next
    /// rebuild.
    pub fn add_source(&self, source: Source) -> Result<()> {
        let source = Arc::new(source);
        tracing::debug!("adding configuration source '{}'", source.name());

        {
            let mut sources = self.inner.sources.lock().unwrap_or_else(|e| e.into_inner());
            sources.push(source.clone());
        }

        // Serialize with any in-flight background rebuild so the fold below
        // cannot be overwritten by a swap computed from the old source list.
        let fold = {
            let _guard = self
                .inner
                .rebuild_lock
                .lock()
                .unwrap_or_else(|e| e.into_inner());

            source.get_conf().map(|conf| {
                let mut tree = self.inner.tree.write().unwrap_or_else(|e| e.into_inner());
                merge::merge_into(tree.get_or_insert_with(ConfigTree::new), conf);
            })
        };
        fold?;

        self.ensure_refresher();
        Ok(())
    }

    /// Looks up the value at a `/`-separated key.
    ///
    /// A leading `/` is optional. A missing path is not an error: the result
    /// is `Ok(None)` the moment a segment is absent or a non-Mapping value is
    /// reached before the key is exhausted. The returned value is a deep copy
    /// and never aliases registry state.
    ///
    /// The merged tree is built on first access; a failed build propagates.
    pub fn get(&self, key: &str) -> Result<Option<ConfigValue>> {
        self.ensure_loaded()?;

        let tree = self.inner.tree.read().unwrap_or_else(|e| e.into_inner());
        let Some(tree) = tree.as_ref() else {
            return Ok(None);
        };

        let segments = key_path::split_key(key);
        let mut node = tree;
        for (depth, segment) in segments.iter().enumerate() {
            match node.get(*segment) {
                None => return Ok(None),
                Some(value) if depth == segments.len() - 1 => {
                    return Ok(Some(value.clone()));
                }
                Some(ConfigValue::Mapping(child)) => node = child,
                Some(_) => return Ok(None),
            }
        }

        // An empty key addresses the whole tree.
        Ok(Some(ConfigValue::Mapping(node.clone())))
    }

    /// Enumerates every path reachable in the merged tree, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        self.ensure_loaded()?;

        let tree = self.inner.tree.read().unwrap_or_else(|e| e.into_inner());
        Ok(tree.as_ref().map(key_path::collect_keys).unwrap_or_default())
    }

    /// Returns a full snapshot of the merged tree.
    pub fn dump(&self) -> Result<ConfigTree> {
        self.ensure_loaded()?;

        let tree = self.inner.tree.read().unwrap_or_else(|e| e.into_inner());
        Ok(tree.clone().unwrap_or_default())
    }

    /// Synchronously re-fetches every source and rebuilds the merged tree.
    ///
    /// Source caches are reset first, so even non-refreshable sources hit
    /// their backing store again.
    pub fn reload(&self) -> Result<()> {
        self.inner.rebuild(true)
    }

    /// Clears the merged tree and every source cache without re-fetching.
    ///
    /// The next read rebuilds from scratch.
    pub fn reset(&self) {
        let _guard = self
            .inner
            .rebuild_lock
            .lock()
            .unwrap_or_else(|e| e.into_inner());

        for source in self.inner.snapshot_sources() {
            source.reset();
        }

        let mut tree = self.inner.tree.write().unwrap_or_else(|e| e.into_inner());
        *tree = None;
    }

    /// Stops the background refresh thread, if one is running.
    ///
    /// Called automatically on drop. The registry stays usable afterwards;
    /// adding another refreshable source restarts the loop.
    pub fn shutdown(&self) {
        let mut slot = self.refresher.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(mut refresher) = slot.take() {
            refresher.stop();
        }
    }

    /// Builds the merged tree if no build happened yet.
    fn ensure_loaded(&self) -> Result<()> {
        {
            let tree = self.inner.tree.read().unwrap_or_else(|e| e.into_inner());
            if tree.is_some() {
                return Ok(());
            }
        }
        self.inner.rebuild(false)
    }

    /// Starts the background refresh loop if needed, idempotently.
    fn ensure_refresher(&self) {
        if self.refresh_period.is_zero() {
            return;
        }

        let any_refreshable = self
            .inner
            .snapshot_sources()
            .iter()
            .any(|source| source.can_refresh());
        if !any_refreshable {
            return;
        }

        let mut slot = self.refresher.lock().unwrap_or_else(|e| e.into_inner());
        let alive = slot.as_ref().is_some_and(Refresher::is_alive);
        if !alive {
            let weak: Weak<RegistryInner> = Arc::downgrade(&self.inner);
            *slot = Some(Refresher::spawn(weak, self.refresh_period));
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        self.shutdown();
    }
}
