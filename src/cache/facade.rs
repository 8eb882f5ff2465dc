//! Storefront cache facade.
//!
//! The one cache instance a process builds at startup and hands to every
//! consumer. Values of any `Send + Sync` type are stored type-erased and read
//! back as `Arc<T>` snapshots.

use std::any::Any;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::lock;
use crate::cache::{CacheStats, TtlStore};
use crate::config::{Config, DEFAULT_SWEEP_INTERVAL};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweep_task;

/// Type-erased payload held by the store.
pub type CachedValue = Arc<dyn Any + Send + Sync>;

// == Storefront Cache ==
/// Shared cache context: TTL store, policy and the sweep task handle.
pub struct StorefrontCache {
    store: Arc<TtlStore<CachedValue>>,
    config: Config,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl StorefrontCache {
    // == Constructors ==
    /// Creates a cache without a background sweep.
    ///
    /// Expired entries are then reclaimed only when read.
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(TtlStore::new()),
            config,
            sweeper: Mutex::new(None),
        }
    }

    /// Creates a cache and starts its expiry sweep on the current tokio
    /// runtime.
    ///
    /// A zero sweep interval falls back to the default, as `Config::from_env`
    /// does.
    pub fn with_sweeper(mut config: Config) -> Result<Self> {
        tokio::runtime::Handle::try_current().map_err(|err| {
            CacheError::Internal(format!("cache sweeper needs a tokio runtime: {err}"))
        })?;

        if config.sweep_interval.is_zero() {
            warn!(
                fallback_secs = DEFAULT_SWEEP_INTERVAL.as_secs(),
                "zero sweep interval replaced by default"
            );
            config.sweep_interval = DEFAULT_SWEEP_INTERVAL;
        }

        let cache = Self::new(config);
        let handle = spawn_sweep_task(cache.store.clone(), cache.config.sweep_interval);
        *lock::lock(&cache.sweeper, "with_sweeper") = Some(handle);
        Ok(cache)
    }

    // == Get ==
    /// Returns the cached value for `key`, or `None` on a miss.
    ///
    /// Never-set, expired and stored-as-another-type all miss alike. The
    /// returned value is shared with the cache; treat it as read-only.
    pub fn get_cached_data<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        if self.is_destroyed() {
            return None;
        }

        // Downcast inside the lookup so a type mismatch is counted as a miss.
        self.store.get_with(key, |value| {
            let typed = Arc::clone(value).downcast::<T>().ok();
            if typed.is_none() {
                debug!(
                    key,
                    expected = std::any::type_name::<T>(),
                    "cached value has another type"
                );
            }
            typed
        })
    }

    /// Remaining lifetime of the live entry under `key`.
    ///
    /// Does not evict and does not count as a read in the stats.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.store.ttl_remaining(key)
    }

    // == Set ==
    /// Caches `value` under `key` for `ttl`, or the configured default TTL.
    pub fn set_cached_data<T>(&self, key: impl Into<String>, value: T, ttl: Option<Duration>)
    where
        T: Any + Send + Sync,
    {
        self.set_shared(key, Arc::new(value), ttl);
    }

    /// Like [`set_cached_data`](Self::set_cached_data) for a value that is
    /// already behind an `Arc`.
    pub fn set_shared<T>(&self, key: impl Into<String>, value: Arc<T>, ttl: Option<Duration>)
    where
        T: Any + Send + Sync,
    {
        let key = key.into();
        let ttl = ttl.unwrap_or(self.config.default_ttl);

        if !self.store.set(key.clone(), value as CachedValue, ttl) {
            warn!(key = %key, "set on destroyed cache ignored");
        }
    }

    // == Delete ==
    /// Removes `key`. Returns whether it was stored.
    pub fn delete(&self, key: &str) -> bool {
        self.store.delete(key)
    }

    // == Invalidate ==
    /// Removes every stored key that contains `pattern`.
    ///
    /// Coarse by nature: the match is a case-sensitive substring anywhere in
    /// the key, not a prefix or glob. `"product:"` leaves
    /// `"products:electronics:1"` alone while `"product"` removes it too, so
    /// pick the most specific pattern that covers the mutation. Scans every
    /// key; call from write paths, not hot read paths.
    pub fn invalidate_cache(&self, pattern: &str) -> usize {
        let removed = self.store.remove_matching(pattern);
        if removed > 0 {
            info!(pattern, removed, "Cache invalidated");
        } else {
            debug!(pattern, "Cache invalidation matched nothing");
        }
        removed
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.store.clear();
    }

    // == Destroy ==
    /// Stops the sweep and drops every entry.
    ///
    /// No sweep pass starts after this returns. Later writes, including ones
    /// racing with this call, are ignored and later reads miss. Calling it
    /// again is harmless.
    pub fn destroy(&self) {
        if let Some(handle) = lock::lock(&self.sweeper, "destroy").take() {
            handle.abort();
        }
        self.store.close();
        info!("Cache destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.store.is_closed()
    }

    /// Whether a sweep task is scheduled and still running.
    pub fn is_sweeping(&self) -> bool {
        lock::lock(&self.sweeper, "is_sweeping")
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    // == Probes ==
    /// Number of physically stored entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// All stored keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.store.keys()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for StorefrontCache {
    fn drop(&mut self) {
        // The sweep task holds its own Arc to the store.
        if let Some(handle) = lock::lock(&self.sweeper, "drop").take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for StorefrontCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontCache")
            .field("entries", &self.store.len())
            .field("config", &self.config)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
