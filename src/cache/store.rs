//! TTL Store Module
//!
//! Main cache engine: a string-keyed map of entries with per-entry expiry,
//! lazy eviction on read and a bulk purge used by the background sweep.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::lock;
use crate::cache::{CacheEntry, CacheStats, StatsRecorder};

// == TTL Store ==
/// Thread-safe cache storage with TTL expiry.
///
/// All operations are synchronous and never block on anything but the
/// internal lock. Share the store between threads with `Arc<TtlStore<V>>`.
#[derive(Debug)]
pub struct TtlStore<V> {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Activity counters
    stats: StatsRecorder,
    /// Set by `close`; guarded by the `entries` write lock for writers
    closed: AtomicBool,
}

enum Lookup<R> {
    Absent,
    Expired,
    Live(Option<R>),
}

impl<V> Default for TtlStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TtlStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: StatsRecorder::new(),
            closed: AtomicBool::new(false),
        }
    }

    // == Set ==
    /// Stores a value under `key`, expiring `ttl` from now.
    ///
    /// Any prior entry for the key is replaced unconditionally and its expiry
    /// clock restarts. A zero `ttl` is accepted; the entry is then a miss on
    /// the next read. Returns `false` without storing once the store has
    /// been closed.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) -> bool {
        let key = key.into();
        let entry = CacheEntry::new(value, ttl);

        let mut entries = lock::write(&self.entries, "set");
        // Checked under the write lock so it cannot interleave with close().
        if self.closed.load(Ordering::SeqCst) {
            return false;
        }
        if entries.insert(key, entry).is_some() {
            debug!(ttl_ms = ttl.as_millis() as u64, "cache entry overwritten");
        }
        true
    }

    // == Get ==
    /// Returns the live value for `key`, or `None` if absent or expired.
    ///
    /// An expired entry is removed before the miss is reported. The removal
    /// re-checks expiry under the write lock so that an entry refreshed by a
    /// concurrent `set` in between survives.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.get_with(key, |value| Some(value.clone()))
    }

    /// Looks up the live value for `key` and maps it with `f`.
    ///
    /// The read counts as a hit only when `f` returns `Some`; a live entry
    /// that `f` rejects is a miss. Expired entries are evicted as in
    /// [`get`](Self::get).
    pub fn get_with<R>(&self, key: &str, f: impl FnOnce(&V) -> Option<R>) -> Option<R> {
        let found = {
            let entries = lock::read(&self.entries, "get");
            match entries.get(key) {
                None => Lookup::Absent,
                Some(entry) if !entry.is_expired() => Lookup::Live(f(&entry.value)),
                Some(_) => Lookup::Expired,
            }
        };

        match found {
            Lookup::Live(Some(value)) => {
                self.stats.record_hit();
                Some(value)
            }
            Lookup::Live(None) | Lookup::Absent => {
                self.stats.record_miss();
                None
            }
            Lookup::Expired => {
                self.evict_if_expired(key);
                self.stats.record_miss();
                None
            }
        }
    }

    fn evict_if_expired(&self, key: &str) {
        let mut entries = lock::write(&self.entries, "get.evict");
        let expired = entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(Instant::now()));

        if expired {
            entries.remove(key);
            self.stats.record_expired(1);
            debug!(key, "lazily evicted expired entry");
        }
    }

    // == Delete ==
    /// Removes the entry for `key`. Returns whether an entry existed.
    ///
    /// Deleting an absent key is a no-op.
    pub fn delete(&self, key: &str) -> bool {
        lock::write(&self.entries, "delete").remove(key).is_some()
    }

    // == Remove Matching ==
    /// Removes every key containing `pattern` as a case-sensitive substring.
    ///
    /// Scans all stored keys, expired or not. Returns the number removed.
    pub fn remove_matching(&self, pattern: &str) -> usize {
        let mut entries = lock::write(&self.entries, "remove_matching");
        let before = entries.len();
        entries.retain(|key, _| !key.contains(pattern));
        let removed = before - entries.len();

        self.stats.record_invalidated(removed);
        removed
    }

    // == Purge Expired ==
    /// Removes all expired entries in one pass. Returns the number removed.
    ///
    /// Expiry is evaluated under the same write lock that performs the
    /// removal, so a `set` that raced in with a fresh expiry is kept.
    pub fn purge_expired(&self) -> usize {
        let mut entries = lock::write(&self.entries, "purge_expired");
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();

        self.stats.record_expired(removed);
        removed
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&self) {
        lock::write(&self.entries, "clear").clear();
    }

    // == Close ==
    /// Removes every entry and rejects all later writes.
    ///
    /// A `set` racing with this either lands before it (and is cleared) or
    /// after it (and is rejected).
    pub fn close(&self) {
        let mut entries = lock::write(&self.entries, "close");
        self.closed.store(true, Ordering::SeqCst);
        entries.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    // == Probes ==
    /// Number of physically stored entries, including expired ones not yet
    /// reclaimed.
    pub fn len(&self) -> usize {
        lock::read(&self.entries, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        lock::read(&self.entries, "keys").keys().cloned().collect()
    }

    /// Remaining lifetime of the entry for `key`, if it is live. Does not
    /// evict and does not count as a read in the stats.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        lock::read(&self.entries, "ttl_remaining")
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(CacheEntry::ttl_remaining)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }
}
