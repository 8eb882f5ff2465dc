//! Cache Module
//!
//! In-memory caching with per-entry TTL, lazy and eager expiry, a
//! deterministic key scheme and substring invalidation.

mod entry;
mod facade;
pub mod keys;
mod lock;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use facade::{CachedValue, StorefrontCache};
pub use keys::KeyKind;
pub use stats::{CacheStats, StatsRecorder};
pub use store::TtlStore;
