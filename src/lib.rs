//! Storefront Cache - in-process cache for a storefront backend
//!
//! A TTL store with lazy and eager expiry, a deterministic key scheme for
//! storefront entities, and substring-pattern invalidation.
//!
//! ```ignore
//! use storefront_cache::{cache::keys, Config, StorefrontCache};
//!
//! let cache = StorefrontCache::with_sweeper(Config::default())?;
//! cache.set_cached_data(keys::product(42), product, None);
//! let hit = cache.get_cached_data::<Product>(&keys::product(42));
//! cache.invalidate_cache(&keys::product(42));
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::StorefrontCache;
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
