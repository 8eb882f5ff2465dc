//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, so keys
//! that are written once and never read again still get reclaimed.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlStore;

/// Spawns a background task that purges expired entries every `interval`.
///
/// The task sleeps first, then runs one purge pass, forever. A pass holds the
/// store's write lock without awaiting, so aborting the returned handle lets
/// an in-flight pass finish and prevents any further pass.
///
/// Must be called from within a tokio runtime.
///
/// # Example
/// ```ignore
/// let store = Arc::new(TtlStore::<String>::new());
/// let sweep_handle = spawn_sweep_task(store.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V>(store: Arc<TtlStore<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            "Starting cache expiry sweep"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.purge_expired();

            if removed > 0 {
                info!(removed, remaining = store.len(), "Cache sweep removed expired entries");
            } else {
                debug!("Cache sweep found no expired entries");
            }
        }
    })
}
