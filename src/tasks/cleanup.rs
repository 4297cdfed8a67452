//! TTL Sweep Task
//!
//! Background task that periodically removes expired responses from the cache.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::ResponseCache;

/// Spawns a background task that sweeps expired entries every
/// `cleanup_interval_secs` seconds (at least one).
///
/// Each pass runs in its own task. A pass that panics is logged and the loop
/// carries on with the next interval; expired entries it left behind stay
/// invisible to readers in the meantime.
///
/// Abort the returned handle to stop sweeping.
///
/// # Example
/// ```ignore
/// let cache = ResponseCache::new();
/// let sweep = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// sweep.abort();
/// ```
pub fn spawn_cleanup_task(cache: ResponseCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval_secs = cleanup_interval_secs.max(1);
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let pass = {
                let cache = cache.clone();
                tokio::spawn(async move { cache.cleanup_expired().await })
            };

            match pass.await {
                Ok(removed) if removed > 0 => {
                    info!("TTL sweep: removed {} expired entries", removed)
                }
                Ok(_) => debug!("TTL sweep: no expired entries found"),
                Err(e) => warn!("TTL sweep pass failed, retrying next interval: {}", e),
            }
        }
    })
}
