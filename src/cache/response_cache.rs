//! Response Cache Module
//!
//! The shared cache handle: a [`CacheStore`] behind an async lock plus the
//! process-wide [`CacheStats`]. The middleware, the sweep task and the admin
//! handlers all hold clones of the same `ResponseCache`.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{CacheSnapshot, CacheStats, CacheStore, CachedResponse, Clock, KeyPattern};
use crate::error::Result;

// == Response Cache ==
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    store: Arc<RwLock<CacheStore>>,
    stats: Arc<CacheStats>,
}

impl ResponseCache {
    /// Creates an empty cache driven by the system clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache driven by `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::with_clock(clock))),
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Lookup counters shared by every clone of this cache.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    // == Store Access ==
    pub async fn get(&self, key: &str) -> Option<CachedResponse> {
        self.store.read().await.get(key)
    }

    pub async fn set(&self, key: impl Into<String>, value: CachedResponse, ttl_seconds: u64) {
        self.store.write().await.set(key, value, ttl_seconds);
    }

    /// Invalidation generation; pass it to [`set_if_unchanged`](Self::set_if_unchanged).
    pub async fn generation(&self) -> u64 {
        self.store.read().await.generation()
    }

    /// Stores `value` unless a flush ran since `generation` was read.
    /// Returns whether the value was stored.
    pub async fn set_if_unchanged(
        &self,
        key: impl Into<String>,
        value: CachedResponse,
        ttl_seconds: u64,
        generation: u64,
    ) -> bool {
        self.store
            .write()
            .await
            .set_if_generation(key, value, ttl_seconds, generation)
    }

    /// Lists live keys, optionally filtered by a wildcard pattern.
    pub async fn keys(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        let pattern = pattern.map(KeyPattern::compile).transpose()?;
        Ok(self.store.read().await.keys(pattern.as_ref()))
    }

    /// Runs one sweep pass. Returns the number of expired entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    // == Snapshot ==
    pub async fn snapshot(&self) -> CacheSnapshot {
        let store = self.store.read().await;
        self.stats.snapshot(store.len(), store.size_bytes())
    }

    // == Flush All ==
    /// Empties the store. Counters are left untouched.
    pub async fn flush_all(&self) {
        self.store.write().await.clear();
        info!("Response cache flushed");
    }

    // == Flush Key ==
    /// Removes one key. Returns whether a live entry was removed.
    pub async fn flush_key(&self, key: &str) -> bool {
        let removed = self.store.write().await.delete(key);
        info!(key, removed, "Response cache key flushed");
        removed
    }

    // == Flush Pattern ==
    /// Removes every live key matching the wildcard `pattern`.
    ///
    /// The pattern is compiled before the store is touched, so an invalid
    /// pattern removes nothing.
    pub async fn flush_pattern(&self, pattern: &str) -> Result<usize> {
        let pattern = KeyPattern::compile(pattern)?;
        let removed = self.store.write().await.remove_matching(&pattern);
        info!(pattern = pattern.as_str(), removed, "Response cache pattern flushed");
        Ok(removed)
    }
}
