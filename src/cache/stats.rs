//! Cache Statistics Module
//!
//! Tracks cache performance metrics: hits, misses and stores.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Process-wide lookup counters.
///
/// Counters only ever increase; they reset when the process restarts.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Set ==
    pub fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn sets(&self) -> u64 {
        self.sets.load(Ordering::Relaxed)
    }

    // == Hit Rate ==
    /// Hits as a percentage of all lookups, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        hit_rate_percent(self.hits(), self.misses())
    }

    // == Snapshot ==
    /// Captures the counters together with the store's live key count and
    /// total body size.
    pub fn snapshot(&self, keys: usize, size: usize) -> CacheSnapshot {
        let hits = self.hits();
        let misses = self.misses();
        CacheSnapshot {
            keys,
            hits,
            misses,
            sets: self.sets(),
            hit_rate: hit_rate_percent(hits, misses),
            size,
        }
    }
}

fn hit_rate_percent(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64 * 100.0
    }
}

// == Cache Snapshot ==
/// Point-in-time view of the cache, serialized by the admin endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSnapshot {
    /// Live entries in the store
    pub keys: usize,
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    /// Percentage in `0.0..=100.0`
    pub hit_rate: f64,
    /// Total bytes of live response bodies
    pub size: usize,
}
