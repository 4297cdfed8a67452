//! Cache Store Module
//!
//! TTL-expiring map from cache keys to captured responses.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheEntry, CachedResponse, Clock, KeyPattern, SystemClock};

// == Cache Store ==
/// Key/value storage with per-entry expiration.
///
/// Expired entries stay in the map until [`cleanup_expired`](Self::cleanup_expired)
/// runs, but every read checks the expiration time, so they are never
/// observable.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Time source for expiration
    clock: Arc<dyn Clock>,
    /// Bumped by every invalidation (delete, pattern removal, clear)
    generation: u64,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store driven by `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
            generation: 0,
        }
    }

    // == Set ==
    /// Stores a value under `key`, replacing any previous entry and
    /// restarting its TTL.
    pub fn set(&mut self, key: impl Into<String>, value: CachedResponse, ttl_seconds: u64) {
        let entry = CacheEntry::new(value, ttl_seconds, self.clock.now_ms());
        self.entries.insert(key.into(), entry);
    }

    /// Stores a value only if no invalidation happened since `generation`
    /// was read. Returns whether the value was stored.
    pub fn set_if_generation(
        &mut self,
        key: impl Into<String>,
        value: CachedResponse,
        ttl_seconds: u64,
        generation: u64,
    ) -> bool {
        if self.generation != generation {
            return false;
        }
        self.set(key, value, ttl_seconds);
        true
    }

    // == Generation ==
    /// Current invalidation generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Get ==
    /// Returns the live value for `key`.
    ///
    /// Reads never extend an entry's lifetime.
    pub fn get(&self, key: &str) -> Option<CachedResponse> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes `key`. Returns whether a live entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.generation = self.generation.wrapping_add(1);
        let now = self.clock.now_ms();
        self.entries
            .remove(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Keys ==
    /// Lists live keys in sorted order, optionally filtered by `pattern`.
    pub fn keys(&self, pattern: Option<&KeyPattern>) -> Vec<String> {
        let now = self.clock.now_ms();
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .filter(|(key, _)| pattern.map_or(true, |p| p.matches(key)))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    // == Remove Matching ==
    /// Removes every key matching `pattern`. Returns the number of live
    /// entries removed; matching expired entries are dropped uncounted.
    pub fn remove_matching(&mut self, pattern: &KeyPattern) -> usize {
        self.generation = self.generation.wrapping_add(1);
        let now = self.clock.now_ms();
        let mut removed = 0;
        self.entries.retain(|key, entry| {
            if !pattern.matches(key) {
                return true;
            }
            if !entry.is_expired(now) {
                removed += 1;
            }
            false
        });
        removed
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.entries.clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        let now = self.clock.now_ms();
        self.entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Size ==
    /// Total body bytes held by live entries.
    pub fn size_bytes(&self) -> usize {
        let now = self.clock.now_ms();
        self.entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.len())
            .sum()
    }
}
