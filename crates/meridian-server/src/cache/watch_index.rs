//! Relacion bidireccional watch-key ↔ cache-key.
//!
//! Forward (`watch key → cache keys`) drives invalidation fan-out; reverse
//! (`cache key → watch keys`) drives eviction cleanup. A single lock covers
//! both projections so every operation is linearizable and a lookup can
//! never observe a half-removed edge set.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use super::keys::CacheKey;

#[derive(Debug, Default)]
struct Projections {
    watched_to_cache: HashMap<String, HashSet<CacheKey>>,
    cache_to_watched: HashMap<CacheKey, HashSet<String>>,
}

#[derive(Debug, Default)]
pub struct WatchIndex {
    projections: Mutex<Projections>,
}

impl WatchIndex {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds every `(watch key, cache_key)` edge to both projections.
    pub fn register<I>(&self, cache_key: &CacheKey, watch_keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut guard = self.projections.lock();
        for watched_key in watch_keys {
            guard
                .watched_to_cache
                .entry(watched_key.clone())
                .or_default()
                .insert(cache_key.clone());
            guard
                .cache_to_watched
                .entry(cache_key.clone())
                .or_default()
                .insert(watched_key);
        }
    }

    /// Snapshot of the cache keys watching `watched_key`. Safe to iterate
    /// while mutators run; the snapshot is detached from the index.
    pub fn cache_keys_for(&self, watched_key: &str) -> Vec<CacheKey> {
        self.projections
            .lock()
            .watched_to_cache
            .get(watched_key)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Snapshot of the watch keys registered for `cache_key`.
    pub fn watch_keys_for(&self, cache_key: &CacheKey) -> Vec<String> {
        self.projections
            .lock()
            .cache_to_watched
            .get(cache_key)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Removes every edge touching `cache_key` from both projections.
    /// Called from the cache's eviction listener for every removal cause.
    pub fn remove_cache_key(&self, cache_key: &CacheKey) {
        let mut guard = self.projections.lock();
        let Some(watched_keys) = guard.cache_to_watched.remove(cache_key) else {
            return;
        };
        for watched_key in watched_keys {
            let now_empty = match guard.watched_to_cache.get_mut(&watched_key) {
                Some(keys) => {
                    keys.remove(cache_key);
                    keys.is_empty()
                }
                None => false,
            };
            if now_empty {
                guard.watched_to_cache.remove(&watched_key);
            }
        }
    }

    /// Number of watch keys with at least one live edge.
    pub fn watched_key_count(&self) -> usize {
        self.projections.lock().watched_to_cache.len()
    }

    /// Number of cache keys with at least one live edge.
    pub fn cache_key_count(&self) -> usize {
        self.projections.lock().cache_to_watched.len()
    }
}
