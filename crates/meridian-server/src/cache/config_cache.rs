//! Payload cache using Moka.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use moka::notification::RemovalCause;

use crate::cache::keys::CacheKey;
use crate::cache::watch_index::WatchIndex;
use crate::metrics::CacheMetrics;

/// Configuracion del cache de payloads.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Peso total maximo (default: 50 MiB).
    pub max_weight_bytes: u64,
    /// Tiempo de vida desde la escritura (default: 30 minutos).
    pub write_ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_weight_bytes: 50 * 1024 * 1024,
            write_ttl: Duration::from_secs(30 * 60),
        }
    }
}

/// Weight- and write-TTL-bounded store of rendered payloads.
///
/// Every removal (expiry, weight eviction, explicit invalidation,
/// replacement) notifies the watch index so it never retains edges to dead
/// entries. The listener runs on whichever task triggered the removal; the
/// index holds its lock only inside its own operations, so the callback is
/// safe to run from request and invalidation tasks alike.
#[derive(Clone)]
pub struct ConfigCache {
    inner: Cache<CacheKey, Arc<str>>,
    metrics: CacheMetrics,
}

impl ConfigCache {
    pub fn new(settings: CacheSettings, watch_index: Arc<WatchIndex>) -> Self {
        let metrics = CacheMetrics::new();
        let eviction_metrics = metrics.clone();

        let inner = Cache::builder()
            .max_capacity(settings.max_weight_bytes)
            .time_to_live(settings.write_ttl)
            .weigher(|_key: &CacheKey, payload: &Arc<str>| {
                payload.chars().count().try_into().unwrap_or(u32::MAX)
            })
            .eviction_listener(move |cache_key: Arc<CacheKey>, _payload, cause| {
                tracing::debug!(cache_key = %cache_key, ?cause, "removing cache key");
                watch_index.remove_cache_key(&cache_key);
                eviction_metrics.record_eviction(eviction_reason(cause));
            })
            .build();

        Self { inner, metrics }
    }

    /// Non-blocking lookup.
    pub async fn get_if_present(&self, key: &CacheKey) -> Option<Arc<str>> {
        let result = self.inner.get(key).await;
        if result.is_some() {
            self.metrics.record_hit();
        } else {
            self.metrics.record_miss();
        }
        result
    }

    /// Inserts or replaces; last write wins. May trigger evictions, each of
    /// which notifies the watch index.
    pub async fn put(&self, key: CacheKey, payload: Arc<str>) {
        self.inner.insert(key, payload).await;
        self.metrics.update_weight(self.inner.weighted_size());
        self.metrics.update_entry_count(self.inner.entry_count());
    }

    /// Removes `key` if present; the eviction listener fires for it.
    pub async fn invalidate(&self, key: &CacheKey) {
        self.inner.invalidate(key).await;
    }

    /// Drains Moka's pending maintenance so eviction listeners run now.
    /// The invalidator calls this after a fan-out to keep the watch index
    /// promptly in sync.
    pub async fn run_pending(&self) {
        self.inner.run_pending_tasks().await;
        self.metrics.update_weight(self.inner.weighted_size());
        self.metrics.update_entry_count(self.inner.entry_count());
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Approximate total weight of live entries.
    pub fn weighted_size(&self) -> u64 {
        self.inner.weighted_size()
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

fn eviction_reason(cause: RemovalCause) -> &'static str {
    match cause {
        RemovalCause::Expired => "ttl",
        RemovalCause::Size => "weight",
        RemovalCause::Explicit => "explicit",
        RemovalCause::Replaced => "replaced",
    }
}
