//! Cache and pipeline metrics recording.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use metrics::{counter, gauge};

/// Registra las descripciones de las metricas de cache.
/// Llamar una vez al inicio.
pub fn register_cache_metrics() {
    metrics::describe_counter!("meridian_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!("meridian_cache_misses_total", "Total number of cache misses");
    metrics::describe_counter!(
        "meridian_cache_evictions_total",
        "Total number of cache evictions, labeled by reason"
    );
    metrics::describe_counter!(
        "meridian_configfile_events_total",
        "Config-file pipeline events (gray_release, gray_release_conflict)"
    );
    metrics::describe_gauge!("meridian_cache_entries", "Current number of cached payloads");
    metrics::describe_gauge!(
        "meridian_cache_weight_bytes",
        "Current total weight of cached payloads"
    );
}

/// Recorder de metricas del cache de payloads.
/// Contadores atomicos internos para lectura barata en tests y stats.
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self {
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("meridian_cache_hits_total").increment(1);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("meridian_cache_misses_total").increment(1);
    }

    pub fn record_eviction(&self, reason: &'static str) {
        counter!("meridian_cache_evictions_total", "reason" => reason).increment(1);
    }

    pub fn update_entry_count(&self, count: u64) {
        gauge!("meridian_cache_entries").set(count as f64);
    }

    pub fn update_weight(&self, weight: u64) {
        gauge!("meridian_cache_weight_bytes").set(weight as f64);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 { 0.0 } else { hits / total }
    }
}

impl Default for CacheMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Pipeline event counter (the gray-release branches of the query pipeline).
pub fn record_event(event: &'static str) {
    counter!("meridian_configfile_events_total", "event" => event).increment(1);
}
