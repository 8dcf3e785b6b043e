//! Invalidation fan-out driven by release messages.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bus::{ReleaseBus, ReleaseMessage};
use crate::cache::config_cache::ConfigCache;
use crate::cache::watch_index::WatchIndex;

/// Consumes release-change messages and invalidates every cache entry
/// watching the released key. Idempotent: duplicate or reordered messages
/// produce at most extra invalidations.
pub struct ReleaseListener {
    cache: ConfigCache,
    watch_index: Arc<WatchIndex>,
    release_topic: String,
}

impl ReleaseListener {
    pub fn new(
        cache: ConfigCache,
        watch_index: Arc<WatchIndex>,
        release_topic: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            watch_index,
            release_topic: release_topic.into(),
        }
    }

    /// Handles one delivered message. Exactly one call per delivery.
    pub async fn handle_message(&self, message: &ReleaseMessage, channel: &str) {
        info!(channel, content = %message.content, "release message received");

        if channel != self.release_topic || message.content.is_empty() {
            return;
        }

        // detached snapshot; mutators may run while we fan out
        let affected = self.watch_index.cache_keys_for(&message.content);
        if affected.is_empty() {
            return;
        }

        for cache_key in &affected {
            debug!(cache_key = %cache_key, "invalidate cache key");
            self.cache.invalidate(cache_key).await;
        }
        // flush listener delivery so reverse edges drop now, not at the
        // next maintenance window
        self.cache.run_pending().await;
    }

    /// Subscribes to the release topic and consumes deliveries on a
    /// dedicated task. A lagged subscription logs and keeps going; missed
    /// invalidations are bounded by the write TTL.
    pub fn spawn(self, bus: &ReleaseBus) -> JoinHandle<()> {
        let mut receiver = bus.subscribe(&self.release_topic);
        let channel = self.release_topic.clone();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(message) => self.handle_message(&message, &channel).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "release bus lagged; stale entries persist until ttl");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::config_cache::CacheSettings;
    use crate::cache::keys::CacheKey;
    use meridian_core::OutputFormat;

    const TOPIC: &str = "meridian-release";

    fn key(namespace: &str) -> CacheKey {
        CacheKey::new(OutputFormat::Properties, "app1", "default", namespace, None)
    }

    fn listener() -> (ReleaseListener, ConfigCache, Arc<WatchIndex>) {
        let watch_index = Arc::new(WatchIndex::new());
        let cache = ConfigCache::new(CacheSettings::default(), Arc::clone(&watch_index));
        let listener = ReleaseListener::new(cache.clone(), Arc::clone(&watch_index), TOPIC);
        (listener, cache, watch_index)
    }

    async fn prime(cache: &ConfigCache, watch_index: &WatchIndex, namespace: &str, watched: &str) {
        let cache_key = key(namespace);
        cache.put(cache_key.clone(), "k=v\n".into()).await;
        watch_index.register(&cache_key, [watched.to_string()]);
    }

    #[tokio::test]
    async fn message_invalidates_watching_entries() {
        let (listener, cache, watch_index) = listener();
        prime(&cache, &watch_index, "ns1", "app1+default+ns1").await;

        listener
            .handle_message(&ReleaseMessage::new("app1+default+ns1"), TOPIC)
            .await;

        assert!(cache.get_if_present(&key("ns1")).await.is_none());
        assert_eq!(watch_index.cache_key_count(), 0);
        assert_eq!(watch_index.watched_key_count(), 0);
    }

    #[tokio::test]
    async fn unrelated_watch_key_leaves_entries_alone() {
        let (listener, cache, watch_index) = listener();
        prime(&cache, &watch_index, "ns1", "app1+default+ns1").await;

        listener
            .handle_message(&ReleaseMessage::new("app1+default+other"), TOPIC)
            .await;

        assert!(cache.get_if_present(&key("ns1")).await.is_some());
    }

    #[tokio::test]
    async fn foreign_channel_is_ignored() {
        let (listener, cache, watch_index) = listener();
        prime(&cache, &watch_index, "ns1", "app1+default+ns1").await;

        listener
            .handle_message(&ReleaseMessage::new("app1+default+ns1"), "other-topic")
            .await;

        assert!(cache.get_if_present(&key("ns1")).await.is_some());
    }

    #[tokio::test]
    async fn empty_content_is_ignored() {
        let (listener, cache, watch_index) = listener();
        prime(&cache, &watch_index, "ns1", "app1+default+ns1").await;

        listener.handle_message(&ReleaseMessage::new(""), TOPIC).await;

        assert!(cache.get_if_present(&key("ns1")).await.is_some());
    }

    #[tokio::test]
    async fn duplicate_delivery_is_idempotent() {
        let (listener, cache, watch_index) = listener();
        prime(&cache, &watch_index, "ns1", "app1+default+ns1").await;

        for _ in 0..3 {
            listener
                .handle_message(&ReleaseMessage::new("app1+default+ns1"), TOPIC)
                .await;
        }

        assert!(cache.get_if_present(&key("ns1")).await.is_none());
        assert_eq!(watch_index.cache_key_count(), 0);
    }

    #[tokio::test]
    async fn shared_watch_key_fans_out_to_all_entries() {
        let (listener, cache, watch_index) = listener();
        prime(&cache, &watch_index, "ns1", "app1+default+shared").await;
        prime(&cache, &watch_index, "ns2", "app1+default+shared").await;

        listener
            .handle_message(&ReleaseMessage::new("app1+default+shared"), TOPIC)
            .await;

        assert!(cache.get_if_present(&key("ns1")).await.is_none());
        assert!(cache.get_if_present(&key("ns2")).await.is_none());
    }
}
