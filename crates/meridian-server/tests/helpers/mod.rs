#![allow(dead_code)]

//! Shared harness for integration tests.

pub mod client;

use std::sync::Arc;

use meridian_core::ResolvedConfig;
use meridian_server::backends::memory::{
    ClusterWatchKeyAssembler, MemoryGrayRules, MemoryNamespaceIndex, MemoryResolver,
};
use meridian_server::resolve::{ConfigResolver, GrayReleaseRules, NamespaceIndex};
use meridian_server::{
    create_router_with_state, AppState, CacheSettings, ConfigCache, ConfigFileService, ReleaseBus,
    ReleaseListener, WatchIndex,
};

use self::client::TestClient;

pub const RELEASE_TOPIC: &str = "meridian-release";

/// A fully wired server over in-memory backends, with direct handles on
/// every collaborator so tests can seed data and observe cache state.
pub struct TestHarness {
    pub client: TestClient,
    pub resolver: Arc<MemoryResolver>,
    pub gray_rules: Arc<MemoryGrayRules>,
    pub namespaces: Arc<MemoryNamespaceIndex>,
    pub cache: ConfigCache,
    pub watch_index: Arc<WatchIndex>,
    pub bus: Arc<ReleaseBus>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_cache_settings(CacheSettings::default())
    }

    pub fn with_cache_settings(settings: CacheSettings) -> Self {
        let resolver = Arc::new(MemoryResolver::new());
        let gray_rules = Arc::new(MemoryGrayRules::new());
        let namespaces = Arc::new(MemoryNamespaceIndex::new());
        let watch_index = Arc::new(WatchIndex::new());
        let cache = ConfigCache::new(settings, Arc::clone(&watch_index));
        let bus = Arc::new(ReleaseBus::new());

        let service = ConfigFileService::new(
            Arc::clone(&resolver) as Arc<dyn ConfigResolver>,
            Arc::clone(&gray_rules) as Arc<dyn GrayReleaseRules>,
            Arc::new(ClusterWatchKeyAssembler::new()),
            Arc::clone(&namespaces) as Arc<dyn NamespaceIndex>,
            cache.clone(),
            Arc::clone(&watch_index),
        );
        let state = AppState::new(Arc::new(service));
        let client = TestClient::new(create_router_with_state(state));

        Self {
            client,
            resolver,
            gray_rules,
            namespaces,
            cache,
            watch_index,
            bus,
        }
    }

    /// Publishes a release for (app, cluster, namespace) in the resolver.
    pub fn seed(&self, app_id: &str, cluster: &str, namespace: &str, pairs: &[(&str, &str)]) {
        let configurations = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.resolver.set_release(
            ResolvedConfig::new(app_id, cluster, namespace, "20240101000000-abc")
                .with_configurations(configurations),
        );
    }

    /// A listener wired to this harness's cache and index.
    pub fn listener(&self) -> ReleaseListener {
        ReleaseListener::new(
            self.cache.clone(),
            Arc::clone(&self.watch_index),
            RELEASE_TOPIC,
        )
    }
}
