//! Meridian config-file server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meridian_server::backends::memory::{
    ClusterWatchKeyAssembler, MemoryGrayRules, MemoryNamespaceIndex, MemoryResolver, Seed,
};
use meridian_server::metrics::init_metrics;
use meridian_server::{
    run_server_with_state, AppState, ConfigCache, ConfigFileService, ReleaseBus, ReleaseListener,
    ServerSettings, WatchIndex,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ServerSettings::from_env();
    let addr = settings.socket_addr();

    tracing::info!(
        "Starting Meridian config-file server v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Max cache weight: {} bytes", settings.max_cache_weight_bytes);
    tracing::info!("Write TTL: {} minutes", settings.write_ttl_minutes);
    tracing::info!("Release topic: {}", settings.release_topic);

    // Collaborator backends: seeded from file when given, empty otherwise
    let (resolver, gray_rules, namespaces) = match &settings.seed_file {
        Some(path) => {
            tracing::info!("Loading seed file {}", path.display());
            Seed::load(path)?.build()
        }
        None => (
            MemoryResolver::new(),
            MemoryGrayRules::new(),
            MemoryNamespaceIndex::new(),
        ),
    };

    let watch_index = Arc::new(WatchIndex::new());
    let cache = ConfigCache::new(settings.cache_settings(), Arc::clone(&watch_index));

    let bus = Arc::new(ReleaseBus::new());
    let listener = ReleaseListener::new(
        cache.clone(),
        Arc::clone(&watch_index),
        settings.release_topic.clone(),
    );
    let _invalidator = listener.spawn(&bus);

    let service = ConfigFileService::new(
        Arc::new(resolver),
        Arc::new(gray_rules),
        Arc::new(ClusterWatchKeyAssembler::new()),
        Arc::new(namespaces),
        cache,
        watch_index,
    );
    let state = AppState::new(Arc::new(service));

    let prometheus_handle = init_metrics();

    run_server_with_state(addr, state, prometheus_handle).await?;

    Ok(())
}
