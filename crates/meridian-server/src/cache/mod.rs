//! Cache subsystem: key assembly, the weight/TTL-bounded payload store, the
//! watch-key index, and release-driven invalidation.

pub mod config_cache;
pub mod invalidation;
pub mod keys;
pub mod watch_index;

// Re-exports
pub use config_cache::{CacheSettings, ConfigCache};
pub use invalidation::ReleaseListener;
pub use keys::{CacheKey, CLUSTER_NAMESPACE_SEPARATOR};
pub use watch_index::WatchIndex;
