//! Collaborator seams consumed by the query pipeline.
//!
//! The config resolver, the gray-release rule index, the watch-key deriver
//! and the namespace index live outside this subsystem; the pipeline only
//! sees these traits.

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use meridian_core::ResolvedConfig;

/// Sentinel release key sent when no prior release is known (cache miss).
pub const NO_RELEASE_KEY: &str = "-1";

/// One resolution request handed to the external resolver.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub app_id: String,
    pub cluster: String,
    pub namespace: String,
    pub data_center: Option<String>,
    pub release_key: String,
    pub client_ip: Option<String>,
    pub client_label: Option<String>,
}

impl ResolveRequest {
    /// Request for the shared (non-personalized) release of a tuple.
    pub fn fresh(
        app_id: impl Into<String>,
        cluster: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            cluster: cluster.into(),
            namespace: namespace.into(),
            data_center: None,
            release_key: NO_RELEASE_KEY.to_string(),
            client_ip: None,
            client_label: None,
        }
    }
}

/// Error surfaced by the resolver boundary. Propagates to the HTTP caller;
/// the cache is never populated from a failed resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("config resolution failed: {0}")]
    Backend(String),
}

/// Resolves a request into the effective configuration, consulting the
/// release store and assembling the merged key/value map.
#[async_trait]
pub trait ConfigResolver: Send + Sync {
    async fn query_config(
        &self,
        request: &ResolveRequest,
    ) -> Result<Option<ResolvedConfig>, ResolveError>;
}

/// Answers whether a client has a gray-release override for a namespace.
/// Expected to be an in-memory lookup.
pub trait GrayReleaseRules: Send + Sync {
    fn has_gray_release_rule(
        &self,
        app_id: &str,
        client_ip: Option<&str>,
        client_label: Option<&str>,
        namespace: &str,
    ) -> bool;
}

/// Enumerates the release topics whose change must invalidate any payload
/// built from the given tuple.
pub trait WatchKeyAssembler: Send + Sync {
    fn assemble_all_watch_keys(
        &self,
        app_id: &str,
        cluster: &str,
        namespace: &str,
        data_center: Option<&str>,
    ) -> HashSet<String>;
}

/// Case-folding lookup over the namespaces known for an application.
pub trait NamespaceIndex: Send + Sync {
    /// Canonical spelling of `namespace` among the namespaces registered for
    /// `app_id`, or `None` when unknown.
    fn canonical_namespace(&self, app_id: &str, namespace: &str) -> Option<String>;
}
