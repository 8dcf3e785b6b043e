//! In-memory collaborator backends.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use thiserror::Error;

use meridian_core::ResolvedConfig;

use crate::cache::CLUSTER_NAMESPACE_SEPARATOR;
use crate::resolve::{
    ConfigResolver, GrayReleaseRules, NamespaceIndex, ResolveError, ResolveRequest,
    WatchKeyAssembler,
};

const DEFAULT_CLUSTER: &str = "default";

/// (app, cluster, namespace)
type ReleaseCoordinate = (String, String, String);

/// Resolver backed by a map of released configurations.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    releases: RwLock<HashMap<ReleaseCoordinate, ResolvedConfig>>,
    queries: AtomicU64,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Default::default()
    }

    /// Publishes (or replaces) the release for the config's coordinate.
    pub fn set_release(&self, config: ResolvedConfig) {
        let coordinate = (
            config.app_id.clone(),
            config.cluster.clone(),
            config.namespace_name.clone(),
        );
        self.releases.write().insert(coordinate, config);
    }

    pub fn remove_release(&self, app_id: &str, cluster: &str, namespace: &str) {
        self.releases.write().remove(&(
            app_id.to_string(),
            cluster.to_string(),
            namespace.to_string(),
        ));
    }

    /// How many times `query_config` ran. The test harness uses this to
    /// assert cache hits and gray-release bypasses.
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ConfigResolver for MemoryResolver {
    async fn query_config(
        &self,
        request: &ResolveRequest,
    ) -> Result<Option<ResolvedConfig>, ResolveError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let coordinate = (
            request.app_id.clone(),
            request.cluster.clone(),
            request.namespace.clone(),
        );
        Ok(self.releases.read().get(&coordinate).cloned())
    }
}

/// Gray-release rules keyed by (app, subject, namespace) where the subject
/// matches either the client ip or the client label.
#[derive(Debug, Default)]
pub struct MemoryGrayRules {
    rules: RwLock<HashSet<(String, String, String)>>,
}

impl MemoryGrayRules {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_rule(&self, app_id: &str, subject: &str, namespace: &str) {
        self.rules.write().insert((
            app_id.to_string(),
            subject.to_string(),
            namespace.to_string(),
        ));
    }

    pub fn remove_rule(&self, app_id: &str, subject: &str, namespace: &str) {
        self.rules.write().remove(&(
            app_id.to_string(),
            subject.to_string(),
            namespace.to_string(),
        ));
    }
}

impl GrayReleaseRules for MemoryGrayRules {
    fn has_gray_release_rule(
        &self,
        app_id: &str,
        client_ip: Option<&str>,
        client_label: Option<&str>,
        namespace: &str,
    ) -> bool {
        let rules = self.rules.read();
        [client_ip, client_label].iter().flatten().any(|subject| {
            rules.contains(&(
                app_id.to_string(),
                subject.to_string(),
                namespace.to_string(),
            ))
        })
    }
}

/// Canonical namespace spellings, looked up case-insensitively per app.
#[derive(Debug, Default)]
pub struct MemoryNamespaceIndex {
    canonical: RwLock<HashMap<(String, String), String>>,
}

impl MemoryNamespaceIndex {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn register(&self, app_id: &str, namespace: &str) {
        self.canonical.write().insert(
            (app_id.to_lowercase(), namespace.to_lowercase()),
            namespace.to_string(),
        );
    }
}

impl NamespaceIndex for MemoryNamespaceIndex {
    fn canonical_namespace(&self, app_id: &str, namespace: &str) -> Option<String> {
        self.canonical
            .read()
            .get(&(app_id.to_lowercase(), namespace.to_lowercase()))
            .cloned()
    }
}

/// Watch keys for the requested cluster, the data-center cluster when it
/// differs, and the `default` cluster fallback.
#[derive(Debug)]
pub struct ClusterWatchKeyAssembler {
    default_cluster: String,
}

impl ClusterWatchKeyAssembler {
    pub fn new() -> Self {
        Self {
            default_cluster: DEFAULT_CLUSTER.to_string(),
        }
    }
}

impl Default for ClusterWatchKeyAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchKeyAssembler for ClusterWatchKeyAssembler {
    fn assemble_all_watch_keys(
        &self,
        app_id: &str,
        cluster: &str,
        namespace: &str,
        data_center: Option<&str>,
    ) -> HashSet<String> {
        let mut watch_keys = HashSet::new();
        watch_keys.insert(join_watch_key(app_id, cluster, namespace));

        if let Some(data_center) = data_center.map(str::trim).filter(|dc| !dc.is_empty()) {
            if data_center != cluster {
                watch_keys.insert(join_watch_key(app_id, data_center, namespace));
            }
        }
        if cluster != self.default_cluster {
            watch_keys.insert(join_watch_key(app_id, &self.default_cluster, namespace));
        }

        watch_keys
    }
}

fn join_watch_key(app_id: &str, cluster: &str, namespace: &str) -> String {
    let mut key = String::with_capacity(app_id.len() + cluster.len() + namespace.len() + 2);
    key.push_str(app_id);
    key.push(CLUSTER_NAMESPACE_SEPARATOR);
    key.push_str(cluster);
    key.push(CLUSTER_NAMESPACE_SEPARATOR);
    key.push_str(namespace);
    key
}

/// Seed file for the standalone binary: released namespaces plus optional
/// gray rules, parsed from JSON.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seed {
    pub namespaces: Vec<SeedNamespace>,
    #[serde(default)]
    pub gray_rules: Vec<SeedGrayRule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedNamespace {
    pub app_id: String,
    #[serde(default = "default_cluster")]
    pub cluster: String,
    pub namespace: String,
    #[serde(default)]
    pub configurations: BTreeMap<String, String>,
    #[serde(default = "default_release_key")]
    pub release_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedGrayRule {
    pub app_id: String,
    pub subject: String,
    pub namespace: String,
}

fn default_cluster() -> String {
    DEFAULT_CLUSTER.to_string()
}

fn default_release_key() -> String {
    "seed".to_string()
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Seed {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Materializes the seed into backend instances.
    pub fn build(self) -> (MemoryResolver, MemoryGrayRules, MemoryNamespaceIndex) {
        let resolver = MemoryResolver::new();
        let gray_rules = MemoryGrayRules::new();
        let namespaces = MemoryNamespaceIndex::new();

        for entry in self.namespaces {
            namespaces.register(&entry.app_id, &entry.namespace);
            resolver.set_release(
                ResolvedConfig::new(entry.app_id, entry.cluster, entry.namespace, entry.release_key)
                    .with_configurations(entry.configurations),
            );
        }
        for rule in self.gray_rules {
            gray_rules.add_rule(&rule.app_id, &rule.subject, &rule.namespace);
        }

        (resolver, gray_rules, namespaces)
    }
}
