//! Resolver output model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reserved configuration key holding the pre-rendered document of a
/// non-properties namespace (yaml/json/xml content stored upstream).
pub const CONFIG_CONTENT_KEY: &str = "content";

/// The effective configuration the resolver assembled for one
/// (app, cluster, namespace) request.
///
/// `configurations` is a sorted map so every rendering of the same release
/// is byte-identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub app_id: String,
    pub cluster: String,
    pub namespace_name: String,
    #[serde(default)]
    pub configurations: BTreeMap<String, String>,
    pub release_key: String,
}

impl ResolvedConfig {
    pub fn new(
        app_id: impl Into<String>,
        cluster: impl Into<String>,
        namespace_name: impl Into<String>,
        release_key: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            cluster: cluster.into(),
            namespace_name: namespace_name.into(),
            configurations: BTreeMap::new(),
            release_key: release_key.into(),
        }
    }

    pub fn with_configurations(mut self, configurations: BTreeMap<String, String>) -> Self {
        self.configurations = configurations;
        self
    }

    /// The raw document under the reserved `content` key, if any.
    pub fn content(&self) -> Option<&str> {
        self.configurations.get(CONFIG_CONTENT_KEY).map(String::as_str)
    }
}
