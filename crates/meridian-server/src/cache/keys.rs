//! Cache key assembly and namespace normalization.

use std::fmt;

use meridian_core::OutputFormat;

use crate::resolve::NamespaceIndex;

/// Separator joining the segments of cache keys and watch keys.
pub const CLUSTER_NAMESPACE_SEPARATOR: char = '+';

const PROPERTIES_SUFFIX: &str = ".properties";

/// Fingerprint of one shared (non-personalized) rendered payload.
///
/// Segments join as `format+appId+cluster+namespace[+dataCenter]`; the
/// data-center segment is present only when non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    output: OutputFormat,
    app_id: String,
    cluster: String,
    namespace: String,
    data_center: Option<String>,
}

impl CacheKey {
    pub fn new(
        output: OutputFormat,
        app_id: impl Into<String>,
        cluster: impl Into<String>,
        namespace: impl Into<String>,
        data_center: Option<&str>,
    ) -> Self {
        Self {
            output,
            app_id: app_id.into(),
            cluster: cluster.into(),
            namespace: namespace.into(),
            data_center: data_center
                .map(str::trim)
                .filter(|dc| !dc.is_empty())
                .map(str::to_owned),
        }
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}",
            self.output,
            self.app_id,
            self.cluster,
            self.namespace,
            sep = CLUSTER_NAMESPACE_SEPARATOR
        )?;
        if let Some(data_center) = &self.data_center {
            write!(f, "{}{}", CLUSTER_NAMESPACE_SEPARATOR, data_center)?;
        }
        Ok(())
    }
}

/// Strips a trailing `.properties` suffix (case-sensitive).
pub fn filter_namespace_name(namespace: &str) -> &str {
    namespace.strip_suffix(PROPERTIES_SUFFIX).unwrap_or(namespace)
}

/// Suffix filtering plus canonical-case lookup: `FX.apollo` and `fx.apollo`
/// resolve to the same spelling when the namespace is known for the app.
pub fn normalize_namespace(index: &dyn NamespaceIndex, app_id: &str, namespace: &str) -> String {
    let filtered = filter_namespace_name(namespace);
    index
        .canonical_namespace(app_id, filtered)
        .unwrap_or_else(|| filtered.to_string())
}
