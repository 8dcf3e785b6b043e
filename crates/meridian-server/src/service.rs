//! The config-file query pipeline.

use std::sync::Arc;

use tracing::{debug, warn};

use meridian_core::{render, OutputFormat};

use crate::cache::keys::{self, CacheKey};
use crate::cache::{ConfigCache, WatchIndex};
use crate::metrics::cache::record_event;
use crate::resolve::{
    ConfigResolver, GrayReleaseRules, NamespaceIndex, ResolveError, ResolveRequest,
    WatchKeyAssembler, NO_RELEASE_KEY,
};

/// One incoming config-file request, already stripped of HTTP framing.
/// `client_ip` carries the query parameter when given, otherwise the peer
/// address the HTTP layer observed.
#[derive(Debug, Clone)]
pub struct ConfigFileRequest {
    pub app_id: String,
    pub cluster: String,
    pub namespace: String,
    pub data_center: Option<String>,
    pub client_ip: Option<String>,
    pub client_label: Option<String>,
}

/// The request-handling state machine: gray check, cache lookup, resolution,
/// anti-pollution double check, insertion and watch registration.
///
/// Cache and watch index are process-wide values owned here; nothing in the
/// pipeline lives in module-level state.
pub struct ConfigFileService {
    resolver: Arc<dyn ConfigResolver>,
    gray_rules: Arc<dyn GrayReleaseRules>,
    watch_key_assembler: Arc<dyn WatchKeyAssembler>,
    namespaces: Arc<dyn NamespaceIndex>,
    cache: ConfigCache,
    watch_index: Arc<WatchIndex>,
}

impl ConfigFileService {
    pub fn new(
        resolver: Arc<dyn ConfigResolver>,
        gray_rules: Arc<dyn GrayReleaseRules>,
        watch_key_assembler: Arc<dyn WatchKeyAssembler>,
        namespaces: Arc<dyn NamespaceIndex>,
        cache: ConfigCache,
        watch_index: Arc<WatchIndex>,
    ) -> Self {
        Self {
            resolver,
            gray_rules,
            watch_key_assembler,
            namespaces,
            cache,
            watch_index,
        }
    }

    pub fn cache(&self) -> &ConfigCache {
        &self.cache
    }

    pub fn watch_index(&self) -> &Arc<WatchIndex> {
        &self.watch_index
    }

    /// Serves one request. `Ok(None)` means the resolver found no
    /// configuration (or it could not be rendered) and maps to 404.
    pub async fn query_config(
        &self,
        output: OutputFormat,
        request: &ConfigFileRequest,
    ) -> Result<Option<String>, ResolveError> {
        let namespace =
            keys::normalize_namespace(self.namespaces.as_ref(), &request.app_id, &request.namespace);
        let client_ip = request.client_ip.as_deref();
        let client_label = request.client_label.as_deref();

        let cache_key = CacheKey::new(
            output,
            &request.app_id,
            &request.cluster,
            &namespace,
            request.data_center.as_deref(),
        );

        // personalized payloads never touch the shared cache
        if self
            .gray_rules
            .has_gray_release_rule(&request.app_id, client_ip, client_label, &namespace)
        {
            record_event("gray_release");
            debug!(cache_key = %cache_key, "gray release rule, bypassing cache");
            return self.load_config(output, request, &namespace).await;
        }

        if let Some(payload) = self.cache.get_if_present(&cache_key).await {
            return Ok(Some(payload.to_string()));
        }

        let Some(payload) = self.load_config(output, request, &namespace).await? else {
            return Ok(None);
        };

        // A rule committed between the first check and here must not reach
        // the shared cache; discard and resolve the personalized payload.
        if self
            .gray_rules
            .has_gray_release_rule(&request.app_id, client_ip, client_label, &namespace)
        {
            record_event("gray_release_conflict");
            return self.load_config(output, request, &namespace).await;
        }

        let shared: Arc<str> = Arc::from(payload.as_str());
        self.cache.put(cache_key.clone(), shared).await;
        debug!(cache_key = %cache_key, "adding cache for key");

        let watch_keys = self.watch_key_assembler.assemble_all_watch_keys(
            &request.app_id,
            &request.cluster,
            &namespace,
            request.data_center.as_deref(),
        );
        self.watch_index.register(&cache_key, watch_keys);
        debug!(cache_key = %cache_key, "added cache for key");

        Ok(Some(payload))
    }

    /// Resolves and renders, outside the cache. Rendering failures surface
    /// as not-found to the client.
    async fn load_config(
        &self,
        output: OutputFormat,
        request: &ConfigFileRequest,
        namespace: &str,
    ) -> Result<Option<String>, ResolveError> {
        let resolve_request = ResolveRequest {
            app_id: request.app_id.clone(),
            cluster: request.cluster.clone(),
            namespace: namespace.to_string(),
            data_center: request.data_center.clone(),
            release_key: NO_RELEASE_KEY.to_string(),
            client_ip: request.client_ip.clone(),
            client_label: request.client_label.clone(),
        };

        let Some(resolved) = self.resolver.query_config(&resolve_request).await? else {
            return Ok(None);
        };

        match render::render(output, &resolved) {
            Ok(payload) => Ok(Some(payload)),
            Err(error) => {
                warn!(namespace, %error, "payload rendering failed");
                Ok(None)
            }
        }
    }
}
