//! Application state.

use std::sync::Arc;

use crate::service::ConfigFileService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<ConfigFileService>,
}

impl AppState {
    pub fn new(service: Arc<ConfigFileService>) -> Self {
        Self { service }
    }

    /// The config-file query pipeline.
    pub fn service(&self) -> &ConfigFileService {
        &self.service
    }
}
