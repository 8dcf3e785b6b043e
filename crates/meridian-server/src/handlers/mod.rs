//! HTTP handlers.

pub mod config_files;
pub mod health;
pub mod metrics;

pub use config_files::{query_config_as_json, query_config_as_properties, query_config_as_raw};
pub use health::health_check;
pub use metrics::metrics_handler;
