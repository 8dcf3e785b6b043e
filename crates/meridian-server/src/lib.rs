pub mod backends;
pub mod bus;
pub mod cache;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod resolve;
pub mod server;
pub mod service;
pub mod settings;
pub mod state;

pub use bus::{ReleaseBus, ReleaseMessage};
pub use cache::{CacheKey, CacheSettings, ConfigCache, ReleaseListener, WatchIndex};
pub use error::AppError;
pub use server::{create_router_with_metrics, create_router_with_state, run_server_with_state};
pub use service::{ConfigFileRequest, ConfigFileService};
pub use settings::ServerSettings;
pub use state::AppState;
