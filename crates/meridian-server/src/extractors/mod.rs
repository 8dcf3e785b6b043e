//! Request extractors for the config-file routes.

pub mod client_ip;
pub mod path;
pub mod query;

pub use client_ip::ClientIp;
pub use path::ConfigFilePath;
pub use query::ConfigFileQuery;
