//! Meridian Core - domain types and rendering codecs
//!
//! This crate provides the foundational types for the Meridian config-file
//! server: the resolver output model, namespace format detection, and the
//! per-format payload codecs.

pub mod config;
pub mod error;
pub mod format;
pub mod render;

pub use config::{ResolvedConfig, CONFIG_CONTENT_KEY};
pub use error::{RenderError, Result};
pub use format::{ConfigFileFormat, OutputFormat};
