//! Error types for Meridian Core.
//!
//! Rendering is the only fallible operation this crate exposes; everything
//! else is total. Errors implement `std::error::Error` via `thiserror`.

use thiserror::Error;

use crate::format::ConfigFileFormat;

/// Failure while rendering a resolved configuration into a payload.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A non-properties namespace carries no `content` key to serve raw.
    #[error("namespace {namespace} ({format}) carries no raw content")]
    MissingContent {
        namespace: String,
        format: ConfigFileFormat,
    },

    /// JSON rendering failed.
    #[error("json rendering failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
