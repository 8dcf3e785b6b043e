//! Modulo de renderizado de payloads.
//!
//! Convierte una configuracion resuelta al cuerpo servido al cliente:
//! - Properties (.properties de Java)
//! - JSON (objeto clave-valor)
//! - Raw (el documento nativo del namespace)

pub mod json;
pub mod properties;

use crate::config::ResolvedConfig;
use crate::error::{RenderError, Result};
use crate::format::{ConfigFileFormat, OutputFormat};

/// Renders `config` in the requested output format.
pub fn render(output: OutputFormat, config: &ResolvedConfig) -> Result<String> {
    match output {
        OutputFormat::Properties => Ok(properties::to_string(&config.configurations)),
        OutputFormat::Json => json::to_string(&config.configurations),
        OutputFormat::Raw => raw_content(config),
    }
}

/// Properties namespaces render as properties; every other format serves the
/// pre-rendered document stored under the reserved `content` key.
fn raw_content(config: &ResolvedConfig) -> Result<String> {
    let format = ConfigFileFormat::from_namespace(&config.namespace_name);
    if format == ConfigFileFormat::Properties {
        return Ok(properties::to_string(&config.configurations));
    }

    config
        .content()
        .map(str::to_owned)
        .ok_or_else(|| RenderError::MissingContent {
            namespace: config.namespace_name.clone(),
            format,
        })
}
