//! Namespace formats and output renderings.

use std::fmt;

/// Native format of a namespace, carried as a suffix on its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFileFormat {
    Properties,
    Xml,
    Json,
    Yml,
    Yaml,
}

impl ConfigFileFormat {
    const ALL: [ConfigFileFormat; 5] = [
        ConfigFileFormat::Properties,
        ConfigFileFormat::Xml,
        ConfigFileFormat::Json,
        ConfigFileFormat::Yml,
        ConfigFileFormat::Yaml,
    ];

    /// Suffix value of this format, without the leading dot.
    pub fn value(&self) -> &'static str {
        match self {
            ConfigFileFormat::Properties => "properties",
            ConfigFileFormat::Xml => "xml",
            ConfigFileFormat::Json => "json",
            ConfigFileFormat::Yml => "yml",
            ConfigFileFormat::Yaml => "yaml",
        }
    }

    /// Determina el formato nativo de un namespace por su sufijo.
    /// Namespaces sin sufijo conocido son properties.
    pub fn from_namespace(namespace: &str) -> Self {
        let lower = namespace.to_lowercase();
        for format in Self::ALL {
            if lower.ends_with(&format!(".{}", format.value())) {
                return format;
            }
        }
        ConfigFileFormat::Properties
    }

    /// Content-Type served for a raw payload of this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ConfigFileFormat::Json => "application/json;charset=UTF-8",
            ConfigFileFormat::Yml | ConfigFileFormat::Yaml => "application/yaml;charset=UTF-8",
            ConfigFileFormat::Xml => "application/xml;charset=UTF-8",
            ConfigFileFormat::Properties => "text/plain;charset=UTF-8",
        }
    }
}

impl fmt::Display for ConfigFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Rendering requested by the route, independent of the namespace's
/// native format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Properties,
    Json,
    Raw,
}

impl OutputFormat {
    /// Segment identifying this rendering inside a cache key.
    pub fn value(&self) -> &'static str {
        match self {
            OutputFormat::Properties => "properties",
            OutputFormat::Json => "json",
            OutputFormat::Raw => "raw",
        }
    }

    /// Content-Type served for this rendering. Raw payloads follow the
    /// namespace suffix instead.
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Properties => "text/plain;charset=UTF-8",
            OutputFormat::Json => "application/json;charset=UTF-8",
            OutputFormat::Raw => "text/plain;charset=UTF-8",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}
