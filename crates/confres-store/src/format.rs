//! Document formats for option files.
//!
//! Format is detected from the file extension:
//! - `.json` -> JSON
//! - `.yaml`, `.yml` -> YAML
//! - `.toml` -> TOML
//!
//! Every format is read into a `serde_json::Value` first, then decoded as
//! either a single option or a list of options.

use std::path::Path;

use confres_model::ConfigurationOption;
use serde_json::Value;

use crate::error::{Error, Result};

/// Key under which a document may hold a list of options
pub const OPTIONS_KEY: &str = "configurationOptions";

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Detect the format of `path` from its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "toml" => Ok(DocumentFormat::Toml),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "JSON",
            DocumentFormat::Yaml => "YAML",
            DocumentFormat::Toml => "TOML",
        }
    }

    /// Parse `content` into a JSON value
    pub fn parse(&self, content: &str, path: &Path) -> Result<Value> {
        let parsed = match self {
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::Parse {
            path: path.to_path_buf(),
            format: self.name(),
            message,
        })
    }
}

/// Decode a parsed document into its options.
///
/// A document is a single option object, an array of options, or an object
/// whose only key is `configurationOptions` holding an array (the form TOML
/// needs for lists).
pub fn decode_options(document: Value, path: &Path) -> Result<Vec<ConfigurationOption>> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) if map.len() == 1 && map.contains_key(OPTIONS_KEY) => {
            match map.remove(OPTIONS_KEY) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(Error::Parse {
                        path: path.to_path_buf(),
                        format: "option",
                        message: format!("\"{OPTIONS_KEY}\" must be a list"),
                    });
                }
            }
        }
        single => vec![single],
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<ConfigurationOption>(item).map_err(|e| Error::Parse {
                path: path.to_path_buf(),
                format: "option",
                message: e.to_string(),
            })
        })
        .collect()
}

/// Read, parse and decode one option file
pub fn load_options(path: &Path) -> Result<Vec<ConfigurationOption>> {
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let document = format.parse(&content, path)?;
    decode_options(document, path)
}
