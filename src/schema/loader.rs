//! Document loader: reads a column document from disk
//!
//! JSON and YAML are both decoded into `serde_json::Value`, so the rest
//! of the pipeline sees a single raw shape in which absent keys and
//! explicit nulls stay distinguishable. YAML can spell non-finite floats
//! (`.nan`, `.inf`) that JSON cannot hold; those are rejected on load.

use std::fs;
use std::path::Path;

use serde_json::Value;
use serde_yaml_ng::Value as YamlValue;

use super::errors::{SchemaError, SchemaResult};

/// Input encoding of a column document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` / `.yml` are YAML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Loads raw documents for validation.
pub struct DocumentLoader;

impl DocumentLoader {
    /// Reads and decodes a file.
    pub fn load_path(path: &Path, format: DocumentFormat) -> SchemaResult<Value> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_document(format!(
                "failed to read '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::parse_str(&content, format).map_err(|e| {
            SchemaError::malformed_document(format!("'{}': {}", path.display(), e.message()))
        })
    }

    /// Decodes document text.
    pub fn parse_str(content: &str, format: DocumentFormat) -> SchemaResult<Value> {
        match format {
            DocumentFormat::Json => serde_json::from_str(content)
                .map_err(|e| SchemaError::malformed_document(format!("invalid JSON: {}", e))),
            DocumentFormat::Yaml => {
                let raw: YamlValue = serde_yaml_ng::from_str(content)
                    .map_err(|e| SchemaError::malformed_document(format!("invalid YAML: {}", e)))?;
                reject_non_finite(&raw, "")?;
                serde_json::to_value(&raw)
                    .map_err(|e| SchemaError::malformed_document(format!("invalid YAML: {}", e)))
            }
        }
    }
}

/// Walks a YAML tree and fails on the first NaN or infinity.
fn reject_non_finite(value: &YamlValue, path: &str) -> SchemaResult<()> {
    match value {
        YamlValue::Number(n) => match n.as_f64() {
            Some(wide) if !wide.is_finite() => Err(SchemaError::malformed_document(format!(
                "invalid YAML: non-finite number {} at '{}'",
                wide, path
            ))),
            _ => Ok(()),
        },
        YamlValue::Sequence(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| reject_non_finite(item, &format!("{}[{}]", path, i))),
        YamlValue::Mapping(map) => map.iter().try_for_each(|(key, item)| {
            let key = key.as_str().unwrap_or("?");
            let child = if path.is_empty() {
                key.to_string()
            } else {
                format!("{}.{}", path, key)
            };
            reject_non_finite(item, &child)
        }),
        YamlValue::Tagged(tagged) => reject_non_finite(&tagged.value, path),
        _ => Ok(()),
    }
}
