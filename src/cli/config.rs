//! Configuration file for the CLI
//!
//! Every field is optional; a missing file argument means all defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::schema::DocumentFormat;

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Lowest log severity written (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Document format: "auto", "json" or "yaml" (default "auto")
    #[serde(default = "default_format")]
    pub format: String,

    /// Suppress the success report
    #[serde(default)]
    pub quiet: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "auto".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: default_format(),
            quiet: false,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;

        match self.format.as_str() {
            "auto" | "json" | "yaml" => Ok(()),
            other => Err(CliError::config_error(format!(
                "Invalid format: '{}'. Must be 'auto', 'json' or 'yaml'.",
                other
            ))),
        }
    }

    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }

    /// Format to decode `path` with; "auto" goes by extension.
    pub fn document_format(&self, path: &Path) -> DocumentFormat {
        match self.format.as_str() {
            "json" => DocumentFormat::Json,
            "yaml" => DocumentFormat::Yaml,
            _ => DocumentFormat::from_path(path),
        }
    }
}
