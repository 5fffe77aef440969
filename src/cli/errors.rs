//! CLI-specific error types

use std::io;

use thiserror::Error;

use crate::schema::SchemaError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable or invalid
    #[error("RAWCOL_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// stdin/stdout failure
    #[error("RAWCOL_CLI_IO_ERROR: {0}")]
    Io(String),

    /// Document rejected by validation
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Config(_) => "RAWCOL_CLI_CONFIG_ERROR",
            Self::Io(_) => "RAWCOL_CLI_IO_ERROR",
            Self::Schema(e) => e.code().code(),
        }
    }

    /// Get the error message without its code
    pub fn message(&self) -> String {
        match self {
            Self::Config(msg) | Self::Io(msg) => msg.clone(),
            Self::Schema(e) => e.to_string(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
