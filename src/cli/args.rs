//! CLI argument definitions using clap
//!
//! Commands:
//! - rawcol validate <FILE> [--config <path>]
//! - rawcol types

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rawcol - validate raw column declarations
#[derive(Parser, Debug)]
#[command(name = "rawcol")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a column document (JSON or YAML, `-` for stdin)
    Validate {
        /// Path to the column document
        file: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the registered column types
    Types,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
