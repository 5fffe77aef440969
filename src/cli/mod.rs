//! CLI module for rawcol
//!
//! Provides command-line interface for:
//! - validate: check a column document and print the typed result
//! - types: list registered column types

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check_document, run, run_command, types, validate};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{read_stdin, write_error, write_response};
