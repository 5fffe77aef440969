//! CLI command implementations

use std::path::Path;

use serde_json::{json, Value};

use crate::observability::{log_event_with_fields, Event, Logger};
use crate::schema::{
    validate_document, Column, DocumentLoader, RawColumns, SchemaResult, RAW_COLUMN_REGISTRY,
};

use super::args::Command;
use super::config::Config;
use super::errors::CliResult;
use super::io::{read_stdin, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate { file, config } => validate(&file, config.as_deref()),
        Command::Types => types(),
    }
}

/// Validate a column document and report the result
///
/// On success prints the validated columns (unless `quiet`). On failure
/// prints an error object and returns the error.
pub fn validate(file: &Path, config_path: Option<&Path>) -> CliResult<()> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    Logger::set_min_severity(config.severity()?);
    log_event_with_fields(Event::ConfigLoaded, &[("log_level", config.log_level.as_str())]);

    let format = config.document_format(file);
    let document = if file == Path::new("-") {
        DocumentLoader::parse_str(&read_stdin()?, format)?
    } else {
        DocumentLoader::load_path(file, format)?
    };
    let source = file.display().to_string();
    log_event_with_fields(Event::DocumentLoaded, &[("path", source.as_str())]);

    match check_document(&document) {
        Ok(columns) => {
            let count = columns.len().to_string();
            log_event_with_fields(
                Event::ValidationComplete,
                &[("columns", count.as_str()), ("path", source.as_str())],
            );
            if !config.quiet {
                write_response(report(&columns))?;
            }
            Ok(())
        }
        Err(e) => {
            log_event_with_fields(
                Event::ValidationFailed,
                &[("code", e.code().code()), ("path", source.as_str())],
            );
            write_error(e.code().code(), &e.to_string())?;
            Err(e.into())
        }
    }
}

/// Validates a decoded document, logging each accepted column.
pub fn check_document(document: &Value) -> SchemaResult<RawColumns> {
    log_event_with_fields(Event::ValidationStart, &[]);
    let columns = validate_document(document)?;
    for column in &columns {
        log_event_with_fields(
            Event::ColumnValidated,
            &[("name", column.name()), ("type", column.discriminator())],
        );
    }
    Ok(columns)
}

/// List the registered column types
pub fn types() -> CliResult<()> {
    write_response(json!({ "types": RAW_COLUMN_REGISTRY.discriminators() }))
}

/// Report built from the capability view only
fn report(columns: &RawColumns) -> Value {
    let entries: Vec<Value> = columns
        .iter()
        .map(|c| {
            json!({
                "name": c.name(),
                "type": c.column_type(),
                "resource_kind": c.resource_kind(),
                "compute": c.compute(),
            })
        })
        .collect();
    json!({ "columns": entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_report_uses_capability_fields() {
        let columns = validate_document(&json!([
            {"name": "age", "type": "INT_COLUMN", "compute": {"executors": 1}},
            {"name": "city", "type": "STRING_COLUMN"}
        ]))
        .unwrap();

        let report = report(&columns);
        assert_eq!(report["columns"][0]["name"], "age");
        assert_eq!(report["columns"][0]["type"], "INT_COLUMN");
        assert_eq!(report["columns"][0]["resource_kind"], "raw_column");
        assert_eq!(report["columns"][0]["compute"]["executors"], 1);
        assert_eq!(report["columns"][1]["compute"], Value::Null);
    }

    #[test]
    fn test_validate_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("columns.yaml");
        fs::write(
            &path,
            "raw_columns:\n  - name: age\n    type: INT_COLUMN\n    min: 0\n    max: 120\n",
        )
        .unwrap();

        assert!(validate(&path, None).is_ok());
    }

    #[test]
    fn test_validate_reports_schema_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("columns.json");
        fs::write(
            &path,
            r#"[{"name": "x", "type": "STRING_COLUMN"}, {"name": "x", "type": "INT_COLUMN"}]"#,
        )
        .unwrap();

        let err = validate(&path, None).unwrap_err();
        assert!(matches!(err, CliError::Schema(_)));
        assert_eq!(err.code_str(), "RAWCOL_DUPLICATE_NAME");
    }

    #[test]
    fn test_validate_bad_config() {
        let temp_dir = TempDir::new().unwrap();
        let doc = temp_dir.path().join("columns.json");
        fs::write(&doc, "[]").unwrap();
        let config = temp_dir.path().join("rawcol.json");
        fs::write(&config, r#"{"format": "xml"}"#).unwrap();

        let err = validate(&doc, Some(&config)).unwrap_err();
        assert_eq!(err.code_str(), "RAWCOL_CLI_CONFIG_ERROR");
    }
}
