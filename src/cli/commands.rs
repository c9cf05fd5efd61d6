//! CLI command implementations
//!
//! Every command loads its configuration first. `get` and `put` then load
//! the schema catalog, and any failure up to that point stops the command.
//! After that, each input is answered on its own output line and a
//! rejected input never stops the stream.

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ValidationError, ValidationResult};
use crate::observability::{log_event_with_fields, Event};
use crate::request::{GetRequest, PutRequest, RequestError, RequestValidator};
use crate::schema::{Dialect, SchemaError, SchemaNormalizer, TableLoader};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_document, read_lines, write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Validation dialect (optional, defaults to the single-index regime)
    #[serde(default)]
    pub dialect: Dialect,

    /// Directory of `.json` table schemas loaded before any `--schema` file
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,
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

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if let Some(attr) = &self.dialect.row_ttl_attribute {
            if attr.trim().is_empty() {
                return Err(CliError::config_error(
                    "row_ttl_attribute must not be empty; use null to disable it",
                ));
            }
        }

        if let Some(dir) = &self.schema_dir {
            if !dir.is_dir() {
                return Err(CliError::config_error(format!(
                    "schema_dir is not a directory: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}

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
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match cmd {
        Command::Normalize { config } => {
            let config = load_config(config.as_deref())?;
            normalize(&config, stdin.lock(), &mut output)
        }
        Command::Get { schemas, config } => {
            let config = load_config(config.as_deref())?;
            let loader = load_schemas(&config, &schemas)?;
            validate_gets(&loader, stdin.lock(), &mut output)
        }
        Command::Put { schemas, config } => {
            let config = load_config(config.as_deref())?;
            let loader = load_schemas(&config, &schemas)?;
            validate_puts(&loader, stdin.lock(), &mut output)
        }
    }
}

/// Loads the configuration file, or the defaults without one
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("secondary_indexes", bool_str(config.dialect.secondary_indexes)),
            ("strict_compression", bool_str(config.dialect.strict_compression)),
        ],
    );

    Ok(config)
}

/// Builds the schema catalog from the configured directory and schema files
pub fn load_schemas(config: &Config, files: &[PathBuf]) -> CliResult<TableLoader> {
    let mut loader = TableLoader::new(config.dialect.clone());

    if let Some(dir) = &config.schema_dir {
        loader.load_dir(dir).map_err(schema_load_failed)?;
    }
    for file in files {
        loader.load_file(file).map_err(schema_load_failed)?;
    }

    if loader.table_count() == 0 {
        return Err(CliError::config_error(
            "No table schemas given; pass --schema or set schema_dir",
        ));
    }

    let count = loader.table_count().to_string();
    log_event_with_fields(Event::SchemasLoaded, &[("tables", &count)]);

    Ok(loader)
}

/// Normalizes one raw schema and writes the canonical form
pub fn normalize<R: Read, W: Write>(config: &Config, input: R, output: &mut W) -> CliResult<()> {
    let content = read_document(input)?;

    let result = serde_json::from_str::<Value>(&content)
        .map_err(|e| SchemaError::malformed(format!("Invalid JSON: {}", e)))
        .and_then(|raw| SchemaNormalizer::new(&config.dialect).normalize(&raw));

    match result {
        Ok(schema) => {
            log_event_with_fields(
                Event::SchemaNormalized,
                &[("table", schema.table().unwrap_or(""))],
            );
            write_response(output, serde_json::to_value(&schema)?)
        }
        Err(e) => {
            let err = ValidationError::from(e);
            log_event_with_fields(
                Event::SchemaRejected,
                &[("code", err.code()), ("message", err.message())],
            );
            write_error(output, err.code(), err.message())
        }
    }
}

/// Validates one get request per input line
pub fn validate_gets<R: BufRead, W: Write>(
    loader: &TableLoader,
    input: R,
    output: &mut W,
) -> CliResult<()> {
    let validator = RequestValidator::new(loader.dialect());
    validate_stream(input, output, |raw| {
        let req = GetRequest::from_value(raw)?;
        validator.validate_get(&req, loader.get(&req.table))?;
        Ok(req.table)
    })
}

/// Validates one put request per input line
pub fn validate_puts<R: BufRead, W: Write>(
    loader: &TableLoader,
    input: R,
    output: &mut W,
) -> CliResult<()> {
    let validator = RequestValidator::new(loader.dialect());
    validate_stream(input, output, |raw| {
        let req = PutRequest::from_value(raw)?;
        validator.validate_put(&req, loader.get(&req.table))?;
        Ok(req.table)
    })
}

fn validate_stream<R, W, F>(input: R, output: &mut W, validate: F) -> CliResult<()>
where
    R: BufRead,
    W: Write,
    F: Fn(Value) -> ValidationResult<String>,
{
    for line in read_lines(input) {
        let line = line?;
        let result = serde_json::from_str::<Value>(&line)
            .map_err(|e| ValidationError::from(RequestError::malformed(e)))
            .and_then(&validate);

        match result {
            Ok(table) => {
                log_event_with_fields(Event::RequestValidated, &[("table", &table)]);
                write_response(output, json!({"table": table, "valid": true}))?;
            }
            Err(err) => {
                log_event_with_fields(
                    Event::RequestRejected,
                    &[("code", err.code()), ("message", err.message())],
                );
                write_error(output, err.code(), err.message())?;
            }
        }
    }

    Ok(())
}

fn schema_load_failed(e: SchemaError) -> CliError {
    log_event_with_fields(
        Event::SchemaLoadFailed,
        &[("code", e.code().code()), ("message", e.message())],
    );
    CliError::from(e)
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
