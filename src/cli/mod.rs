//! CLI module for tabledef
//!
//! Provides the command-line interface for:
//! - normalize: canonical form of one raw schema
//! - get: validate read requests against loaded schemas
//! - put: validate write requests against loaded schemas

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    load_config, load_schemas, normalize, run, run_command, validate_gets, validate_puts, Config,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_document, read_lines, write_error, write_response};
