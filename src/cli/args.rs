//! CLI argument definitions using clap
//!
//! Commands:
//! - tabledef normalize [--config <path>]
//! - tabledef get --schema <file>... [--config <path>]
//! - tabledef put --schema <file>... [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabledef - wide-column table schema and request validator
#[derive(Parser, Debug)]
#[command(name = "tabledef")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize one raw table schema read from stdin
    Normalize {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate get requests, one JSON object per stdin line
    Get {
        /// Table schema file (repeatable)
        #[arg(long = "schema")]
        schemas: Vec<PathBuf>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate put requests, one JSON object per stdin line
    Put {
        /// Table schema file (repeatable)
        #[arg(long = "schema")]
        schemas: Vec<PathBuf>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
