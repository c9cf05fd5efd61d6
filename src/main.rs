//! tabledef CLI entry point
//!
//! Parses arguments, dispatches to the CLI module, and exits non-zero on
//! configuration, I/O or schema-file failures. The failure is reported once,
//! as a structured `COMMAND_FAILED` log line on stderr.

use tabledef::cli;
use tabledef::observability::{log_event_with_fields, Event};

fn main() {
    if let Err(e) = cli::run() {
        log_event_with_fields(
            Event::CommandFailed,
            &[("code", e.code_str()), ("message", e.message())],
        );
        std::process::exit(1);
    }
}
