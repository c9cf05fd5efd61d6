//! JSON I/O handling for CLI
//!
//! - Input: one JSON schema, or one JSON request per line
//! - Output: one JSON response object per line
//! - UTF-8 only

use std::io::{BufRead, Read, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Read a whole JSON document; a schema may span several lines
pub fn read_document<R: Read>(mut input: R) -> CliResult<String> {
    let mut content = String::new();
    input.read_to_string(&mut content)?;

    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(content)
}

/// Non-blank input lines, one request each
pub fn read_lines<R: BufRead>(input: R) -> impl Iterator<Item = CliResult<String>> {
    input.lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(Ok(line)),
        Err(e) => Some(Err(CliError::from(e))),
    })
}

/// Write a success response
pub fn write_response<W: Write>(output: &mut W, data: Value) -> CliResult<()> {
    write_line(
        output,
        &json!({
            "status": "ok",
            "data": data
        }),
    )
}

/// Write an error response
pub fn write_error<W: Write>(output: &mut W, code: &str, message: &str) -> CliResult<()> {
    write_line(
        output,
        &json!({
            "status": "error",
            "code": code,
            "message": message
        }),
    )
}

fn write_line<W: Write>(output: &mut W, response: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *output, response)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
