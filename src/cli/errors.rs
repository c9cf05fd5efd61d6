//! CLI-specific error types
//!
//! A CLI error stops the command. Rejected schemas and requests are not CLI
//! errors; they are reported on stdout and processing continues.

use std::fmt;
use std::io;

use crate::request::RequestError;
use crate::schema::SchemaError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// A schema file could not be loaded
    SchemaLoadFailed,
    /// A request could not be handled
    InvalidRequest,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TBL_CLI_CONFIG_ERROR",
            Self::IoError => "TBL_CLI_IO_ERROR",
            Self::SchemaLoadFailed => "TBL_CLI_SCHEMA_LOAD_FAILED",
            Self::InvalidRequest => "TBL_CLI_INVALID_REQUEST",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn schema_load_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SchemaLoadFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

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

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::schema_load_failed(e.to_string())
    }
}

impl From<RequestError> for CliError {
    fn from(e: RequestError) -> Self {
        Self::new(CliErrorCode::InvalidRequest, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_conversion_keeps_code() {
        let err: CliError = SchemaError::missing_hash().into();
        assert_eq!(err.code(), &CliErrorCode::SchemaLoadFailed);
        assert!(err.message().contains("TBL_SCHEMA_INVALID_INDEX"));
    }

    #[test]
    fn test_display() {
        let err = CliError::config_error("bad");
        assert_eq!(err.to_string(), "TBL_CLI_CONFIG_ERROR: bad");
    }
}
