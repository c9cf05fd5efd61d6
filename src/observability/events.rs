//! Observable events
//!
//! Only the CLI emits these; the validators themselves are silent.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded and validated
    ConfigLoaded,
    /// Schema files loaded into the catalog
    SchemasLoaded,
    /// A schema file could not be loaded
    SchemaLoadFailed,

    // Schemas
    /// A raw schema normalized successfully
    SchemaNormalized,
    /// A raw schema was rejected
    SchemaRejected,

    // Requests
    /// A request passed validation
    RequestValidated,
    /// A request was rejected
    RequestRejected,

    /// A command stopped on an I/O or configuration failure
    CommandFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::SchemaLoadFailed => "SCHEMA_LOAD_FAILED",
            Event::SchemaNormalized => "SCHEMA_NORMALIZED",
            Event::SchemaRejected => "SCHEMA_REJECTED",
            Event::RequestValidated => "REQUEST_VALIDATED",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::RequestValidated | Event::SchemaNormalized => Severity::Trace,
            Event::ConfigLoaded | Event::SchemasLoaded => Severity::Info,
            Event::SchemaRejected | Event::RequestRejected => Severity::Warn,
            Event::SchemaLoadFailed | Event::CommandFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
