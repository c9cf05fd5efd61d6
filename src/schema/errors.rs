//! Schema error types
//!
//! Error codes:
//! - TBL_SCHEMA_MALFORMED (structural)
//! - TBL_SCHEMA_INVALID_VERSION (structural)
//! - TBL_SCHEMA_INVALID_ATTRIBUTES (structural)
//! - TBL_SCHEMA_INVALID_INDEX (structural)
//! - TBL_SCHEMA_UNKNOWN_ATTRIBUTE (reference)
//! - TBL_SCHEMA_INVALID_REVISION_POLICY (structural)
//! - TBL_SCHEMA_INVALID_OPTIONS (structural)
//! - TBL_SCHEMA_UNSUPPORTED (structural)
//! - TBL_SCHEMA_FILE (io)

use std::fmt;

use serde_json::Value;

/// Broad class of a schema failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The schema shape itself is wrong
    Structural,
    /// Something names an attribute the schema does not declare
    Reference,
    /// A schema file could not be read or parsed
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Structural => write!(f, "STRUCTURAL"),
            ErrorCategory::Reference => write!(f, "REFERENCE"),
            ErrorCategory::Io => write!(f, "IO"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema is not a JSON object
    Malformed,
    /// Version is not a positive integer
    InvalidVersion,
    /// Attributes missing, empty, or of an unknown type
    InvalidAttributes,
    /// Index list or element violates an index rule
    InvalidIndex,
    /// Index, tid or projection names an undeclared attribute
    UnknownAttribute,
    /// Revision retention policy has the wrong shape
    InvalidRevisionPolicy,
    /// Table options have the wrong shape
    InvalidOptions,
    /// Feature disabled by the active dialect
    Unsupported,
    /// Schema file could not be loaded
    SchemaFile,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::Malformed => "TBL_SCHEMA_MALFORMED",
            SchemaErrorCode::InvalidVersion => "TBL_SCHEMA_INVALID_VERSION",
            SchemaErrorCode::InvalidAttributes => "TBL_SCHEMA_INVALID_ATTRIBUTES",
            SchemaErrorCode::InvalidIndex => "TBL_SCHEMA_INVALID_INDEX",
            SchemaErrorCode::UnknownAttribute => "TBL_SCHEMA_UNKNOWN_ATTRIBUTE",
            SchemaErrorCode::InvalidRevisionPolicy => "TBL_SCHEMA_INVALID_REVISION_POLICY",
            SchemaErrorCode::InvalidOptions => "TBL_SCHEMA_INVALID_OPTIONS",
            SchemaErrorCode::Unsupported => "TBL_SCHEMA_UNSUPPORTED",
            SchemaErrorCode::SchemaFile => "TBL_SCHEMA_FILE",
        }
    }

    /// Returns the category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            SchemaErrorCode::UnknownAttribute => ErrorCategory::Reference,
            SchemaErrorCode::SchemaFile => ErrorCategory::Io,
            _ => ErrorCategory::Structural,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with full context
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
}

impl SchemaError {
    /// Create an error with an explicit code and message
    pub fn new(code: SchemaErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Schema body is not an object
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::new(SchemaErrorCode::Malformed, reason)
    }

    /// Version is neither absent nor a positive integer
    pub fn invalid_version(value: &Value) -> Self {
        Self::new(
            SchemaErrorCode::InvalidVersion,
            format!("Invalid schema version: {}", value),
        )
    }

    /// Attributes missing or empty
    pub fn attributes_required() -> Self {
        Self::new(SchemaErrorCode::InvalidAttributes, "Attributes are required")
    }

    /// Attribute declared with a type outside the catalog
    pub fn invalid_attribute_type(type_name: impl fmt::Display) -> Self {
        Self::new(
            SchemaErrorCode::InvalidAttributes,
            format!("Invalid type of attribute: {}", type_name),
        )
    }

    /// Index list missing, not a list, or empty
    pub fn empty_index(index: Option<&Value>) -> Self {
        let shown = index.map_or_else(|| "undefined".to_string(), Value::to_string);
        Self::new(
            SchemaErrorCode::InvalidIndex,
            format!("Invalid index. Must have at least one entry: {}", shown),
        )
    }

    /// Two index elements name the same attribute
    pub fn duplicate_index_entries() -> Self {
        Self::new(
            SchemaErrorCode::InvalidIndex,
            "Invalid index. Duplicate index entries.",
        )
    }

    /// Index element names an attribute the schema does not declare
    pub fn index_attribute_missing(element: &Value) -> Self {
        Self::new(
            SchemaErrorCode::UnknownAttribute,
            format!("Index element {} is not in attributes!", element),
        )
    }

    /// Index element with an unknown type or shape
    pub fn invalid_index_element(element: &Value) -> Self {
        Self::new(
            SchemaErrorCode::InvalidIndex,
            format!("Invalid index element encountered! {}", element),
        )
    }

    /// Range element with an order other than asc/desc
    pub fn invalid_order(order: &Value, element: &Value) -> Self {
        Self::new(
            SchemaErrorCode::InvalidIndex,
            format!("Invalid order {} for range index element {}", order, element),
        )
    }

    /// Static element in a list without range elements
    pub fn static_without_range() -> Self {
        Self::new(
            SchemaErrorCode::InvalidIndex,
            "Cannot create static column in table without range keys",
        )
    }

    /// No hash element in the list
    pub fn missing_hash() -> Self {
        Self::new(
            SchemaErrorCode::InvalidIndex,
            "Indexes without hash are not yet supported!",
        )
    }

    /// A non-index reference (tid, proj) to an undeclared attribute
    pub fn unknown_attribute(field: &str, attribute: &str) -> Self {
        Self::new(
            SchemaErrorCode::UnknownAttribute,
            format!("Schema {} attribute {} is not in attributes!", field, attribute),
        )
    }

    /// Revision retention policy with the wrong shape
    pub fn invalid_revision_policy(reason: impl Into<String>) -> Self {
        Self::new(SchemaErrorCode::InvalidRevisionPolicy, reason)
    }

    /// Table options with the wrong shape
    pub fn invalid_options(reason: impl Into<String>) -> Self {
        Self::new(SchemaErrorCode::InvalidOptions, reason)
    }

    /// Feature not available under the active dialect
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::new(SchemaErrorCode::Unsupported, reason)
    }

    /// Schema file could not be read or parsed
    pub fn schema_file(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            SchemaErrorCode::SchemaFile,
            format!("Schema file '{}': {}", path.into(), reason.into()),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the category
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
