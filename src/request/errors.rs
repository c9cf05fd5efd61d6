//! Request error types
//!
//! Error codes:
//! - TBL_REQUEST_MALFORMED
//! - TBL_REQUEST_NO_SCHEMA
//! - TBL_REQUEST_UNKNOWN_INDEX
//! - TBL_REQUEST_INDEXES_UNSUPPORTED
//! - TBL_REQUEST_INVALID_PROJECTION
//! - TBL_REQUEST_NOT_PRIMARY_KEY
//! - TBL_REQUEST_UNDEFINED_ATTRIBUTE
//! - TBL_REQUEST_ILLEGAL_OPERATOR
//! - TBL_REQUEST_NON_EQ_ON_NON_RANGE
//! - TBL_REQUEST_PREDICATE_AFTER_NON_EQ
//! - TBL_REQUEST_INVALID_SORT_ORDER
//! - TBL_REQUEST_ORDER_NOT_RANGE
//! - TBL_REQUEST_INVALID_LIMIT
//! - TBL_REQUEST_MISSING_KEY
//! - TBL_REQUEST_UNKNOWN_ATTRIBUTE
//! - TBL_REQUEST_INVALID_TTL

use std::fmt;

use serde_json::Value;

/// Request-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorCode {
    /// Request body could not be decoded
    Malformed,
    /// No schema for the named table
    NoSchema,
    /// Named secondary index does not exist
    UnknownIndex,
    /// Secondary indexes disabled by the dialect
    IndexesUnsupported,
    /// Projection names an undeclared attribute
    InvalidProjection,
    /// Key-only condition on a non-key attribute
    NotPrimaryKey,
    /// Condition without a value
    UndefinedAttribute,
    /// Unknown predicate operator
    IllegalOperator,
    /// Non-eq condition on a column that is not a range key
    NonEqOnNonRange,
    /// Any condition after a non-eq condition
    PredicateAfterNonEq,
    /// Sort direction other than asc/desc
    InvalidSortOrder,
    /// Sort on a column that is not a range key
    OrderNotRange,
    /// Limit that is not a positive integer
    InvalidLimit,
    /// Write without a required key attribute
    MissingKey,
    /// Write of an undeclared attribute
    UnknownAttribute,
    /// Row TTL that is not a non-negative integer
    InvalidTtl,
}

impl RequestErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            RequestErrorCode::Malformed => "TBL_REQUEST_MALFORMED",
            RequestErrorCode::NoSchema => "TBL_REQUEST_NO_SCHEMA",
            RequestErrorCode::UnknownIndex => "TBL_REQUEST_UNKNOWN_INDEX",
            RequestErrorCode::IndexesUnsupported => "TBL_REQUEST_INDEXES_UNSUPPORTED",
            RequestErrorCode::InvalidProjection => "TBL_REQUEST_INVALID_PROJECTION",
            RequestErrorCode::NotPrimaryKey => "TBL_REQUEST_NOT_PRIMARY_KEY",
            RequestErrorCode::UndefinedAttribute => "TBL_REQUEST_UNDEFINED_ATTRIBUTE",
            RequestErrorCode::IllegalOperator => "TBL_REQUEST_ILLEGAL_OPERATOR",
            RequestErrorCode::NonEqOnNonRange => "TBL_REQUEST_NON_EQ_ON_NON_RANGE",
            RequestErrorCode::PredicateAfterNonEq => "TBL_REQUEST_PREDICATE_AFTER_NON_EQ",
            RequestErrorCode::InvalidSortOrder => "TBL_REQUEST_INVALID_SORT_ORDER",
            RequestErrorCode::OrderNotRange => "TBL_REQUEST_ORDER_NOT_RANGE",
            RequestErrorCode::InvalidLimit => "TBL_REQUEST_INVALID_LIMIT",
            RequestErrorCode::MissingKey => "TBL_REQUEST_MISSING_KEY",
            RequestErrorCode::UnknownAttribute => "TBL_REQUEST_UNKNOWN_ATTRIBUTE",
            RequestErrorCode::InvalidTtl => "TBL_REQUEST_INVALID_TTL",
        }
    }
}

impl fmt::Display for RequestErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Request error type with full context
#[derive(Debug, Clone, PartialEq)]
pub struct RequestError {
    /// Error code
    code: RequestErrorCode,
    /// Human-readable message
    message: String,
    /// Attribute name if applicable
    attribute: Option<String>,
}

impl RequestError {
    fn new(code: RequestErrorCode, message: String, attribute: Option<&str>) -> Self {
        Self {
            code,
            message,
            attribute: attribute.map(String::from),
        }
    }

    /// Request body could not be decoded
    pub fn malformed(reason: impl fmt::Display) -> Self {
        Self::new(
            RequestErrorCode::Malformed,
            format!("Invalid query. Malformed request: {}", reason),
            None,
        )
    }

    /// No schema for the table
    pub fn no_schema(table: &str) -> Self {
        Self::new(
            RequestErrorCode::NoSchema,
            format!("Invalid query. No schema for {}", table),
            None,
        )
    }

    /// Named secondary index does not exist
    pub fn unknown_index(index: &str) -> Self {
        Self::new(
            RequestErrorCode::UnknownIndex,
            format!("Invalid query. Index does not exist: {}", index),
            None,
        )
    }

    /// Secondary indexes disabled by the dialect
    pub fn indexes_unsupported() -> Self {
        Self::new(
            RequestErrorCode::IndexesUnsupported,
            "Invalid query. Secondary indexes are not supported".into(),
            None,
        )
    }

    /// Projection names an undeclared attribute
    pub fn projection_not_in_schema(attribute: &str) -> Self {
        Self::new(
            RequestErrorCode::InvalidProjection,
            format!(
                "Invalid query. Projection element {} not in the schema",
                attribute
            ),
            Some(attribute),
        )
    }

    /// Key-only condition on a non-key attribute
    pub fn not_primary_key(attribute: &str) -> Self {
        Self::new(
            RequestErrorCode::NotPrimaryKey,
            format!(
                "Invalid query. Attribute {} is not a part of primary key and can't be in condition",
                attribute
            ),
            Some(attribute),
        )
    }

    /// Condition without a value
    pub fn undefined_attribute(attribute: &str) -> Self {
        Self::new(
            RequestErrorCode::UndefinedAttribute,
            format!("Invalid query. Attribute {} is undefined", attribute),
            Some(attribute),
        )
    }

    /// Unknown predicate operator
    pub fn illegal_operator(attribute: &str, condition: &Value) -> Self {
        Self::new(
            RequestErrorCode::IllegalOperator,
            format!("Illegal predicate operator for {}", condition),
            Some(attribute),
        )
    }

    /// Non-eq condition on a column that is not a range key
    pub fn non_eq_on_non_range(attribute: &str) -> Self {
        Self::new(
            RequestErrorCode::NonEqOnNonRange,
            format!(
                "Invalid query. Non-eq conditions allowed only on range columns: {}",
                attribute
            ),
            Some(attribute),
        )
    }

    /// Any condition after a non-eq condition
    pub fn predicate_after_non_eq(attribute: &str, op: &str, previous: &str) -> Self {
        Self::new(
            RequestErrorCode::PredicateAfterNonEq,
            format!("Invalid query. Found {} on {} after {}", op, attribute, previous),
            Some(attribute),
        )
    }

    /// Sort direction other than asc/desc
    pub fn invalid_sort_order(attribute: &str, direction: &Value) -> Self {
        Self::new(
            RequestErrorCode::InvalidSortOrder,
            format!("Invalid sort order {} on key {}", direction, attribute),
            Some(attribute),
        )
    }

    /// Sort on a column that is not a range key
    pub fn order_not_range(attribute: &str, actual: &str) -> Self {
        Self::new(
            RequestErrorCode::OrderNotRange,
            format!(
                "Cannot order on attribute {}; needs to be a range index, but is {}",
                attribute, actual
            ),
            Some(attribute),
        )
    }

    /// Limit that is not a positive integer
    pub fn invalid_limit(limit: &Value) -> Self {
        Self::new(
            RequestErrorCode::InvalidLimit,
            format!("Invalid query. Limit must be a positive integer, got {}", limit),
            None,
        )
    }

    /// Write without a required key attribute
    pub fn missing_key(attribute: &str, request: &Value) -> Self {
        Self::new(
            RequestErrorCode::MissingKey,
            format!("Index attribute \"{}\" missing in {}", attribute, request),
            Some(attribute),
        )
    }

    /// Write of an undeclared attribute
    pub fn unknown_attribute(attribute: &str) -> Self {
        Self::new(
            RequestErrorCode::UnknownAttribute,
            format!("Invalid query. Unknown attribute {}", attribute),
            Some(attribute),
        )
    }

    /// Row TTL that is not a non-negative integer
    pub fn invalid_ttl(attribute: &str, value: &Value) -> Self {
        Self::new(
            RequestErrorCode::InvalidTtl,
            format!(
                "Invalid query. {} must be a non-negative integer, got {}",
                attribute, value
            ),
            Some(attribute),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> RequestErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the attribute name if applicable
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for RequestError {}

/// Result type for request validation
pub type RequestResult<T> = Result<T, RequestError>;
