//! Unified validation error
//!
//! Schema normalization and request validation keep their own error types.
//! Callers that surface either kind the same way use [`ValidationError`].

use thiserror::Error;

use crate::request::RequestError;
use crate::schema::SchemaError;

/// A schema or request rejection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl ValidationError {
    /// Returns the string error code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Schema(e) => e.code().code(),
            ValidationError::Request(e) => e.code().code(),
        }
    }

    /// Returns the message without the code prefix
    pub fn message(&self) -> &str {
        match self {
            ValidationError::Schema(e) => e.message(),
            ValidationError::Request(e) => e.message(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
