//! tabledef - wide-column table schema normalization and request validation
//!
//! - `schema`: validates raw table schemas and produces their canonical form
//! - `request`: validates get and put requests against a normalized schema
//! - `cli`: line-oriented JSON front end for both

pub mod cli;
pub mod error;
pub mod observability;
pub mod request;
pub mod schema;

pub use error::{ValidationError, ValidationResult};
