//! Request validation
//!
//! Checks get and put requests against a normalized table schema before
//! they reach storage. Validation is pure: it never touches the schema
//! catalog or storage and never logs.

mod ast;
mod errors;
mod order;
mod predicate;
mod projection;
mod validator;

pub use ast::{Condition, GetRequest, PredicateOp, Projection, PutRequest};
pub use errors::{RequestError, RequestErrorCode, RequestResult};
pub use order::validate_order;
pub use predicate::validate_predicate;
pub use projection::validate_projection;
pub use validator::RequestValidator;
