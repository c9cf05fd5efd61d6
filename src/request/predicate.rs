//! Predicate validation
//!
//! A wide-column read can only scan one range dimension, so a predicate may
//! hold at most one non-eq condition, and it must be the last condition given.

use serde_json::{Map, Value};

use crate::schema::{IndexKind, IndexSchema};

use super::ast::{Condition, PredicateOp};
use super::errors::{RequestError, RequestResult};

/// Validates a predicate map against an index.
///
/// Conditions are checked in the order the client gave them. With
/// `primary_key_only`, every attribute must be a hash or range key of the
/// index; otherwise any attribute may carry an equality condition.
pub fn validate_predicate(
    predicate: &Map<String, Value>,
    index: &IndexSchema,
    primary_key_only: bool,
) -> RequestResult<()> {
    let mut non_eq_found: Option<PredicateOp> = None;

    for (attribute, raw) in predicate {
        let element = index.key_element(attribute);

        if let Some(previous) = non_eq_found {
            let op = Condition::parse(attribute, raw).map_or("condition", |c| c.op().as_str());
            return Err(RequestError::predicate_after_non_eq(
                attribute,
                op,
                previous.as_str(),
            ));
        }

        if primary_key_only && !element.is_some_and(|e| e.kind.is_key()) {
            return Err(RequestError::not_primary_key(attribute));
        }

        let op = Condition::parse(attribute, raw)?.op();
        if !op.is_eq() {
            if element.map(|e| e.kind) != Some(IndexKind::Range) {
                return Err(RequestError::non_eq_on_non_range(attribute));
            }
            non_eq_found = Some(op);
        }
    }

    Ok(())
}
