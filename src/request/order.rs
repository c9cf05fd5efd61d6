//! Sort order validation

use serde_json::{Map, Value};

use crate::schema::{IndexKind, IndexSchema, SortOrder};

use super::errors::{RequestError, RequestResult};

/// Checks a read's `order` map: each key must be a range column of the
/// index and each direction `asc` or `desc`.
pub fn validate_order(order: &Map<String, Value>, index: &IndexSchema) -> RequestResult<()> {
    for (attribute, direction) in order {
        let valid_direction = direction
            .as_str()
            .is_some_and(|d| SortOrder::parse(d).is_some());
        if !valid_direction {
            return Err(RequestError::invalid_sort_order(attribute, direction));
        }

        match index.key_element(attribute).map(|e| e.kind) {
            Some(IndexKind::Range) => {}
            Some(kind) => return Err(RequestError::order_not_range(attribute, kind.as_str())),
            None => return Err(RequestError::order_not_range(attribute, "not indexed")),
        }
    }
    Ok(())
}
