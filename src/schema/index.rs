//! Index definition validation
//!
//! Rules, checked in order:
//! - the index is a non-empty list
//! - every element is an object naming an attribute
//! - no attribute appears twice
//! - every attribute is declared, every type is hash/range/static/proj
//! - range orders are asc or desc when given
//! - static elements need a range element in the same list
//! - at least one hash element
//!
//! The result is reordered into hash, static, range, proj groups, keeping the
//! input order within each group.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::{AttributeType, IndexElement, IndexKind, IndexSchema, SortOrder};

/// Validates one raw index list against the declared attributes.
pub fn validate_index(
    attributes: &BTreeMap<String, AttributeType>,
    raw: Option<&Value>,
) -> SchemaResult<IndexSchema> {
    let entries = match raw.and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => return Err(SchemaError::empty_index(raw)),
    };

    let mut named = Vec::with_capacity(entries.len());
    for entry in entries {
        let attribute = entry
            .get("attribute")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaError::invalid_index_element(entry))?;
        named.push((attribute, entry));
    }

    let mut seen = HashSet::with_capacity(named.len());
    if !named.iter().all(|(attr, _)| seen.insert(*attr)) {
        return Err(SchemaError::duplicate_index_entries());
    }

    let has_range = named
        .iter()
        .any(|(_, entry)| entry.get("type").and_then(Value::as_str) == Some("range"));

    let mut elements = Vec::with_capacity(named.len());
    for (attribute, entry) in named {
        if !attributes.contains_key(attribute) {
            return Err(SchemaError::index_attribute_missing(entry));
        }

        let kind = entry
            .get("type")
            .and_then(Value::as_str)
            .and_then(IndexKind::parse)
            .ok_or_else(|| SchemaError::invalid_index_element(entry))?;

        let mut element = IndexElement::new(attribute, kind);
        match kind {
            IndexKind::Range => {
                element.order = parse_order(entry)?;
            }
            IndexKind::Static if !has_range => {
                return Err(SchemaError::static_without_range());
            }
            IndexKind::Hash | IndexKind::Static | IndexKind::Proj => {}
        }
        elements.push(element);
    }

    if !elements.iter().any(|e| e.kind == IndexKind::Hash) {
        return Err(SchemaError::missing_hash());
    }

    Ok(IndexSchema::from_validated(elements))
}

fn parse_order(entry: &Value) -> SchemaResult<Option<SortOrder>> {
    match entry.get("order") {
        None | Some(Value::Null) => Ok(None),
        Some(order) => order
            .as_str()
            .and_then(SortOrder::parse)
            .map(Some)
            .ok_or_else(|| SchemaError::invalid_order(order, entry)),
    }
}
