//! Request structures
//!
//! Requests arrive as JSON. Predicate and order maps keep the client's key
//! order, which the predicate rules depend on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{RequestError, RequestResult};

/// Read request against a table or one of its secondary indexes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRequest {
    /// Target table
    #[serde(default)]
    pub table: String,
    /// Key conditions, attribute -> literal or `{op: value}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    /// Attributes to return
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proj: Option<Projection>,
    /// Attribute -> "asc" | "desc"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Map<String, Value>>,
    /// Secondary index to read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Value>,
    /// Opaque paging cursor from a previous response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Return each row's remaining TTL
    #[serde(default, rename = "withTTL", skip_serializing_if = "std::ops::Not::not")]
    pub with_ttl: bool,
}

impl GetRequest {
    /// Creates a request for a whole table
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Decodes a request from JSON
    pub fn from_value(value: Value) -> RequestResult<Self> {
        serde_json::from_value(value).map_err(RequestError::malformed)
    }

    /// Adds a key condition
    pub fn with_condition(mut self, attribute: impl Into<String>, condition: Value) -> Self {
        self.attributes
            .get_or_insert_with(Map::new)
            .insert(attribute.into(), condition);
        self
    }

    /// Sets the projection
    pub fn with_projection(mut self, proj: Projection) -> Self {
        self.proj = Some(proj);
        self
    }

    /// Adds a sort key
    pub fn with_order(mut self, attribute: impl Into<String>, direction: impl Into<String>) -> Self {
        self.order
            .get_or_insert_with(Map::new)
            .insert(attribute.into(), Value::String(direction.into()));
        self
    }

    /// Reads from a secondary index
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(Value::from(limit));
        self
    }
}

/// Write request for a single row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PutRequest {
    /// Target table
    #[serde(default)]
    pub table: String,
    /// Row values, attribute -> value
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Conditional-write predicate
    #[serde(default, rename = "if", skip_serializing_if = "Option::is_none")]
    pub condition: Option<Map<String, Value>>,
}

impl PutRequest {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Decodes a request from JSON
    pub fn from_value(value: Value) -> RequestResult<Self> {
        serde_json::from_value(value).map_err(RequestError::malformed)
    }

    /// Sets a row value
    pub fn with_attribute(mut self, attribute: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(attribute.into(), value);
        self
    }

    /// Adds a write condition
    pub fn with_condition(mut self, attribute: impl Into<String>, condition: Value) -> Self {
        self.condition
            .get_or_insert_with(Map::new)
            .insert(attribute.into(), condition);
        self
    }
}

/// A projection: one attribute name or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Projection {
    Single(String),
    Many(Vec<String>),
}

impl Projection {
    /// Attribute names; a lone string is a one-element list
    pub fn attributes(&self) -> &[String] {
        match self {
            Projection::Single(name) => std::slice::from_ref(name),
            Projection::Many(names) => names,
        }
    }
}

/// Predicate comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateOp {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    Between,
}

impl PredicateOp {
    /// Parses an operator name, ignoring case
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "eq" => Some(PredicateOp::Eq),
            "lt" => Some(PredicateOp::Lt),
            "gt" => Some(PredicateOp::Gt),
            "le" => Some(PredicateOp::Le),
            "ge" => Some(PredicateOp::Ge),
            "between" => Some(PredicateOp::Between),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredicateOp::Eq => "eq",
            PredicateOp::Lt => "lt",
            PredicateOp::Gt => "gt",
            PredicateOp::Le => "le",
            PredicateOp::Ge => "ge",
            PredicateOp::Between => "between",
        }
    }

    pub fn is_eq(&self) -> bool {
        matches!(self, PredicateOp::Eq)
    }
}

/// One attribute's condition: a bare literal means equality
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition<'a> {
    Literal(&'a Value),
    Operator { op: PredicateOp, value: &'a Value },
}

impl<'a> Condition<'a> {
    /// Interprets a raw condition value.
    ///
    /// `null` is an undefined condition; any object is an operator object and
    /// must hold exactly one known operator.
    ///
    /// JSON has no separate `undefined`, so `null` is rejected for write
    /// conditions too: a put cannot be conditioned on an attribute being null.
    pub fn parse(attribute: &str, raw: &'a Value) -> RequestResult<Self> {
        match raw {
            Value::Null => Err(RequestError::undefined_attribute(attribute)),
            Value::Object(obj) => {
                let mut entries = obj.iter();
                match (entries.next(), entries.next()) {
                    (Some((op, value)), None) => PredicateOp::parse(op)
                        .map(|op| Condition::Operator { op, value })
                        .ok_or_else(|| RequestError::illegal_operator(attribute, raw)),
                    _ => Err(RequestError::illegal_operator(attribute, raw)),
                }
            }
            literal => Ok(Condition::Literal(literal)),
        }
    }

    /// Effective operator; literals compare for equality
    pub fn op(&self) -> PredicateOp {
        match self {
            Condition::Literal(_) => PredicateOp::Eq,
            Condition::Operator { op, .. } => *op,
        }
    }

    pub fn value(&self) -> &'a Value {
        match self {
            Condition::Literal(value) | Condition::Operator { value, .. } => value,
        }
    }
}
