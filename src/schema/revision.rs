//! Revision retention policy validation
//!
//! A policy governs which historical revisions of a row the engine keeps:
//! - `all`: every revision
//! - `latest`: the newest `count` revisions, older ones expire after `grace_ttl`
//! - `interval`: up to `count` revisions per `interval`-second bucket, plus the oldest
//!
//! The legacy `{type: "ttl", ttl: N}` form is rewritten to
//! `{type: "latest", count: 0, grace_ttl: N}`.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::errors::{SchemaError, SchemaResult};

/// Retention policy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionPolicyType {
    All,
    Latest,
    Interval,
}

impl RevisionPolicyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevisionPolicyType::All => "all",
            RevisionPolicyType::Latest => "latest",
            RevisionPolicyType::Interval => "interval",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "all" => Some(RevisionPolicyType::All),
            "latest" => Some(RevisionPolicyType::Latest),
            "interval" => Some(RevisionPolicyType::Interval),
            _ => None,
        }
    }
}

/// Validated revision retention policy.
///
/// Numeric fields keep the exact JSON number the client supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevisionPolicy {
    #[serde(rename = "type")]
    pub policy_type: RevisionPolicyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_ttl: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Number>,
}

impl RevisionPolicy {
    /// Policy that keeps every revision
    pub fn all() -> Self {
        Self {
            policy_type: RevisionPolicyType::All,
            count: None,
            grace_ttl: None,
            interval: None,
        }
    }
}

/// Validates and normalizes an optional raw policy.
///
/// Returns `None` when no policy is configured.
pub fn validate_revision_policy(raw: Option<&Value>) -> SchemaResult<Option<RevisionPolicy>> {
    let raw = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };

    let obj = raw.as_object().ok_or_else(|| {
        SchemaError::invalid_revision_policy(format!("Invalid revision retention policy: {}", raw))
    })?;

    let rewritten;
    let obj = if obj.get("type").and_then(Value::as_str) == Some("ttl") {
        rewritten = rewrite_legacy_ttl(obj)?;
        &rewritten
    } else {
        obj
    };

    let mut policy = RevisionPolicy::all();
    for (key, val) in obj {
        match key.as_str() {
            "type" => {
                policy.policy_type = val
                    .as_str()
                    .and_then(RevisionPolicyType::parse)
                    .ok_or_else(|| {
                        SchemaError::invalid_revision_policy(format!(
                            "Invalid revision retention policy type {}",
                            display_value(val)
                        ))
                    })?;
            }
            "grace_ttl" => policy.grace_ttl = Some(expect_number(key, val)?),
            "count" => policy.count = Some(expect_number(key, val)?),
            "interval" => policy.interval = Some(expect_number(key, val)?),
            _ => {
                return Err(SchemaError::invalid_revision_policy(format!(
                    "Unknown revision policy attribute: {}",
                    key
                )));
            }
        }
    }

    Ok(Some(policy))
}

/// `{type: "ttl", ttl: N}` becomes `{type: "latest", count: 0, grace_ttl: N}`
fn rewrite_legacy_ttl(obj: &Map<String, Value>) -> SchemaResult<Map<String, Value>> {
    let ttl = match obj.get("ttl") {
        Some(Value::Number(n)) => n.clone(),
        _ => {
            return Err(SchemaError::invalid_revision_policy("ttl must be a number"));
        }
    };

    let mut out = Map::new();
    out.insert("type".into(), Value::from("latest"));
    out.insert("count".into(), Value::from(0));
    out.insert("grace_ttl".into(), Value::Number(ttl));
    Ok(out)
}

fn expect_number(key: &str, val: &Value) -> SchemaResult<Number> {
    match val {
        Value::Number(n) => Ok(n.clone()),
        _ => Err(SchemaError::invalid_revision_policy(format!(
            "{} must be a number",
            key
        ))),
    }
}

/// Strings render bare, everything else as JSON
fn display_value(val: &Value) -> String {
    match val {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
