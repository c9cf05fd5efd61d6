//! Table schema normalization
//!
//! Turns a raw JSON schema into a [`NormalizedSchema`]:
//! 1. version defaults to 1
//! 2. attributes are required and must use catalog types
//! 3. the primary index is validated and canonically ordered
//! 4. secondary indexes are validated (or rejected, per dialect)
//! 5. the revision retention policy is validated, legacy ttl rewritten
//! 6. options are validated and defaulted
//!
//! The raw value is never modified.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::dialect::Dialect;
use super::errors::{SchemaError, SchemaErrorCode, SchemaResult};
use super::index::validate_index;
use super::options::validate_options;
use super::revision::validate_revision_policy;
use super::types::{AttributeType, IndexKind, IndexSchema, NormalizedSchema, ScalarType};

/// Schema version assigned when the client gives none
pub const DEFAULT_SCHEMA_VERSION: u64 = 1;

/// Normalizer bound to a deployment dialect.
///
/// Stateless apart from the dialect, so one instance can serve any number of
/// schemas.
pub struct SchemaNormalizer<'a> {
    dialect: &'a Dialect,
}

impl<'a> SchemaNormalizer<'a> {
    /// Creates a normalizer for the given dialect.
    pub fn new(dialect: &'a Dialect) -> Self {
        Self { dialect }
    }

    /// Validates a raw schema and returns its normalized form.
    ///
    /// # Errors
    ///
    /// Returns the first `SchemaError` encountered, in the order listed in the
    /// module documentation.
    pub fn normalize(&self, raw: &Value) -> SchemaResult<NormalizedSchema> {
        let obj = raw
            .as_object()
            .ok_or_else(|| SchemaError::malformed("Table schema must be a JSON object"))?;

        let table = match obj.get("table") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(other) => {
                return Err(SchemaError::malformed(format!("Invalid table name: {}", other)));
            }
        };

        let version = normalize_version(obj.get("version"))?;
        let attributes = normalize_attributes(obj.get("attributes"))?;
        let index = validate_index(&attributes, obj.get("index"))?;
        let secondary_indexes = self.normalize_secondary_indexes(&attributes, obj)?;
        let revision_retention_policy =
            validate_revision_policy(obj.get("revisionRetentionPolicy"))?;
        let options = validate_options(obj.get("options"), self.dialect)?;
        let tid = resolve_tid(&attributes, &index, obj.get("tid"))?;
        let proj = resolve_projection(&attributes, obj.get("proj"))?;

        Ok(NormalizedSchema {
            table,
            version,
            attributes,
            index,
            secondary_indexes,
            revision_retention_policy,
            options,
            tid,
            proj,
        })
    }

    fn normalize_secondary_indexes(
        &self,
        attributes: &BTreeMap<String, AttributeType>,
        obj: &Map<String, Value>,
    ) -> SchemaResult<BTreeMap<String, IndexSchema>> {
        let raw = match obj.get("secondaryIndexes") {
            None | Some(Value::Null) => return Ok(BTreeMap::new()),
            Some(Value::Object(raw)) => raw,
            Some(other) => {
                return Err(SchemaError::new(
                    SchemaErrorCode::InvalidIndex,
                    format!("Invalid secondary indexes: {}", other),
                ));
            }
        };

        if !self.dialect.secondary_indexes {
            if raw.is_empty() {
                return Ok(BTreeMap::new());
            }
            return Err(SchemaError::unsupported("Secondary indexes are not supported"));
        }

        raw.iter()
            .map(|(name, index)| {
                validate_index(attributes, Some(index)).map(|index| (name.clone(), index))
            })
            .collect()
    }
}

fn normalize_version(raw: Option<&Value>) -> SchemaResult<u64> {
    match raw {
        None | Some(Value::Null) => Ok(DEFAULT_SCHEMA_VERSION),
        Some(v) => match v.as_u64() {
            Some(0) => Ok(DEFAULT_SCHEMA_VERSION),
            Some(n) => Ok(n),
            None => Err(SchemaError::invalid_version(v)),
        },
    }
}

fn normalize_attributes(raw: Option<&Value>) -> SchemaResult<BTreeMap<String, AttributeType>> {
    let obj = match raw {
        Some(Value::Object(obj)) if !obj.is_empty() => obj,
        _ => return Err(SchemaError::attributes_required()),
    };

    obj.iter()
        .map(|(name, type_value)| {
            let parsed = type_value
                .as_str()
                .and_then(|t| t.parse::<AttributeType>().ok());
            match parsed {
                Some(t) => Ok((name.clone(), t)),
                None => Err(match type_value {
                    Value::String(s) => SchemaError::invalid_attribute_type(s),
                    other => SchemaError::invalid_attribute_type(other),
                }),
            }
        })
        .collect()
}

/// Explicit `tid` wins; otherwise the first timeuuid range key, if any.
fn resolve_tid(
    attributes: &BTreeMap<String, AttributeType>,
    index: &IndexSchema,
    raw: Option<&Value>,
) -> SchemaResult<Option<String>> {
    match raw {
        None | Some(Value::Null) => {
            let timeuuid = AttributeType::Scalar(ScalarType::Timeuuid);
            Ok(index
                .elements_of(IndexKind::Range)
                .find(|e| attributes.get(&e.attribute) == Some(&timeuuid))
                .map(|e| e.attribute.clone()))
        }
        Some(Value::String(name)) if attributes.contains_key(name) => Ok(Some(name.clone())),
        Some(Value::String(name)) => Err(SchemaError::unknown_attribute("tid", name)),
        Some(other) => Err(SchemaError::malformed(format!("Invalid tid: {}", other))),
    }
}

fn resolve_projection(
    attributes: &BTreeMap<String, AttributeType>,
    raw: Option<&Value>,
) -> SchemaResult<Option<Vec<String>>> {
    let names: Vec<&str> = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(name)) => vec![name.as_str()],
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| SchemaError::malformed(format!("Invalid projection: {}", item)))
            })
            .collect::<SchemaResult<_>>()?,
        Some(other) => {
            return Err(SchemaError::malformed(format!("Invalid projection: {}", other)));
        }
    };

    if let Some(missing) = names.iter().copied().find(|n| !attributes.contains_key(*n)) {
        return Err(SchemaError::unknown_attribute("proj", missing));
    }

    Ok(Some(names.into_iter().map(String::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::errors::ErrorCategory;
    use crate::schema::options::UpdatePattern;
    use crate::schema::revision::RevisionPolicyType;
    use serde_json::json;

    fn sample_schema() -> Value {
        json!({
            "table": "simple-table",
            "attributes": {
                "key": "string",
                "tid": "timeuuid",
                "latestTid": "timeuuid",
                "range": "string",
                "body": "blob"
            },
            "index": [
                {"attribute": "key", "type": "hash"},
                {"attribute": "latestTid", "type": "static"},
                {"attribute": "tid", "type": "range", "order": "desc"},
                {"attribute": "range", "type": "range", "order": "desc"}
            ]
        })
    }

    fn normalize(raw: &Value) -> SchemaResult<NormalizedSchema> {
        SchemaNormalizer::new(&Dialect::default()).normalize(raw)
    }

    #[test]
    fn test_sample_schema_normalizes() {
        let schema = normalize(&sample_schema()).unwrap();
        assert_eq!(schema.table(), Some("simple-table"));
        assert_eq!(schema.version(), DEFAULT_SCHEMA_VERSION);
        assert_eq!(schema.tid(), Some("tid"));
        assert!(schema.secondary_indexes().is_empty());
        assert!(schema.revision_retention_policy().is_none());
        assert_eq!(schema.options().updates.pattern, UpdatePattern::RandomUpdate);

        let keys: Vec<_> = schema.key_attributes().collect();
        assert_eq!(keys, vec!["key", "tid", "range"]);
    }

    #[test]
    fn test_input_is_not_modified() {
        let raw = sample_schema();
        let before = raw.clone();
        normalize(&raw).unwrap();
        assert_eq!(raw, before);
    }

    #[test]
    fn test_explicit_version_kept() {
        let mut raw = sample_schema();
        raw["version"] = json!(7);
        assert_eq!(normalize(&raw).unwrap().version(), 7);

        raw["version"] = json!(0);
        assert_eq!(normalize(&raw).unwrap().version(), DEFAULT_SCHEMA_VERSION);

        raw["version"] = json!("two");
        let err = normalize(&raw).unwrap_err();
        assert!(err.message().contains("Invalid schema version"));
    }

    #[test]
    fn test_attributes_required() {
        let err = normalize(&json!({"table": "test"})).unwrap_err();
        assert!(err.message().contains("Attributes are required"));

        let err = normalize(&json!({"table": "test", "attributes": {}})).unwrap_err();
        assert!(err.message().contains("Attributes are required"));
    }

    #[test]
    fn test_attribute_types_validated() {
        let raw = json!({
            "table": "test",
            "attributes": {"key": "not-a-valid-type"},
            "index": [{"attribute": "key", "type": "hash"}]
        });
        let err = normalize(&raw).unwrap_err();
        assert!(err.message().contains("Invalid type of attribute: not-a-valid-type"));
    }

    #[test]
    fn test_empty_index() {
        let raw = json!({"table": "t", "attributes": {"key": "string"}, "index": []});
        let err = normalize(&raw).unwrap_err();
        assert!(err.message().starts_with("Invalid index. Must have at least one entry"));
    }

    #[test]
    fn test_secondary_indexes_rejected_when_disabled() {
        let mut raw = sample_schema();
        raw["secondaryIndexes"] = json!({
            "by_range": [{"attribute": "range", "type": "hash"}]
        });
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::Unsupported);
        assert!(err.message().contains("Secondary indexes are not supported"));

        raw["secondaryIndexes"] = json!({});
        assert!(normalize(&raw).is_ok());
    }

    #[test]
    fn test_secondary_indexes_validated_when_enabled() {
        let dialect = Dialect::with_secondary_indexes();
        let normalizer = SchemaNormalizer::new(&dialect);

        let mut raw = sample_schema();
        raw["secondaryIndexes"] = json!({
            "by_range": [
                {"attribute": "body", "type": "proj"},
                {"attribute": "tid", "type": "range", "order": "desc"},
                {"attribute": "range", "type": "hash"}
            ]
        });
        let schema = normalizer.normalize(&raw).unwrap();
        let by_range = schema.secondary_index("by_range").unwrap();
        let attrs: Vec<_> = by_range.elements().iter().map(|e| e.attribute.as_str()).collect();
        assert_eq!(attrs, vec!["range", "tid", "body"]);

        raw["secondaryIndexes"] = json!({"broken": []});
        let err = normalizer.normalize(&raw).unwrap_err();
        assert!(err.message().starts_with("Invalid index. Must have at least one entry"));
    }

    #[test]
    fn test_missing_secondary_indexes_default_to_empty() {
        let dialect = Dialect::with_secondary_indexes();
        let schema = SchemaNormalizer::new(&dialect).normalize(&sample_schema()).unwrap();
        assert!(schema.secondary_indexes().is_empty());
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["secondaryIndexes"], json!({}));
    }

    #[test]
    fn test_legacy_ttl_policy_rewritten() {
        let mut raw = sample_schema();
        raw["revisionRetentionPolicy"] = json!({"type": "ttl", "ttl": 600});
        let schema = normalize(&raw).unwrap();
        let policy = schema.revision_retention_policy().unwrap();
        assert_eq!(policy.policy_type, RevisionPolicyType::Latest);

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value["revisionRetentionPolicy"],
            json!({"type": "latest", "count": 0, "grace_ttl": 600})
        );
    }

    #[test]
    fn test_explicit_tid_must_be_declared() {
        let mut raw = sample_schema();
        raw["tid"] = json!("latestTid");
        assert_eq!(normalize(&raw).unwrap().tid(), Some("latestTid"));

        raw["tid"] = json!("nope");
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Reference);
    }

    #[test]
    fn test_no_tid_without_timeuuid_range() {
        let raw = json!({
            "attributes": {"key": "string", "range": "string"},
            "index": [
                {"attribute": "key", "type": "hash"},
                {"attribute": "range", "type": "range"}
            ]
        });
        assert_eq!(normalize(&raw).unwrap().tid(), None);
    }

    #[test]
    fn test_default_projection() {
        let mut raw = sample_schema();
        raw["proj"] = json!("body");
        let schema = normalize(&raw).unwrap();
        assert_eq!(schema.default_projection(), Some(&["body".to_string()][..]));

        raw["proj"] = json!(["body", "missing"]);
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::UnknownAttribute);
    }

    #[test]
    fn test_renormalization_is_noop() {
        let mut raw = sample_schema();
        raw["revisionRetentionPolicy"] = json!({"type": "ttl", "ttl": 600});
        raw["options"] = json!({"durability": "low"});

        let first = normalize(&raw).unwrap();
        let second = normalize(&serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_object_schema() {
        let err = normalize(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::Malformed);
    }
}
