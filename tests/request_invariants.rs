//! Request Invariant Tests
//!
//! Tests for get and put validation against normalized schemas:
//! - At most one non-eq condition, and it comes last
//! - Non-eq conditions only on range keys
//! - Reads condition on primary key attributes only
//! - Writes carry every key attribute except the tid
//! - The first failing check is the one reported

use serde_json::{json, Value};
use tabledef::request::{
    GetRequest, Projection, PutRequest, RequestErrorCode, RequestValidator,
};
use tabledef::schema::{Dialect, NormalizedSchema, SchemaNormalizer};

// =============================================================================
// Helper Functions
// =============================================================================

fn normalized(dialect: &Dialect, raw: Value) -> NormalizedSchema {
    SchemaNormalizer::new(dialect).normalize(&raw).unwrap()
}

/// key (hash), rev and test (range), body (plain)
fn revisioned_schema() -> NormalizedSchema {
    normalized(
        &Dialect::default(),
        json!({
            "table": "t",
            "attributes": {
                "key": "string",
                "rev": "int",
                "test": "int",
                "tid": "timeuuid",
                "range": "string",
                "body": "blob"
            },
            "index": [
                {"attribute": "key", "type": "hash"},
                {"attribute": "tid", "type": "range", "order": "desc"},
                {"attribute": "range", "type": "range", "order": "asc"},
                {"attribute": "rev", "type": "range", "order": "desc"},
                {"attribute": "test", "type": "range", "order": "asc"}
            ]
        }),
    )
}

fn hash_only_schema() -> NormalizedSchema {
    normalized(
        &Dialect::default(),
        json!({
            "table": "t",
            "attributes": {"key": "string", "body": "blob"},
            "index": [{"attribute": "key", "type": "hash"}]
        }),
    )
}

fn get_with(predicate: Value) -> GetRequest {
    GetRequest::from_value(json!({"table": "t", "attributes": predicate})).unwrap()
}

fn check_get(req: &GetRequest, schema: &NormalizedSchema) -> Result<(), String> {
    let dialect = Dialect::default();
    RequestValidator::new(&dialect)
        .validate_get(req, Some(schema))
        .map_err(|e| e.message().to_string())
}

fn check_put(req: &PutRequest, schema: &NormalizedSchema) -> Result<(), String> {
    let dialect = Dialect::default();
    RequestValidator::new(&dialect)
        .validate_put(req, Some(schema))
        .map_err(|e| e.message().to_string())
}

// =============================================================================
// Predicate Ordering Tests
// =============================================================================

/// eq followed by non-eq on a different range column is accepted.
#[test]
fn test_eq_then_non_eq_accepted() {
    let schema = revisioned_schema();
    assert!(check_get(&get_with(json!({"rev": 1, "test": {"ge": 1}})), &schema).is_ok());
}

/// Two non-eq conditions are rejected.
#[test]
fn test_two_non_eq_rejected() {
    let schema = revisioned_schema();
    let err = check_get(&get_with(json!({"rev": {"lt": 3}, "test": {"ge": 1}})), &schema)
        .unwrap_err();
    assert!(err.starts_with("Invalid query. Found"), "{}", err);
}

/// An eq condition after a non-eq condition is rejected.
#[test]
fn test_eq_after_non_eq_rejected() {
    let schema = revisioned_schema();
    let err = check_get(&get_with(json!({"tid": {"gt": 10}, "range": "a"})), &schema)
        .unwrap_err();
    assert!(err.starts_with("Invalid query. Found"), "{}", err);
}

/// Predicate order is the client's, not alphabetical.
#[test]
fn test_predicate_order_is_request_order() {
    let schema = revisioned_schema();
    // alphabetically "range" < "tid", which would hide the violation
    let req = get_with(json!({"tid": {"gt": 10}, "range": "a"}));
    let keys: Vec<_> = req.attributes.as_ref().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["tid", "range"]);
    assert!(check_get(&req, &schema).is_err());

    let req = get_with(json!({"range": "a", "tid": {"gt": 10}}));
    assert!(check_get(&req, &schema).is_ok());
}

/// Non-eq on a hash-only key is rejected.
#[test]
fn test_non_eq_on_hash_key_rejected() {
    let schema = hash_only_schema();
    let err = check_get(&get_with(json!({"key": {"gt": "test"}})), &schema).unwrap_err();
    assert!(err.contains("Non-eq conditions allowed only on range columns"));
}

#[test]
fn test_between_is_non_eq() {
    let schema = revisioned_schema();
    assert!(check_get(&get_with(json!({"key": "k", "rev": {"between": [1, 4]}})), &schema).is_ok());
    assert!(check_get(
        &get_with(json!({"rev": {"between": [1, 4]}, "test": {"eq": 1}})),
        &schema
    )
    .is_err());
}

// =============================================================================
// Get Request Tests
// =============================================================================

#[test]
fn test_get_non_key_condition_rejected() {
    let schema = revisioned_schema();
    let err = check_get(&get_with(json!({"body": "x"})), &schema).unwrap_err();
    assert!(err.contains("is not a part of primary key"));
}

#[test]
fn test_get_undefined_and_illegal_operator() {
    let schema = revisioned_schema();
    let err = check_get(&get_with(json!({"key": null})), &schema).unwrap_err();
    assert!(err.contains("Attribute key is undefined"));

    let err = check_get(&get_with(json!({"rev": {"like": 1}})), &schema).unwrap_err();
    assert!(err.contains("Illegal predicate operator"));
}

#[test]
fn test_get_projection_and_default_projection() {
    let schema = revisioned_schema();
    let req = GetRequest::new("t").with_projection(Projection::Many(vec![
        "key".into(),
        "missing".into(),
    ]));
    let err = check_get(&req, &schema).unwrap_err();
    assert!(err.contains("Projection element missing not in the schema"));

    let req = GetRequest::from_value(json!({"table": "t", "proj": "body"})).unwrap();
    assert!(check_get(&req, &schema).is_ok());
}

#[test]
fn test_get_order() {
    let schema = revisioned_schema();
    assert!(check_get(&GetRequest::new("t").with_order("rev", "asc"), &schema).is_ok());

    let err = check_get(&GetRequest::new("t").with_order("key", "asc"), &schema).unwrap_err();
    assert!(err.starts_with("Cannot order on attribute key"));

    let err = check_get(&GetRequest::new("t").with_order("rev", "up"), &schema).unwrap_err();
    assert!(err.starts_with("Invalid sort order"));
}

#[test]
fn test_get_without_schema() {
    let dialect = Dialect::default();
    let err = RequestValidator::new(&dialect)
        .validate_get(&GetRequest::new("t"), None)
        .unwrap_err();
    assert_eq!(err.code(), RequestErrorCode::NoSchema);
}

#[test]
fn test_get_secondary_index() {
    let dialect = Dialect::with_secondary_indexes();
    let schema = normalized(
        &dialect,
        json!({
            "table": "t",
            "attributes": {"key": "string", "tid": "timeuuid", "email": "string"},
            "index": [
                {"attribute": "key", "type": "hash"},
                {"attribute": "tid", "type": "range", "order": "desc"}
            ],
            "secondaryIndexes": {
                "by_email": [
                    {"attribute": "email", "type": "hash"},
                    {"attribute": "key", "type": "range", "order": "asc"},
                    {"attribute": "tid", "type": "proj"}
                ]
            }
        }),
    );
    let validator = RequestValidator::new(&dialect);

    let req = GetRequest::new("t")
        .with_index("by_email")
        .with_condition("email", json!("a@b.c"))
        .with_order("key", "asc");
    assert!(validator.validate_get(&req, Some(&schema)).is_ok());

    // proj elements are in the key map but are not keys
    let req = GetRequest::new("t")
        .with_index("by_email")
        .with_condition("tid", json!("x"));
    let err = validator.validate_get(&req, Some(&schema)).unwrap_err();
    assert_eq!(err.code(), RequestErrorCode::NotPrimaryKey);

    let req = GetRequest::new("t").with_index("by_name");
    let err = validator.validate_get(&req, Some(&schema)).unwrap_err();
    assert_eq!(err.code(), RequestErrorCode::UnknownIndex);
}

// =============================================================================
// Put Request Tests
// =============================================================================

/// A write without its hash key is rejected.
#[test]
fn test_put_missing_key_rejected() {
    let schema = hash_only_schema();
    let req = PutRequest::from_value(json!({"table": "t", "attributes": {"body": "x"}})).unwrap();
    let err = check_put(&req, &schema).unwrap_err();
    assert!(err.starts_with("Index attribute"), "{}", err);
}

/// The tid range key may be left for the engine to fill in.
#[test]
fn test_put_tid_may_be_omitted() {
    let schema = revisioned_schema();
    let req = PutRequest::new("t")
        .with_attribute("key", json!("k"))
        .with_attribute("range", json!("r"))
        .with_attribute("rev", json!(1))
        .with_attribute("test", json!(2));
    assert!(check_put(&req, &schema).is_ok());

    let req = PutRequest::new("t")
        .with_attribute("key", json!("k"))
        .with_attribute("rev", json!(1))
        .with_attribute("test", json!(2));
    let err = check_put(&req, &schema).unwrap_err();
    assert!(err.starts_with("Index attribute \"range\" missing in"));
}

#[test]
fn test_put_unknown_attribute_rejected() {
    let schema = hash_only_schema();
    let req = PutRequest::new("t")
        .with_attribute("key", json!("k"))
        .with_attribute("color", json!("red"));
    let err = check_put(&req, &schema).unwrap_err();
    assert_eq!(err, "Invalid query. Unknown attribute color");
}

#[test]
fn test_put_conditional_write() {
    let schema = hash_only_schema();
    let req = PutRequest::from_value(json!({
        "table": "t",
        "attributes": {"key": "k", "body": "new"},
        "if": {"body": "old"}
    }))
    .unwrap();
    assert!(check_put(&req, &schema).is_ok());

    let req = PutRequest::new("t")
        .with_attribute("key", json!("k"))
        .with_condition("body", json!({"ge": "a"}));
    let err = check_put(&req, &schema).unwrap_err();
    assert!(err.contains("Non-eq conditions allowed only on range columns: body"));
}

/// A null write condition is undefined, not "attribute is null".
#[test]
fn test_put_null_condition_is_undefined() {
    let schema = hash_only_schema();
    let req = PutRequest::new("t")
        .with_attribute("key", json!("k"))
        .with_condition("body", Value::Null);
    let dialect = Dialect::default();
    let err = RequestValidator::new(&dialect)
        .validate_put(&req, Some(&schema))
        .unwrap_err();
    assert_eq!(err.code(), RequestErrorCode::UndefinedAttribute);
    assert_eq!(err.message(), "Invalid query. Attribute body is undefined");
}

#[test]
fn test_put_row_ttl() {
    let schema = hash_only_schema();
    let ok = PutRequest::new("t")
        .with_attribute("key", json!("k"))
        .with_attribute("_ttl", json!(86400));
    assert!(check_put(&ok, &schema).is_ok());

    let bad = PutRequest::new("t")
        .with_attribute("key", json!("k"))
        .with_attribute("_ttl", json!(-1));
    assert!(check_put(&bad, &schema).unwrap_err().contains("_ttl must be a non-negative integer"));
}
