//! Get and put request validation
//!
//! Checks run in a fixed order and the first failure is returned:
//!
//! get: schema, index, projection, predicate, order, limit
//! put: schema, attributes, key presence, condition

use serde_json::Value;

use crate::schema::{Dialect, IndexSchema, NormalizedSchema};

use super::ast::{GetRequest, PutRequest};
use super::errors::{RequestError, RequestResult};
use super::order::validate_order;
use super::predicate::validate_predicate;
use super::projection::validate_projection;

/// Request validator bound to a deployment dialect.
pub struct RequestValidator<'a> {
    dialect: &'a Dialect,
}

impl<'a> RequestValidator<'a> {
    pub fn new(dialect: &'a Dialect) -> Self {
        Self { dialect }
    }

    /// Validates a read request.
    ///
    /// `schema` is the normalized schema of `req.table`, if the caller has
    /// one. Predicates and order are checked against the secondary index
    /// named by `req.index`, or the primary index otherwise.
    pub fn validate_get(
        &self,
        req: &GetRequest,
        schema: Option<&NormalizedSchema>,
    ) -> RequestResult<()> {
        let schema = schema.ok_or_else(|| RequestError::no_schema(&req.table))?;
        let index = self.resolve_index(req, schema)?;

        validate_projection(req.proj.as_ref(), schema)?;

        if let Some(predicate) = &req.attributes {
            validate_predicate(predicate, index, true)?;
        }

        if let Some(order) = &req.order {
            validate_order(order, index)?;
        }

        if let Some(limit) = &req.limit {
            if !limit.as_u64().is_some_and(|n| n > 0) {
                return Err(RequestError::invalid_limit(limit));
            }
        }

        Ok(())
    }

    /// Validates a write request.
    ///
    /// Every key attribute must carry a value, except the table's tid which
    /// the engine fills in.
    pub fn validate_put(
        &self,
        req: &PutRequest,
        schema: Option<&NormalizedSchema>,
    ) -> RequestResult<()> {
        let schema = schema.ok_or_else(|| RequestError::no_schema(&req.table))?;

        for (attribute, value) in &req.attributes {
            if self.dialect.is_row_ttl_attribute(attribute) {
                if value.as_u64().is_none() {
                    return Err(RequestError::invalid_ttl(attribute, value));
                }
            } else if !schema.has_attribute(attribute) {
                return Err(RequestError::unknown_attribute(attribute));
            }
        }

        for key in schema.key_attributes() {
            let present = req.attributes.get(key).is_some_and(|v| !v.is_null());
            if !present && schema.tid() != Some(key) {
                let request = serde_json::to_value(req).unwrap_or(Value::Null);
                return Err(RequestError::missing_key(key, &request));
            }
        }

        if let Some(condition) = &req.condition {
            validate_predicate(condition, schema.index(), false)?;
        }

        Ok(())
    }

    fn resolve_index<'s>(
        &self,
        req: &GetRequest,
        schema: &'s NormalizedSchema,
    ) -> RequestResult<&'s IndexSchema> {
        match req.index.as_deref() {
            None => Ok(schema.index()),
            Some(_) if !self.dialect.secondary_indexes => {
                Err(RequestError::indexes_unsupported())
            }
            Some(name) => schema
                .secondary_index(name)
                .ok_or_else(|| RequestError::unknown_index(name)),
        }
    }
}
