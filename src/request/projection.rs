//! Projection validation

use crate::schema::NormalizedSchema;

use super::ast::Projection;
use super::errors::{RequestError, RequestResult};

/// Checks that every projected attribute is declared by the schema.
///
/// Without a projection the schema's default projection is checked; with
/// neither, all attributes are returned and there is nothing to check.
pub fn validate_projection(
    proj: Option<&Projection>,
    schema: &NormalizedSchema,
) -> RequestResult<()> {
    let attributes = match (proj, schema.default_projection()) {
        (Some(proj), _) => proj.attributes(),
        (None, Some(default)) => default,
        (None, None) => return Ok(()),
    };

    match attributes.iter().find(|a| !schema.has_attribute(a)) {
        Some(missing) => Err(RequestError::projection_not_in_schema(missing)),
        None => Ok(()),
    }
}
