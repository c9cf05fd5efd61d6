//! Table schema subsystem
//!
//! Validates declarative wide-column table schemas and produces their
//! canonical, fully populated form.
//!
//! # Design Principles
//!
//! - Raw schemas are plain JSON; the normalized schema is a typed value
//! - Normalization never mutates its input
//! - Derived key maps are built once, alongside the canonical index
//! - The first violated rule is reported; nothing is partially accepted
//! - Deterministic validation, no I/O outside the loader

mod dialect;
mod errors;
mod index;
mod loader;
mod normalizer;
mod options;
mod revision;
mod types;

pub use dialect::Dialect;
pub use errors::{ErrorCategory, SchemaError, SchemaErrorCode, SchemaResult};
pub use index::validate_index;
pub use loader::TableLoader;
pub use normalizer::{SchemaNormalizer, DEFAULT_SCHEMA_VERSION};
pub use options::{
    validate_options, CompressionAlgorithm, Durability, TableOptions, UpdateOptions,
    UpdatePattern, COMPRESSION_BLOCK_SIZES,
};
pub use revision::{validate_revision_policy, RevisionPolicy, RevisionPolicyType};
pub use types::{
    is_valid_type, AttributeType, IndexElement, IndexKind, IndexSchema, NormalizedSchema,
    ScalarType, SortOrder,
};
