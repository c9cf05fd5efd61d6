//! Deployment dialect
//!
//! The storage layer went through two regimes: an early one with secondary
//! indexes and strict compression settings, and a later single-index one that
//! only checks that `compression` is a list. A dialect picks the regime.

use serde::{Deserialize, Serialize};

/// Behavioural switches for schema and request validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// Accept `secondaryIndexes` and indexed reads (default: false)
    #[serde(default)]
    pub secondary_indexes: bool,

    /// Check compression algorithm and block size (default: false)
    #[serde(default)]
    pub strict_compression: bool,

    /// Non-schema attribute that sets a row TTL on writes (default: "_ttl")
    #[serde(default = "default_row_ttl_attribute")]
    pub row_ttl_attribute: Option<String>,
}

fn default_row_ttl_attribute() -> Option<String> {
    Some("_ttl".to_string())
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            secondary_indexes: false,
            strict_compression: false,
            row_ttl_attribute: default_row_ttl_attribute(),
        }
    }
}

impl Dialect {
    /// The early regime: secondary indexes and strict compression checks
    pub fn with_secondary_indexes() -> Self {
        Self {
            secondary_indexes: true,
            strict_compression: true,
            ..Self::default()
        }
    }

    /// Returns true if `attribute` is the reserved row-TTL attribute
    pub fn is_row_ttl_attribute(&self, attribute: &str) -> bool {
        self.row_ttl_attribute.as_deref() == Some(attribute)
    }
}
