//! Table option normalization
//!
//! Recognised options:
//! - `compression`: list of `{algorithm, block_size}` specs
//! - `durability`: `low` or `standard`
//! - `updates`: `{pattern: random-update | write-once | timeseries}`
//!
//! `updates.pattern` defaults to `random-update`.

use serde::Serialize;
use serde_json::Value;

use super::dialect::Dialect;
use super::errors::{SchemaError, SchemaResult};

/// Block sizes (KiB) the engine accepts for compression
pub const COMPRESSION_BLOCK_SIZES: [u64; 5] = [64, 128, 256, 512, 1024];

/// Compression algorithms known to the schema language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionAlgorithm {
    Lz4,
    Deflate,
    Lzma,
    Snappy,
}

impl CompressionAlgorithm {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "lz4" => Some(CompressionAlgorithm::Lz4),
            "deflate" => Some(CompressionAlgorithm::Deflate),
            "lzma" => Some(CompressionAlgorithm::Lzma),
            "snappy" => Some(CompressionAlgorithm::Snappy),
            _ => None,
        }
    }

    /// Compressor class used by the engine, `None` if the engine lacks one
    pub fn engine_class(&self) -> Option<&'static str> {
        match self {
            CompressionAlgorithm::Lz4 => Some("LZ4Compressor"),
            CompressionAlgorithm::Deflate => Some("DeflateCompressor"),
            CompressionAlgorithm::Lzma => None,
            CompressionAlgorithm::Snappy => Some("SnappyCompressor"),
        }
    }
}

/// Write durability level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Durability {
    Low,
    Standard,
}

/// Expected write pattern, used by the engine to pick a compaction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdatePattern {
    #[default]
    RandomUpdate,
    WriteOnce,
    Timeseries,
}

impl UpdatePattern {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "random-update" => Some(UpdatePattern::RandomUpdate),
            "write-once" => Some(UpdatePattern::WriteOnce),
            "timeseries" => Some(UpdatePattern::Timeseries),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UpdateOptions {
    pub pattern: UpdatePattern,
}

/// Normalized table options
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableOptions {
    /// Compression specs as supplied; entries are only checked in strict mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durability: Option<Durability>,
    pub updates: UpdateOptions,
}

/// Validates raw options and fills in defaults
pub fn validate_options(raw: Option<&Value>, dialect: &Dialect) -> SchemaResult<TableOptions> {
    let mut options = TableOptions::default();

    let obj = match raw {
        None | Some(Value::Null) => return Ok(options),
        Some(Value::Object(obj)) => obj,
        Some(other) => {
            return Err(SchemaError::invalid_options(format!("Invalid options: {}", other)));
        }
    };

    for (key, val) in obj {
        match key.as_str() {
            "compression" => {
                options.compression = Some(validate_compression(val, dialect)?);
            }
            "durability" => {
                options.durability = Some(match val.as_str() {
                    Some("low") => Durability::Low,
                    Some("standard") => Durability::Standard,
                    _ => {
                        return Err(SchemaError::invalid_options(format!(
                            "Invalid durability level: {}",
                            val
                        )));
                    }
                });
            }
            "updates" => options.updates = validate_updates(val)?,
            _ => {
                return Err(SchemaError::invalid_options(format!("Unknown option: {}", key)));
            }
        }
    }

    Ok(options)
}

fn validate_compression(val: &Value, dialect: &Dialect) -> SchemaResult<Vec<Value>> {
    let invalid = || SchemaError::invalid_options(format!("Invalid compression settings: {}", val));

    let specs = val.as_array().ok_or_else(invalid)?;
    if dialect.strict_compression && (specs.is_empty() || !specs.iter().all(is_supported_spec)) {
        return Err(invalid());
    }

    Ok(specs.clone())
}

fn is_supported_spec(spec: &Value) -> bool {
    let algorithm = spec
        .get("algorithm")
        .and_then(Value::as_str)
        .and_then(CompressionAlgorithm::parse);
    let block_size = spec.get("block_size").and_then(Value::as_u64);

    matches!(algorithm, Some(a) if a.engine_class().is_some())
        && matches!(block_size, Some(b) if COMPRESSION_BLOCK_SIZES.contains(&b))
}

fn validate_updates(val: &Value) -> SchemaResult<UpdateOptions> {
    let obj = match val {
        Value::Null => return Ok(UpdateOptions::default()),
        Value::Object(obj) => obj,
        other => {
            return Err(SchemaError::invalid_options(format!(
                "Invalid updates option: {}",
                other
            )));
        }
    };

    let pattern = match obj.get("pattern") {
        None | Some(Value::Null) => UpdatePattern::default(),
        Some(p) => p.as_str().and_then(UpdatePattern::parse).ok_or_else(|| {
            SchemaError::invalid_options(format!("Invalid update pattern: {}", p))
        })?,
    };

    Ok(UpdateOptions { pattern })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loose() -> Dialect {
        Dialect::default()
    }

    fn strict() -> Dialect {
        Dialect::with_secondary_indexes()
    }

    #[test]
    fn test_absent_options_get_defaults() {
        let options = validate_options(None, &loose()).unwrap();
        assert_eq!(options, TableOptions::default());
        assert_eq!(options.updates.pattern, UpdatePattern::RandomUpdate);
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"updates": {"pattern": "random-update"}})
        );
    }

    #[test]
    fn test_updates_without_pattern_defaults() {
        let raw = json!({"updates": {}});
        let options = validate_options(Some(&raw), &loose()).unwrap();
        assert_eq!(options.updates.pattern, UpdatePattern::RandomUpdate);
    }

    #[test]
    fn test_update_patterns() {
        let raw = json!({"updates": {"pattern": "timeseries"}});
        let options = validate_options(Some(&raw), &loose()).unwrap();
        assert_eq!(options.updates.pattern, UpdatePattern::Timeseries);

        let raw = json!({"updates": {"pattern": "write-once"}});
        let options = validate_options(Some(&raw), &loose()).unwrap();
        assert_eq!(options.updates.pattern, UpdatePattern::WriteOnce);

        let raw = json!({"updates": {"pattern": "sometimes"}});
        let err = validate_options(Some(&raw), &loose()).unwrap_err();
        assert!(err.message().contains("Invalid update pattern"));
    }

    #[test]
    fn test_durability() {
        let raw = json!({"durability": "low"});
        let options = validate_options(Some(&raw), &loose()).unwrap();
        assert_eq!(options.durability, Some(Durability::Low));

        let raw = json!({"durability": "extreme"});
        let err = validate_options(Some(&raw), &loose()).unwrap_err();
        assert!(err.message().contains("Invalid durability level"));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let raw = json!({"caching": true});
        let err = validate_options(Some(&raw), &loose()).unwrap_err();
        assert!(err.message().contains("Unknown option: caching"));
    }

    #[test]
    fn test_loose_compression_checks_array_only() {
        let raw = json!({"compression": [{"algorithm": "zstd"}]});
        assert!(validate_options(Some(&raw), &loose()).is_ok());

        let raw = json!({"compression": []});
        assert!(validate_options(Some(&raw), &loose()).is_ok());

        let raw = json!({"compression": "lz4"});
        let err = validate_options(Some(&raw), &loose()).unwrap_err();
        assert!(err.message().contains("Invalid compression settings"));
    }

    #[test]
    fn test_strict_compression() {
        let raw = json!({"compression": [{"algorithm": "lz4", "block_size": 256}]});
        let options = validate_options(Some(&raw), &strict()).unwrap();
        assert_eq!(options.compression.unwrap().len(), 1);

        for bad in [
            json!({"compression": []}),
            json!({"compression": [{"algorithm": "lzma", "block_size": 256}]}),
            json!({"compression": [{"algorithm": "lz4", "block_size": 100}]}),
            json!({"compression": [{"algorithm": "zstd", "block_size": 64}]}),
            json!({"compression": [{"algorithm": "snappy"}]}),
        ] {
            let err = validate_options(Some(&bad), &strict()).unwrap_err();
            assert!(err.message().contains("Invalid compression settings"));
        }
    }

    #[test]
    fn test_engine_classes() {
        assert_eq!(CompressionAlgorithm::Lz4.engine_class(), Some("LZ4Compressor"));
        assert_eq!(CompressionAlgorithm::Lzma.engine_class(), None);
    }
}
