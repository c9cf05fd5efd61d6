//! Schema file loading
//!
//! Reads raw table schemas from JSON files, normalizes them and keeps them in
//! an in-memory catalog keyed by table name. A file without a `table` key is
//! registered under its file stem.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use super::dialect::Dialect;
use super::errors::{SchemaError, SchemaResult};
use super::normalizer::SchemaNormalizer;
use super::types::NormalizedSchema;

/// In-memory catalog of normalized table schemas.
#[derive(Debug)]
pub struct TableLoader {
    dialect: Dialect,
    /// Normalized schemas indexed by table name
    tables: HashMap<String, NormalizedSchema>,
}

impl TableLoader {
    /// Creates an empty catalog for the given dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            tables: HashMap::new(),
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Loads every `.json` file in a directory.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<usize> {
        let entries = fs::read_dir(dir).map_err(|e| {
            SchemaError::schema_file(
                dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::schema_file(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }

        // read_dir order is platform dependent
        paths.sort();
        for path in &paths {
            self.load_file(path)?;
        }

        Ok(paths.len())
    }

    /// Loads and registers a single schema file, returning its table name.
    pub fn load_file(&mut self, path: &Path) -> SchemaResult<String> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::schema_file(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        let raw: Value = serde_json::from_str(&content).map_err(|e| {
            SchemaError::schema_file(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        let fallback = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.register_as(&raw, &fallback)
    }

    /// Normalizes and registers a raw schema that carries a `table` key.
    pub fn register(&mut self, raw: &Value) -> SchemaResult<String> {
        self.register_as(raw, "")
    }

    fn register_as(&mut self, raw: &Value, fallback: &str) -> SchemaResult<String> {
        let schema = SchemaNormalizer::new(&self.dialect).normalize(raw)?;

        let name = match schema.table() {
            Some(table) => table.to_string(),
            None if !fallback.is_empty() => fallback.to_string(),
            None => return Err(SchemaError::malformed("Table schema must name its table")),
        };

        if self.tables.contains_key(&name) {
            return Err(SchemaError::malformed(format!(
                "Table '{}' is defined more than once",
                name
            )));
        }

        self.tables.insert(name.clone(), schema);
        Ok(name)
    }

    /// Gets the schema for a table.
    pub fn get(&self, table: &str) -> Option<&NormalizedSchema> {
        self.tables.get(table)
    }

    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Returns the number of loaded tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
