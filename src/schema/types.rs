//! Table schema type definitions
//!
//! Supported attribute types (closed catalog):
//! - blob, decimal, double, float, boolean, int, varint, long
//! - string, timeuuid, uuid, timestamp, json
//! - set<T> for each of the above

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use super::options::TableOptions;
use super::revision::RevisionPolicy;

/// Scalar attribute types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarType {
    Blob,
    Decimal,
    Double,
    Float,
    Boolean,
    Int,
    Varint,
    Long,
    String,
    Timeuuid,
    Uuid,
    Timestamp,
    Json,
}

impl ScalarType {
    /// Every scalar type in catalog order
    pub const ALL: [ScalarType; 13] = [
        ScalarType::Blob,
        ScalarType::Decimal,
        ScalarType::Double,
        ScalarType::Float,
        ScalarType::Boolean,
        ScalarType::Int,
        ScalarType::Varint,
        ScalarType::Long,
        ScalarType::String,
        ScalarType::Timeuuid,
        ScalarType::Uuid,
        ScalarType::Timestamp,
        ScalarType::Json,
    ];

    /// Returns the type name used in schemas
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarType::Blob => "blob",
            ScalarType::Decimal => "decimal",
            ScalarType::Double => "double",
            ScalarType::Float => "float",
            ScalarType::Boolean => "boolean",
            ScalarType::Int => "int",
            ScalarType::Varint => "varint",
            ScalarType::Long => "long",
            ScalarType::String => "string",
            ScalarType::Timeuuid => "timeuuid",
            ScalarType::Uuid => "uuid",
            ScalarType::Timestamp => "timestamp",
            ScalarType::Json => "json",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.type_name() == name)
    }
}

/// Attribute type: a scalar or a set of scalars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Scalar(ScalarType),
    Set(ScalarType),
}

impl AttributeType {
    /// Returns the element type, for sets the member type
    pub fn scalar(&self) -> ScalarType {
        match self {
            AttributeType::Scalar(t) | AttributeType::Set(t) => *t,
        }
    }

    /// Returns true for `set<T>` types
    pub fn is_set(&self) -> bool {
        matches!(self, AttributeType::Set(_))
    }
}

/// Returns true if `name` is in the type catalog
pub fn is_valid_type(name: &str) -> bool {
    name.parse::<AttributeType>().is_ok()
}

impl FromStr for AttributeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(inner) = s.strip_prefix("set<").and_then(|r| r.strip_suffix('>')) {
            return ScalarType::parse(inner).map(AttributeType::Set).ok_or(());
        }
        ScalarType::parse(s).map(AttributeType::Scalar).ok_or(())
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Scalar(t) => write!(f, "{}", t.type_name()),
            AttributeType::Set(t) => write!(f, "set<{}>", t.type_name()),
        }
    }
}

impl Serialize for AttributeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Role of an attribute within an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Partition key
    Hash,
    /// Shared by all rows of a partition
    Static,
    /// Clustering key
    Range,
    /// Carried by the index without being part of its key
    Proj,
}

impl IndexKind {
    /// Canonical group position: hash, static, range, proj
    pub fn rank(&self) -> u8 {
        match self {
            IndexKind::Hash => 0,
            IndexKind::Static => 1,
            IndexKind::Range => 2,
            IndexKind::Proj => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Hash => "hash",
            IndexKind::Static => "static",
            IndexKind::Range => "range",
            IndexKind::Proj => "proj",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "hash" => Some(IndexKind::Hash),
            "static" => Some(IndexKind::Static),
            "range" => Some(IndexKind::Range),
            "proj" => Some(IndexKind::Proj),
            _ => None,
        }
    }

    /// Returns true for the kinds that make up the primary key
    pub fn is_key(&self) -> bool {
        matches!(self, IndexKind::Hash | IndexKind::Range)
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort direction of a range key or a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// A single validated index element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexElement {
    pub attribute: String,
    #[serde(rename = "type")]
    pub kind: IndexKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl IndexElement {
    pub fn new(attribute: impl Into<String>, kind: IndexKind) -> Self {
        Self {
            attribute: attribute.into(),
            kind,
            order: None,
        }
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Clustering direction the engine applies to this element.
    ///
    /// Range elements without an explicit order cluster descending, which
    /// suits time-uuid keys where recent rows are read most.
    pub fn effective_order(&self) -> Option<SortOrder> {
        match self.kind {
            IndexKind::Range => Some(self.order.unwrap_or(SortOrder::Desc)),
            _ => None,
        }
    }
}

/// Canonically ordered index with its derived key maps
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSchema {
    elements: Vec<IndexElement>,
    /// Non-static elements by attribute
    key_map: HashMap<String, usize>,
    /// Static elements by attribute
    static_map: HashMap<String, usize>,
}

impl IndexSchema {
    /// Builds an index from already validated elements.
    ///
    /// Elements are stably sorted into hash, static, range, proj order.
    pub(crate) fn from_validated(mut elements: Vec<IndexElement>) -> Self {
        elements.sort_by_key(|e| e.kind.rank());

        let mut key_map = HashMap::new();
        let mut static_map = HashMap::new();
        for (pos, elem) in elements.iter().enumerate() {
            if elem.kind == IndexKind::Static {
                static_map.insert(elem.attribute.clone(), pos);
            } else {
                key_map.insert(elem.attribute.clone(), pos);
            }
        }

        Self {
            elements,
            key_map,
            static_map,
        }
    }

    /// Elements in canonical order
    pub fn elements(&self) -> &[IndexElement] {
        &self.elements
    }

    /// Attributes of the hash and range elements, in canonical order
    pub fn key_attributes(&self) -> impl Iterator<Item = &str> {
        self.elements
            .iter()
            .filter(|e| e.kind.is_key())
            .map(|e| e.attribute.as_str())
    }

    /// Non-static element for an attribute
    pub fn key_element(&self, attribute: &str) -> Option<&IndexElement> {
        self.key_map.get(attribute).map(|&pos| &self.elements[pos])
    }

    /// Static element for an attribute
    pub fn static_element(&self, attribute: &str) -> Option<&IndexElement> {
        self.static_map.get(attribute).map(|&pos| &self.elements[pos])
    }

    /// Elements of the given kind, in canonical order
    pub fn elements_of(&self, kind: IndexKind) -> impl Iterator<Item = &IndexElement> {
        self.elements.iter().filter(move |e| e.kind == kind)
    }
}

impl Serialize for IndexSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.elements.serialize(serializer)
    }
}

/// Fully validated table schema.
///
/// Produced only by the normalizer; serializes back to the raw schema shape,
/// without the derived key maps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) table: Option<String>,
    pub(crate) version: u64,
    pub(crate) attributes: BTreeMap<String, AttributeType>,
    pub(crate) index: IndexSchema,
    pub(crate) secondary_indexes: BTreeMap<String, IndexSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) revision_retention_policy: Option<RevisionPolicy>,
    pub(crate) options: TableOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) proj: Option<Vec<String>>,
}

impl NormalizedSchema {
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttributeType> {
        &self.attributes
    }

    pub fn attribute_type(&self, name: &str) -> Option<AttributeType> {
        self.attributes.get(name).copied()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Primary index
    pub fn index(&self) -> &IndexSchema {
        &self.index
    }

    pub fn secondary_indexes(&self) -> &BTreeMap<String, IndexSchema> {
        &self.secondary_indexes
    }

    pub fn secondary_index(&self, name: &str) -> Option<&IndexSchema> {
        self.secondary_indexes.get(name)
    }

    pub fn revision_retention_policy(&self) -> Option<&RevisionPolicy> {
        self.revision_retention_policy.as_ref()
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Time-uuid key the engine may synthesize on writes
    pub fn tid(&self) -> Option<&str> {
        self.tid.as_deref()
    }

    /// Default projection for reads
    pub fn default_projection(&self) -> Option<&[String]> {
        self.proj.as_deref()
    }

    /// Primary key attributes (hash, then range)
    pub fn key_attributes(&self) -> impl Iterator<Item = &str> {
        self.index.key_attributes()
    }
}
