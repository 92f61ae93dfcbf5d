use std::fmt;
use std::sync::Arc;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Identifier of a point category.
///
/// Backed by a shared string: a quarter-million points and the filter
/// buffers refilled on every interaction all alias a handful of small
/// allocations, so cloning one is a refcount bump, not a copy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryId(Arc<str>);

impl CategoryId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        CategoryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        CategoryId(Arc::from(s))
    }
}

impl PartialEq<str> for CategoryId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for CategoryId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for CategoryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(CategoryId(Arc::from(s)))
    }
}

/// A raw seed record as produced by the offline generator.
///
/// Only `position` is guaranteed. The generator deliberately drops the other
/// fields on some records, and hand-edited assets may carry mistyped ones,
/// which is why untrusted payloads are walked as JSON during normalization
/// rather than deserialized straight into this type.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeedPoint {
    pub position: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A canonical point: bounds-valid and fully populated.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Point {
    pub id: String,
    pub position: [f64; 2],
    pub value: i32,
    pub category: CategoryId,
}

impl Point {
    pub fn lng(&self) -> f64 {
        self.position[0]
    }

    pub fn lat(&self) -> f64 {
        self.position[1]
    }
}

/// Observed min/max of `value` across a collection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValueDomain {
    pub min: i32,
    pub max: i32,
}

/// The long-lived dataset: expanded points plus their value domain.
///
/// Built once per session. Filter interactions only read it; nothing
/// downstream replaces `items` or the points inside. The domain travels with
/// the points so range controls don't rescan the whole collection.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PointCollection {
    pub items: Vec<Point>,
    pub value_domain: ValueDomain,
}

impl PointCollection {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
