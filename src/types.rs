//! Core identifier and value types shared across the framework.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Correlation token for an in-flight query.
///
/// Allocated by the host at dispatch time; multiple queries may be in flight
/// per service, distinguished only by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryId(pub u64);

impl std::fmt::Display for QueryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "query-{}", self.0)
    }
}

/// Hierarchical layer identifier, e.g. `vector-parcels/ms:parcels`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerPath(String);

impl LayerPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LayerPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for LayerPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl std::fmt::Display for LayerPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Spatial input captured by the host's drawing UI.
///
/// The geometry is carried as free-form GeoJSON; the core forwards it to the
/// host engine without interpreting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub geometry: Value,
}

impl Selection {
    pub fn new(geometry: Value) -> Self {
        Self { geometry }
    }
}
