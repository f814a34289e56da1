//! Completed-query records delivered by the host.
//!
//! The host owns these records; the core reads them during aggregation and
//! never mutates them.

use crate::types::LayerPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One feature returned by a backend engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Value>,
}

impl Feature {
    /// Build a feature from property pairs, no geometry.
    pub fn with_properties(pairs: &[(&str, &str)]) -> Self {
        let mut properties = Map::new();
        for (name, value) in pairs {
            properties.insert((*name).to_string(), Value::String((*value).to_string()));
        }
        Self {
            properties,
            geometry: None,
        }
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }
}

/// Per-layer outcome of a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerResult {
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub failed: bool,
}

impl LayerResult {
    pub fn ok(features: Vec<Feature>) -> Self {
        Self {
            features,
            failed: false,
        }
    }

    pub fn failed() -> Self {
        Self {
            features: Vec::new(),
            failed: true,
        }
    }
}

/// The completed record for one dispatched query.
///
/// `layers` fixes the aggregation order. `results` need not contain an entry
/// for every listed path; a missing entry is treated identically to
/// `failed: true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub layers: Vec<LayerPath>,
    #[serde(default)]
    pub results: HashMap<LayerPath, LayerResult>,
}

impl QueryRecord {
    pub fn new(layers: Vec<LayerPath>) -> Self {
        Self {
            layers,
            results: HashMap::new(),
        }
    }

    pub fn insert_result(&mut self, layer: LayerPath, result: LayerResult) {
        self.results.insert(layer, result);
    }

    pub fn result_for(&self, layer: &LayerPath) -> Option<&LayerResult> {
        self.results.get(layer)
    }

    /// Whether aggregation should render this layer: an entry exists and is
    /// not marked failed.
    pub fn succeeded(&self, layer: &LayerPath) -> bool {
        self.results.get(layer).is_some_and(|r| !r.failed)
    }
}
