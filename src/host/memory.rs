//! In-memory reference host.
//!
//! An ordered layer store with a synchronous query engine and a placeholder
//! template renderer. This is the host the CLI runs against and the test
//! double the service contract is verified against; real map applications
//! supply their own `QueryHost`.

use crate::error::ServiceError;
use crate::host::QueryHost;
use crate::query::bus::{CompletedQuery, CompletionBus};
use crate::query::criteria::{Comparitor, QueryFilter};
use crate::query::record::{Feature, LayerResult, QueryRecord};
use crate::query::tracker::PendingQueries;
use crate::types::{LayerPath, QueryId, Selection};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use std::sync::Mutex;
use tracing::debug;

struct LayerEntry {
    path: LayerPath,
    queryable: bool,
    features: Vec<Feature>,
}

/// In-memory `QueryHost` implementation.
///
/// Layers keep insertion order; `queryable_layers` reflects the flags at call
/// time. Dispatch evaluates filters synchronously and delivers the completed
/// record on the completion bus before returning, which still honors the
/// contract: callers only learn about completion by draining the bus.
pub struct MemoryHost {
    layers: RwLock<Vec<LayerEntry>>,
    templates: RwLock<HashMap<String, String>>,
    tracker: PendingQueries,
    bus: CompletionBus,
    completed: Mutex<Receiver<CompletedQuery>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        let (bus, receiver) = CompletionBus::new_pair();
        Self {
            layers: RwLock::new(Vec::new()),
            templates: RwLock::new(HashMap::new()),
            tracker: PendingQueries::new(),
            bus,
            completed: Mutex::new(receiver),
        }
    }

    /// Add a layer at the end of the table. Re-adding a path replaces its
    /// entry in place, keeping the original position.
    pub fn add_layer(&self, path: LayerPath, queryable: bool, features: Vec<Feature>) {
        let mut layers = self.layers.write();
        if let Some(entry) = layers.iter_mut().find(|e| e.path == path) {
            entry.queryable = queryable;
            entry.features = features;
        } else {
            layers.push(LayerEntry {
                path,
                queryable,
                features,
            });
        }
    }

    pub fn set_queryable(&self, path: &LayerPath, queryable: bool) {
        if let Some(entry) = self.layers.write().iter_mut().find(|e| &e.path == path) {
            entry.queryable = queryable;
        }
    }

    pub fn set_template(&self, name: impl Into<String>, body: impl Into<String>) {
        self.templates.write().insert(name.into(), body.into());
    }

    /// Next completed query from the bus, if one is waiting.
    pub fn next_completed(&self) -> Result<Option<CompletedQuery>, ServiceError> {
        let receiver = self
            .completed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match receiver.try_recv() {
            Ok(completed) => Ok(Some(completed)),
            Err(std::sync::mpsc::TryRecvError::Empty) => Ok(None),
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                Err(ServiceError::CompletionChannelClosed)
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.tracker.in_flight()
    }

    fn feature_matches(feature: &Feature, filters: &[QueryFilter]) -> bool {
        filters.iter().all(|filter| match filter {
            QueryFilter::Criterion(criterion) => feature
                .property(&criterion.name)
                .map(|value| criterion.comparitor.matches(&criterion.value, value))
                .unwrap_or(false),
            QueryFilter::Field(field) => {
                if field.value.is_empty() {
                    return true;
                }
                feature
                    .property(&field.name)
                    .map(|value| {
                        Comparitor::Ilike.matches(&format!("*{}*", field.value), value)
                    })
                    .unwrap_or(false)
            }
        })
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryHost for MemoryHost {
    fn queryable_layers(&self) -> Vec<LayerPath> {
        self.layers
            .read()
            .iter()
            .filter(|entry| entry.queryable)
            .map(|entry| entry.path.clone())
            .collect()
    }

    fn dispatch_query(
        &self,
        service: &str,
        selection: Option<Selection>,
        filters: Vec<QueryFilter>,
        layers: Vec<LayerPath>,
    ) -> Result<QueryId, ServiceError> {
        let query_id = self.tracker.begin(service);
        debug!(
            service = %service,
            query_id = %query_id,
            layer_count = layers.len(),
            filter_count = filters.len(),
            has_selection = selection.is_some(),
            "dispatching query"
        );

        // Selection geometry is recorded but not evaluated; spatial
        // predicates belong to real query engines.
        let mut record = QueryRecord::new(layers);
        {
            let table = self.layers.read();
            for path in record.layers.clone() {
                let result = match table.iter().find(|entry| entry.path == path) {
                    Some(entry) => {
                        let features: Vec<Feature> = entry
                            .features
                            .iter()
                            .filter(|feature| Self::feature_matches(feature, &filters))
                            .cloned()
                            .collect();
                        LayerResult::ok(features)
                    }
                    None => {
                        debug!(layer = %path, "unknown target layer, marking failed");
                        LayerResult::failed()
                    }
                };
                record.insert_result(path, result);
            }
        }

        self.tracker.complete(query_id);
        self.bus
            .deliver(query_id, service, record)
            .map_err(|_| ServiceError::CompletionChannelClosed)?;
        Ok(query_id)
    }

    fn render_features(&self, record: &QueryRecord, layer: &LayerPath, template: &str) -> String {
        let features = match record.result_for(layer) {
            Some(result) => &result.features,
            None => return String::new(),
        };
        let templates = self.templates.read();
        let Some(body) = templates.get(template) else {
            debug!(template = %template, "template not registered, rendering nothing");
            return String::new();
        };

        let mut markup = String::new();
        for feature in features {
            markup.push_str(&substitute(body, feature));
        }
        markup
    }
}

/// Replace `{{property}}` placeholders with feature property values.
/// Unknown properties render as the empty string.
fn substitute(template: &str, feature: &Feature) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                if let Some(value) = feature.property(key) {
                    out.push_str(value);
                } else if let Some(value) = feature.properties.get(key) {
                    out.push_str(&value.to_string());
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
