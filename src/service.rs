//! The service contract.
//!
//! Every query service implements `QueryService`: a definition accessor plus
//! the `plan` extension point. Dispatch (`query`) and result aggregation
//! (`results_as_html`) are provided by the trait and shared by every
//! implementation, so a service only decides what to ask, never how the
//! protocol runs.

use crate::error::ServiceError;
use crate::field::FieldValue;
use crate::host::QueryHost;
use crate::query::criteria::QueryFilter;
use crate::query::record::QueryRecord;
use crate::types::{LayerPath, QueryId, Selection};
use tracing::debug;

mod definition;
mod factory;
mod registry;

pub use definition::{ServiceDefinition, ServiceOptions};
pub use factory::{ServiceConfig, ServiceFactory, ServiceKind};
pub use registry::{RegisteredService, ServiceRegistry};

/// What a service wants dispatched: the filters to apply and the layers to
/// run them against.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub filters: Vec<QueryFilter>,
    pub layers: Vec<LayerPath>,
}

/// Uniform contract implemented by every query service.
pub trait QueryService: Send + Sync + std::fmt::Debug {
    /// The immutable definition resolved at construction time.
    fn definition(&self) -> &ServiceDefinition;

    /// The host capabilities this service was constructed against.
    fn host(&self) -> &dyn QueryHost;

    /// Turn submitted field values into a dispatchable plan.
    ///
    /// This is the framework extension point: the select service forwards
    /// fields unmodified against the host's queryable layers, the search
    /// service normalizes them into criteria against a fixed layer list.
    fn plan(&self, fields: &[FieldValue]) -> Result<QueryPlan, ServiceError>;

    /// Dispatch a query. Fire and forget: returns the correlation id and
    /// never assumes completion before return.
    ///
    /// `name` is the registered service name, bound by the registry; the
    /// definition itself does not carry it.
    fn query(
        &self,
        name: &str,
        selection: Option<Selection>,
        fields: &[FieldValue],
    ) -> Result<QueryId, ServiceError> {
        let plan = self.plan(fields)?;
        debug!(
            service = %name,
            layer_count = plan.layers.len(),
            filter_count = plan.filters.len(),
            "planned query"
        );
        self.host()
            .dispatch_query(name, selection, plan.filters, plan.layers)
    }

    /// Aggregate a completed query record into markup.
    ///
    /// Iterates `record.layers` in order; layers with a missing or failed
    /// result are skipped silently. Pure with respect to core state,
    /// idempotent, and reentrant. Returns the empty string if no layer
    /// succeeded. `query_id` is accepted for correlation only.
    fn results_as_html(&self, query_id: QueryId, record: &QueryRecord) -> String {
        let template = &self.definition().template;
        let mut markup = String::new();
        for layer in &record.layers {
            if !record.succeeded(layer) {
                debug!(query_id = %query_id, layer = %layer, "skipping layer without usable result");
                continue;
            }
            markup.push_str(&self.host().render_features(record, layer, template));
        }
        markup
    }
}
