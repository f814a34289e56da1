//! Host capability interface consumed by services.

use crate::error::ServiceError;
use crate::query::criteria::QueryFilter;
use crate::query::record::QueryRecord;
use crate::types::{LayerPath, QueryId, Selection};

pub mod memory;

pub use memory::MemoryHost;

/// The capabilities a map application exposes to the framework.
///
/// Services never talk to a query engine or template renderer directly; every
/// outward call goes through this trait.
pub trait QueryHost: Send + Sync {
    /// Layers currently flagged queryable, in host order.
    ///
    /// Re-evaluated on every call; services must not cache the result across
    /// dispatches.
    fn queryable_layers(&self) -> Vec<LayerPath>;

    /// Hand a planned query to the host engine.
    ///
    /// Fire and forget: returns the correlation id immediately and never
    /// waits for execution. The completed record arrives out-of-band on the
    /// host's completion bus. Per-layer failures surface later through
    /// `failed` flags, never as dispatch errors.
    fn dispatch_query(
        &self,
        service: &str,
        selection: Option<Selection>,
        filters: Vec<QueryFilter>,
        layers: Vec<LayerPath>,
    ) -> Result<QueryId, ServiceError>;

    /// Render the features of one layer through the named template.
    ///
    /// Must not fail for a layer with zero features; returns empty markup in
    /// that case.
    fn render_features(&self, record: &QueryRecord, layer: &LayerPath, template: &str) -> String;
}
