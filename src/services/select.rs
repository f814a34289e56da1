//! Interactive selection against whatever layers are currently queryable.

use crate::error::ServiceError;
use crate::field::{FieldOption, FieldSpec, FieldValue};
use crate::host::QueryHost;
use crate::query::criteria::QueryFilter;
use crate::service::{QueryPlan, QueryService, ServiceDefinition, ServiceOptions};
use crate::tools::ToolCapabilitySet;
use std::sync::Arc;

/// Forwards submitted fields unmodified and targets every queryable layer.
///
/// The layer list is resolved at plan time, so toggling a layer's queryable
/// flag between two dispatches changes what the second one hits.
pub struct SelectService {
    definition: ServiceDefinition,
    host: Arc<dyn QueryHost>,
}

impl std::fmt::Debug for SelectService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectService")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

impl SelectService {
    pub fn new(host: Arc<dyn QueryHost>, options: ServiceOptions) -> Self {
        Self {
            definition: options.resolve(Self::defaults()),
            host,
        }
    }

    fn defaults() -> ServiceDefinition {
        ServiceDefinition {
            title: "Select".to_string(),
            results_title: "Select Results".to_string(),
            template: "@select".to_string(),
            tools: ToolCapabilitySet::spatial(),
            auto_go: false,
            keep_alive: false,
            fields: vec![FieldSpec::select(
                "layer",
                "Layer",
                vec![
                    FieldOption::new("parcels/parcels", "Parcels"),
                    FieldOption::new("pipelines/pipelines", "Pipelines"),
                    FieldOption::new("parcels/points", "Parcel Points"),
                ],
            )],
        }
    }
}

impl QueryService for SelectService {
    fn definition(&self) -> &ServiceDefinition {
        &self.definition
    }

    fn host(&self) -> &dyn QueryHost {
        self.host.as_ref()
    }

    fn plan(&self, fields: &[FieldValue]) -> Result<QueryPlan, ServiceError> {
        Ok(QueryPlan {
            filters: fields.iter().cloned().map(QueryFilter::Field).collect(),
            layers: self.host.queryable_layers(),
        })
    }
}
