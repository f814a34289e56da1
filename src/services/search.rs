//! Keyword search normalized into attribute criteria on a fixed layer.

use crate::error::ServiceError;
use crate::field::{FieldSpec, FieldValue};
use crate::host::QueryHost;
use crate::query::criteria::{QueryCriterion, QueryFilter};
use crate::service::{QueryPlan, QueryService, ServiceDefinition, ServiceOptions};
use crate::tools::ToolCapabilitySet;
use crate::types::LayerPath;
use std::sync::Arc;

/// Attribute the keyword is matched against.
const SEARCH_ATTRIBUTE: &str = "OWNER_NAME";
/// Layer the search always targets, queryable flag or not.
const SEARCH_LAYER: &str = "vector-parcels/ms:parcels";

/// Turns the submitted keyword into a case-insensitive contains criterion.
///
/// An empty keyword widens the pattern to `**`, which matches every feature;
/// filtering degenerate input is the caller's concern.
pub struct SearchService {
    definition: ServiceDefinition,
    host: Arc<dyn QueryHost>,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

impl SearchService {
    pub fn new(host: Arc<dyn QueryHost>, options: ServiceOptions) -> Self {
        Self {
            definition: options.resolve(Self::defaults()),
            host,
        }
    }

    fn defaults() -> ServiceDefinition {
        ServiceDefinition {
            title: "Search".to_string(),
            results_title: "Search Results".to_string(),
            template: "@search".to_string(),
            tools: ToolCapabilitySet::none(),
            auto_go: false,
            keep_alive: false,
            fields: vec![FieldSpec::text("keyword", "Name")],
        }
    }
}

impl QueryService for SearchService {
    fn definition(&self) -> &ServiceDefinition {
        &self.definition
    }

    fn host(&self) -> &dyn QueryHost {
        self.host.as_ref()
    }

    fn plan(&self, fields: &[FieldValue]) -> Result<QueryPlan, ServiceError> {
        let keyword = fields.first().map(|field| field.value.as_str()).unwrap_or("");
        Ok(QueryPlan {
            filters: vec![QueryFilter::Criterion(QueryCriterion::ilike_contains(
                SEARCH_ATTRIBUTE,
                keyword,
            ))],
            layers: vec![LayerPath::from(SEARCH_LAYER)],
        })
    }
}
