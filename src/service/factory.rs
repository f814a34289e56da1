//! Construction of services from configuration records.

use crate::error::ServiceError;
use crate::host::QueryHost;
use crate::service::{QueryService, ServiceOptions};
use crate::services::search::SearchService;
use crate::services::select::SelectService;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The built-in service implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Select,
    Search,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::Select => write!(f, "select"),
            ServiceKind::Search => write!(f, "search"),
        }
    }
}

impl Default for ServiceKind {
    fn default() -> Self {
        ServiceKind::Select
    }
}

/// One service entry as it appears in configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub kind: ServiceKind,
    #[serde(flatten)]
    pub options: ServiceOptions,
}

impl ServiceConfig {
    pub fn new(kind: ServiceKind) -> Self {
        Self {
            kind,
            options: ServiceOptions::default(),
        }
    }
}

/// Builds a concrete service for a configuration record.
pub struct ServiceFactory;

impl ServiceFactory {
    pub fn create(
        host: Arc<dyn QueryHost>,
        config: &ServiceConfig,
    ) -> Result<Box<dyn QueryService>, ServiceError> {
        let service: Box<dyn QueryService> = match config.kind {
            ServiceKind::Select => Box::new(SelectService::new(host, config.options.clone())),
            ServiceKind::Search => Box::new(SearchService::new(host, config.options.clone())),
        };
        if let Err(reason) = service.definition().tools.validate() {
            return Err(ServiceError::InvalidDefinition {
                service: config.kind.to_string(),
                reason,
            });
        }
        debug!(kind = %config.kind, title = %service.definition().title, "created service");
        Ok(service)
    }
}
