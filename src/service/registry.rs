//! Name-keyed registry of constructed services.

use crate::error::ServiceError;
use crate::field::FieldValue;
use crate::query::record::QueryRecord;
use crate::service::{QueryService, ServiceDefinition};
use crate::types::{QueryId, Selection};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A service bound to its registered name.
///
/// The binding happens exactly once, at registration; every dispatch and
/// aggregation made through this handle carries the bound name.
#[derive(Debug)]
pub struct RegisteredService {
    name: String,
    service: Box<dyn QueryService>,
}

impl RegisteredService {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &ServiceDefinition {
        self.service.definition()
    }

    pub fn query(
        &self,
        selection: Option<Selection>,
        fields: &[FieldValue],
    ) -> Result<QueryId, ServiceError> {
        self.service.query(&self.name, selection, fields)
    }

    pub fn results_as_html(&self, query_id: QueryId, record: &QueryRecord) -> String {
        self.service.results_as_html(query_id, record)
    }
}

/// Thread-safe lookup table from service name to bound service.
pub struct ServiceRegistry {
    services: RwLock<HashMap<String, Arc<RegisteredService>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            services: RwLock::new(HashMap::new()),
        }
    }

    /// Bind a service to a name. Re-registering a live name is an error;
    /// `remove` first to replace a service.
    pub fn register(
        &self,
        name: impl Into<String>,
        service: Box<dyn QueryService>,
    ) -> Result<Arc<RegisteredService>, ServiceError> {
        let name = name.into();
        let mut services = self.services.write();
        if services.contains_key(&name) {
            return Err(ServiceError::AlreadyRegistered(name));
        }
        let registered = Arc::new(RegisteredService {
            name: name.clone(),
            service,
        });
        services.insert(name.clone(), Arc::clone(&registered));
        debug!(service = %name, "registered service");
        Ok(registered)
    }

    pub fn get(&self, name: &str) -> Option<Arc<RegisteredService>> {
        self.services.read().get(name).cloned()
    }

    pub fn get_or_error(&self, name: &str) -> Result<Arc<RegisteredService>, ServiceError> {
        self.get(name)
            .ok_or_else(|| ServiceError::ServiceNotFound(name.to_string()))
    }

    /// Registered names in sorted order.
    pub fn list_all(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn remove(&self, name: &str) -> Option<Arc<RegisteredService>> {
        self.services.write().remove(name)
    }

    pub fn len(&self) -> usize {
        self.services.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.read().is_empty()
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
