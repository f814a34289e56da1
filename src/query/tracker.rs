//! In-flight query bookkeeping.

use crate::types::QueryId;
use chrono::{SecondsFormat, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metadata for one dispatched, not-yet-completed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub service: String,
    pub dispatched_at: String,
}

/// Correlation-id allocation and in-flight bookkeeping.
///
/// Ids are unique for the lifetime of the tracker. Overlapping dispatches
/// from the same service are distinguished only by `QueryId`.
pub struct PendingQueries {
    next_id: AtomicU64,
    pending: RwLock<HashMap<QueryId, PendingQuery>>,
}

impl PendingQueries {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            pending: RwLock::new(HashMap::new()),
        }
    }

    /// Allocate a fresh id and record the query as in flight.
    pub fn begin(&self, service: &str) -> QueryId {
        let id = QueryId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let entry = PendingQuery {
            service: service.to_string(),
            dispatched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.pending.write().insert(id, entry);
        id
    }

    /// Remove a completed query, returning its metadata if it was tracked.
    pub fn complete(&self, id: QueryId) -> Option<PendingQuery> {
        self.pending.write().remove(&id)
    }

    pub fn get(&self, id: QueryId) -> Option<PendingQuery> {
        self.pending.read().get(&id).cloned()
    }

    pub fn in_flight(&self) -> usize {
        self.pending.read().len()
    }
}

impl Default for PendingQueries {
    fn default() -> Self {
        Self::new()
    }
}
