//! In-process completion bus for finished queries.
//!
//! Decouples dispatch from any specific concurrency primitive: a host
//! executes queries however it likes and delivers each completed record here,
//! keyed by the correlation id returned at dispatch time.

use crate::query::record::QueryRecord;
use crate::types::QueryId;
use chrono::{SecondsFormat, Utc};
use std::sync::mpsc::{channel, Receiver, Sender};

/// One completed query as delivered on the bus.
#[derive(Debug, Clone)]
pub struct CompletedQuery {
    pub ts: String,
    pub query_id: QueryId,
    pub service: String,
    pub record: QueryRecord,
}

#[derive(Clone)]
pub struct CompletionBus {
    sender: Sender<CompletedQuery>,
}

impl CompletionBus {
    pub fn new_pair() -> (Self, Receiver<CompletedQuery>) {
        let (sender, receiver) = channel();
        (Self { sender }, receiver)
    }

    pub fn deliver(
        &self,
        query_id: QueryId,
        service: impl Into<String>,
        record: QueryRecord,
    ) -> Result<(), std::sync::mpsc::SendError<CompletedQuery>> {
        let completed = CompletedQuery {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            query_id,
            service: service.into(),
            record,
        };
        self.sender.send(completed)
    }
}
