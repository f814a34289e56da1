//! Query primitives: filters, completed-query records, in-flight tracking,
//! and the completion bus.

pub mod bus;
pub mod criteria;
pub mod record;
pub mod tracker;

pub use bus::{CompletedQuery, CompletionBus};
pub use criteria::{Comparitor, QueryCriterion, QueryFilter};
pub use record::{Feature, LayerResult, QueryRecord};
pub use tracker::{PendingQueries, PendingQuery};
