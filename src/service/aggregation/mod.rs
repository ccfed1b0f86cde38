//! Aggregation engine merging fetched activity into the timeslice caches.
//!
//! Fetched revisions and uploads are validated and grouped by window ([`batch`]), filtered
//! against each window's high-water mark, turned into per-scope deltas ([`delta`]) and persisted
//! window by window, each window in its own transaction ([`store`]).

pub mod batch;
pub mod delta;
mod store;

#[cfg(test)]
mod tests;

use sea_orm::DatabaseConnection;

use crate::model::timeslice::HighWaterMark;

pub use batch::{ActivityFilter, GroupedActivity, WindowBatch};

/// Result of applying one window batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowOutcome {
    pub revisions_applied: usize,
    pub uploads_applied: usize,
    /// Mark stored on the window after the merge.
    pub mark: HighWaterMark,
}

pub struct AggregationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AggregationService<'a> {
    /// Creates a new instance of [`AggregationService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}
