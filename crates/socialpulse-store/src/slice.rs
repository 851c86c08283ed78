//! Per-category fetch state
//!
//! Lifecycle: `Idle` at construction, `Pending` on every dispatch, then
//! `Fulfilled` or `Rejected` when the fetch resolves. A slice never leaves
//! `Idle` except through `Pending`.

use chrono::{DateTime, Utc};
use socialpulse_core::{Category, Payload};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

#[derive(Debug, Clone)]
pub struct QuerySlice {
    pub category: Category,
    pub status: QueryStatus,
    /// Last successful payload. Kept while a refetch is pending or after it fails.
    pub payload: Option<Payload>,
    pub error_message: Option<String>,
    /// Generation of the most recently dispatched fetch, 0 before the first
    pub generation: u64,
    /// Generation whose result currently occupies the slice
    pub resolved_generation: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuerySlice {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            status: QueryStatus::Idle,
            payload: None,
            error_message: None,
            generation: 0,
            resolved_generation: 0,
            updated_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == QueryStatus::Pending
    }

    /// Mark a new fetch as in flight and return its generation
    pub(crate) fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.status = QueryStatus::Pending;
        self.generation
    }

    /// True when a fetch of `generation` has been superseded by a later dispatch
    pub(crate) fn is_stale(&self, generation: u64) -> bool {
        generation < self.generation
    }

    pub(crate) fn fulfill(&mut self, generation: u64, payload: Payload) {
        self.status = QueryStatus::Fulfilled;
        self.payload = Some(payload);
        self.error_message = None;
        self.resolved_generation = generation;
        self.updated_at = Some(Utc::now());
    }

    pub(crate) fn reject(&mut self, generation: u64, message: String) {
        self.status = QueryStatus::Rejected;
        self.error_message = Some(message);
        self.resolved_generation = generation;
        self.updated_at = Some(Utc::now());
    }
}
