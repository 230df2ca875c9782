//! In-memory state store
//!
//! [`MemoryStateStore`] wraps a [`TrackedRecords`] snapshot for the duration
//! of one run. Callers load the snapshot (e.g. from the Notion database) and
//! hand it over; nothing is written back on flush since the record service
//! itself is the durable state.

use std::cell::RefCell;

use gchanges_core::domain::{EvictionPolicy, Guid, RecordId, TrackedRecords};
use gchanges_core::ports::StateStore;

/// State store backed by an in-memory [`TrackedRecords`]
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    records: RefCell<TrackedRecords>,
}

impl MemoryStateStore {
    pub fn new(records: TrackedRecords) -> Self {
        Self {
            records: RefCell::new(records),
        }
    }

    /// An empty store using `policy`
    pub fn empty(policy: EvictionPolicy) -> Self {
        Self::new(TrackedRecords::new(policy))
    }

    /// Copy of the current tracked records
    pub fn snapshot(&self) -> TrackedRecords {
        self.records.borrow().clone()
    }

    pub fn into_inner(self) -> TrackedRecords {
        self.records.into_inner()
    }
}

impl StateStore for MemoryStateStore {
    fn record_id(&self, guid: &Guid) -> Option<RecordId> {
        self.records.borrow().record_id(guid).cloned()
    }

    fn mark_created(&self, guid: &Guid, record_id: Option<RecordId>) {
        self.records.borrow_mut().insert(guid.clone(), record_id);
    }

    fn mark_updated(&self, guid: &Guid) {
        if !self.records.borrow_mut().touch(guid) {
            tracing::debug!(guid = %guid, "Updated record is not tracked");
        }
    }

    fn mark_deleted(&self, guid: &Guid) {
        self.records.borrow_mut().remove(guid);
    }

    fn over_capacity_ids(&self, limit: usize) -> Vec<RecordId> {
        self.records.borrow().over_capacity(limit)
    }
}
