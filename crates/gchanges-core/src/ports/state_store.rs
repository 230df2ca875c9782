//! State store port
//!
//! The state store remembers which record mirrors which file. It is opened
//! once per run for a single database, mutated while commands are applied and
//! flushed at the end.
//!
//! ## Design Notes
//!
//! - Every method takes `&self` so the planner can consult the store while the
//!   orchestrator mutates it in the same pass; implementations use interior
//!   mutability and are not expected to be `Sync`.

use crate::domain::{Guid, RecordId};

/// Per-run guid → record mapping with a touch order
pub trait StateStore {
    /// Record id mirroring `guid`, if tracked
    fn record_id(&self, guid: &Guid) -> Option<RecordId>;

    /// Starts tracking a freshly created record as the most recently touched
    fn mark_created(&self, guid: &Guid, record_id: Option<RecordId>);

    /// Marks a tracked record as touched
    fn mark_updated(&self, guid: &Guid);

    /// Stops tracking a record
    fn mark_deleted(&self, guid: &Guid);

    /// Ids of the records beyond the `limit` most recently touched
    fn over_capacity_ids(&self, limit: usize) -> Vec<RecordId>;

    /// Persists pending changes
    fn flush(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
