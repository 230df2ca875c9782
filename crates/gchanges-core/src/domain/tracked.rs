//! Tracked records and capacity eviction
//!
//! [`TrackedRecords`] is the data behind a state store: the records the
//! pipeline knows about, ordered from most to least recently touched. Loading
//! establishes the initial order (the store's own notion of recency); every
//! create or update during a run moves the record to the front. Whatever falls
//! beyond the capacity limit is archived at the end of the run.

use serde::{Deserialize, Serialize};

use super::newtypes::{Guid, RecordId};

/// Which tracked records may be returned as over capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Every record competes for a slot; records touched this run rank first
    #[default]
    LeastRecentlyTouched,
    /// Same ranking, but records touched this run are never evicted
    UntouchedOnly,
}

/// One record known to the state store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRecord {
    pub guid: Guid,
    /// Id of the record; `None` when the service did not report one
    pub record_id: Option<RecordId>,
    /// Whether the record was created or updated during this run
    pub touched: bool,
}

/// Ordered guid → record mapping, most recently touched first
///
/// Holds at most one entry per guid.
#[derive(Debug, Clone, Default)]
pub struct TrackedRecords {
    entries: Vec<TrackedRecord>,
    policy: EvictionPolicy,
}

impl TrackedRecords {
    /// Creates an empty set using the given eviction policy
    pub fn new(policy: EvictionPolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
        }
    }

    /// Builds the set from `(guid, record id)` pairs, most recent first
    ///
    /// Later duplicates of a guid are ignored.
    pub fn from_ordered(
        records: impl IntoIterator<Item = (Guid, RecordId)>,
        policy: EvictionPolicy,
    ) -> Self {
        let mut tracked = Self::new(policy);
        for (guid, record_id) in records {
            if tracked.position(&guid).is_some() {
                tracing::debug!(guid = %guid, record_id = %record_id, "Ignoring duplicate tracked record");
                continue;
            }
            tracked.entries.push(TrackedRecord {
                guid,
                record_id: Some(record_id),
                touched: false,
            });
        }
        tracked
    }

    /// Eviction policy in effect
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Number of tracked records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no records are tracked
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked records, most recently touched first
    pub fn iter(&self) -> impl Iterator<Item = &TrackedRecord> {
        self.entries.iter()
    }

    /// Record id tracked for `guid`, if any
    pub fn record_id(&self, guid: &Guid) -> Option<&RecordId> {
        self.entries
            .iter()
            .find(|e| &e.guid == guid)
            .and_then(|e| e.record_id.as_ref())
    }

    /// Starts tracking `guid` as the most recently touched record
    ///
    /// Replaces any existing entry for the same guid.
    pub fn insert(&mut self, guid: Guid, record_id: Option<RecordId>) {
        self.remove(&guid);
        self.entries.insert(
            0,
            TrackedRecord {
                guid,
                record_id,
                touched: true,
            },
        );
    }

    /// Marks `guid` as touched and moves it to the front
    ///
    /// Returns false if the guid is not tracked.
    pub fn touch(&mut self, guid: &Guid) -> bool {
        match self.position(guid) {
            Some(idx) => {
                let mut entry = self.entries.remove(idx);
                entry.touched = true;
                self.entries.insert(0, entry);
                true
            }
            None => false,
        }
    }

    /// Stops tracking `guid`
    pub fn remove(&mut self, guid: &Guid) -> Option<TrackedRecord> {
        self.position(guid).map(|idx| self.entries.remove(idx))
    }

    /// Ids of the records beyond the most recent `limit` entries, in order
    ///
    /// Entries without a record id are skipped. Under
    /// [`EvictionPolicy::UntouchedOnly`] records touched this run are kept even
    /// when they fall beyond the limit.
    pub fn over_capacity(&self, limit: usize) -> Vec<RecordId> {
        self.entries
            .iter()
            .skip(limit)
            .filter(|e| match self.policy {
                EvictionPolicy::LeastRecentlyTouched => true,
                EvictionPolicy::UntouchedOnly => !e.touched,
            })
            .filter_map(|e| e.record_id.clone())
            .collect()
    }

    fn position(&self, guid: &Guid) -> Option<usize> {
        self.entries.iter().position(|e| &e.guid == guid)
    }
}
