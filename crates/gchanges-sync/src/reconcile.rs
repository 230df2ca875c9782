//! Capacity reconciliation
//!
//! After a run's commands are applied, only the `limit` most recently touched
//! records stay live; everything beyond is archived.

use anyhow::Context;
use tracing::info;

use gchanges_core::domain::{RecordId, UpdateRecordParams};
use gchanges_core::ports::{RecordService, StateStore};

/// Ids of the tracked records beyond the `limit` most recently touched
///
/// Records without a known id are never returned. Which records qualify is
/// governed by the store's eviction policy.
pub fn over_capacity_ids<S>(store: &S, limit: usize) -> Vec<RecordId>
where
    S: StateStore + ?Sized,
{
    store.over_capacity_ids(limit)
}

/// Archives every over-capacity record, returning the archived ids
///
/// Stops at the first failing call; records archived before it stay archived.
pub fn archive_over_capacity<S>(
    records: &dyn RecordService,
    store: &S,
    limit: usize,
) -> anyhow::Result<Vec<RecordId>>
where
    S: StateStore + ?Sized,
{
    let ids = over_capacity_ids(store, limit);
    for id in &ids {
        records
            .update_record(&UpdateRecordParams::archive(id.clone()))
            .with_context(|| format!("Failed to archive over-capacity record {id}"))?;
        info!(record_id = %id, "Archived over-capacity record");
    }
    Ok(ids)
}
