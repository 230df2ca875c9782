//! Loading tracked records from a database
//!
//! The database itself is the persistent state of the pipeline: every live
//! page carrying a `guid` property is a tracked record, and the query order
//! (newest `entryUpdated` first) is the recency order eviction works from.

use anyhow::Context;
use tracing::{debug, info};

use gchanges_core::domain::{EvictionPolicy, Guid, RecordId, TrackedRecords};

use crate::client::NotionClient;
use crate::properties::page_guid;

/// Reads every live page of `database_id` into a tracked record set
///
/// Follows `next_cursor` until `has_more` is false. Archived pages and pages
/// without a usable guid are skipped.
pub fn load_tracked_records(
    client: &NotionClient,
    database_id: &str,
    policy: EvictionPolicy,
) -> anyhow::Result<TrackedRecords> {
    let mut ordered = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let response = client
            .query_database(database_id, cursor.as_deref())
            .with_context(|| format!("Failed to query database {database_id}"))?;
        pages += 1;

        for page in response.results {
            if page.archived {
                continue;
            }
            let Some(guid) = page_guid(&page.properties) else {
                debug!(page_id = %page.id, "Page has no guid, not tracked");
                continue;
            };
            match (Guid::new(guid), RecordId::new(page.id)) {
                (Ok(guid), Ok(id)) => ordered.push((guid, id)),
                (guid, id) => {
                    debug!(guid = ?guid.ok(), id = ?id.ok(), "Skipping page with invalid identifiers");
                }
            }
        }

        match response.next_cursor {
            Some(next) if response.has_more => cursor = Some(next),
            _ => break,
        }
    }

    let records = TrackedRecords::from_ordered(ordered, policy);
    info!(database_id, records = records.len(), pages, "Loaded tracked records");
    Ok(records)
}
