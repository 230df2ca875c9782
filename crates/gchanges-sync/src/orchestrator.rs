//! Send orchestration
//!
//! The [`SyncRunner`] drives one pass over a change list:
//!
//! 1. **Open**: the state store is opened for the target database (skipped
//!    entirely when the change list carries no files)
//! 2. **Apply**: each planned command is dispatched to the record service and
//!    recorded in the store, in input order
//! 3. **Reconcile**: records beyond the capacity limit are archived
//! 4. **Flush**: the store persists its changes
//!
//! Any failure aborts the run. Calls already made are not rolled back.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use gchanges_core::domain::{ActionCommand, ChangeList};
use gchanges_core::ports::{ContentExtractor, FileSource, RecordService, StateStore};

use crate::normalizer::Clock;
use crate::options::SendOptions;
use crate::planner::ActionPlanner;
use crate::reconcile;
use crate::transform::PlannedAction;

/// Counts of what one run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SendSummary {
    /// Records created for new files
    pub created: usize,
    /// Records updated for changed files
    pub updated: usize,
    /// Records archived because their file was trashed
    pub archived: usize,
    /// Records archived because they fell beyond the capacity limit
    pub evicted: usize,
}

impl SendSummary {
    /// Total number of record-service calls made
    pub fn total(&self) -> usize {
        self.created + self.updated + self.archived + self.evicted
    }
}

/// Runs the pipeline against a record service
pub struct SyncRunner<'a> {
    records: &'a dyn RecordService,
    source: &'a dyn FileSource,
    extractor: &'a dyn ContentExtractor,
    clock: Clock,
}

impl<'a> SyncRunner<'a> {
    pub fn new(
        records: &'a dyn RecordService,
        source: &'a dyn FileSource,
        extractor: &'a dyn ContentExtractor,
    ) -> Self {
        Self {
            records,
            source,
            extractor,
            clock: Utc::now,
        }
    }

    /// Replaces the clock used for timestamps
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Mirrors `changes` into the database named by `options`
    ///
    /// `open_store` is called with the database id, at most once, and only
    /// when the change list carries at least one file.
    pub fn send<S, F>(
        &self,
        options: &SendOptions,
        changes: ChangeList,
        open_store: F,
    ) -> Result<SendSummary>
    where
        S: StateStore,
        F: FnOnce(&str) -> Result<S>,
    {
        if !changes.has_entries() {
            debug!("Change list carries no files, nothing to send");
            return Ok(SendSummary::default());
        }

        let store = open_store(&options.database_id).with_context(|| {
            format!("Failed to open state store for database {}", options.database_id)
        })?;

        info!(database_id = %options.database_id, limit = options.limit, "Sending changes");

        let mut summary = SendSummary::default();
        let planner =
            ActionPlanner::new(options, self.source, self.extractor).with_clock(self.clock);
        for planned in planner.plan(&store, changes.into_entries()) {
            let planned = planned?;
            self.dispatch(&store, &planned, &mut summary)?;
        }

        let evicted = reconcile::archive_over_capacity(self.records, &store, options.limit)?;
        summary.evicted = evicted.len();

        store.flush().context("Failed to flush state store")?;

        info!(
            created = summary.created,
            updated = summary.updated,
            archived = summary.archived,
            evicted = summary.evicted,
            "Send completed"
        );
        Ok(summary)
    }

    fn dispatch<S>(
        &self,
        store: &S,
        planned: &PlannedAction,
        summary: &mut SendSummary,
    ) -> Result<()>
    where
        S: StateStore,
    {
        let guid = &planned.item.guid;
        match &planned.command {
            ActionCommand::Create(params) => {
                let record = self
                    .records
                    .create_record(params)
                    .with_context(|| format!("Failed to create record for {guid}"))?;
                store.mark_created(guid, Some(record.id.clone()));
                info!(guid = %guid, record_id = %record.id, "Created record");
                summary.created += 1;
            }
            ActionCommand::Update(params) => {
                self.records
                    .update_record(params)
                    .with_context(|| format!("Failed to update record for {guid}"))?;
                store.mark_updated(guid);
                info!(guid = %guid, record_id = %params.record_id, "Updated record");
                summary.updated += 1;
            }
            ActionCommand::Delete(params) => {
                self.records
                    .update_record(params)
                    .with_context(|| format!("Failed to archive record for {guid}"))?;
                store.mark_deleted(guid);
                info!(guid = %guid, record_id = %params.record_id, "Archived record of trashed file");
                summary.archived += 1;
            }
        }
        Ok(())
    }
}
