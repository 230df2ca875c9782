//! Record service port (driven/secondary port)
//!
//! This module defines the interface for writing records into the external
//! database service. The primary implementation targets Notion pages in a
//! database.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result`; adapters classify HTTP failures in their own error
//!   enum and convert at this boundary.
//! - No retry: a failed call aborts the run.

use crate::domain::{CreateRecordParams, RecordId, UpdateRecordParams};

/// A record as returned by the service after a write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    /// Whether the record is archived (in the service's trash)
    pub archived: bool,
    /// Public URL of the record, when the service reports one
    pub url: Option<String>,
}

/// Write access to database records
pub trait RecordService {
    /// Creates a record in the database named by the params
    fn create_record(&self, params: &CreateRecordParams) -> anyhow::Result<Record>;

    /// Updates an existing record; `archived = true` archives it
    fn update_record(&self, params: &UpdateRecordParams) -> anyhow::Result<Record>;
}
