//! Record parameters and action commands
//!
//! The planner decides, per file item, one [`ActionCommand`]. Each variant
//! carries exactly the parameters the record service needs, in a
//! provider-neutral shape; the Notion adapter encodes them into property
//! values.

use chrono::{DateTime, Utc};

use super::newtypes::{Guid, RecordId};

/// Column values of a record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordProperties {
    /// Record title (the file title)
    pub title: String,
    /// When this record was last written by the pipeline
    pub entry_updated: DateTime<Utc>,
    /// Source file guid; only sent on creation since it is the record's identity
    pub guid: Option<Guid>,
    pub mime_type: String,
    /// Coarse category (`document`, `pdf`, ...)
    pub kind: String,
    pub excerpt: String,
    pub description: String,
    pub link: String,
    pub modified: DateTime<Utc>,
}

/// Image shown as the record's cover, referenced by URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCover {
    pub url: String,
}

/// Parameters for creating a record in a database
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecordParams {
    /// Target database
    pub database_id: String,
    pub properties: RecordProperties,
    pub cover: Option<ExternalCover>,
}

/// Parameters for updating (or archiving) an existing record
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecordParams {
    pub record_id: RecordId,
    /// New column values; `None` leaves the columns untouched
    pub properties: Option<RecordProperties>,
    /// Moves the record to the trash when true
    pub archived: bool,
    pub cover: Option<ExternalCover>,
}

impl UpdateRecordParams {
    /// Parameters that only archive the given record
    pub fn archive(record_id: RecordId) -> Self {
        Self {
            record_id,
            properties: None,
            archived: true,
            cover: None,
        }
    }
}

/// What to do with the record that mirrors a file
#[derive(Debug, Clone, PartialEq)]
pub enum ActionCommand {
    /// No record exists yet: create one
    Create(CreateRecordParams),
    /// A record exists: overwrite its columns
    Update(UpdateRecordParams),
    /// The file was trashed: archive its record
    Delete(UpdateRecordParams),
}

impl ActionCommand {
    /// Short name used in logs and summaries
    pub fn name(&self) -> &'static str {
        match self {
            ActionCommand::Create(_) => "create",
            ActionCommand::Update(_) => "update",
            ActionCommand::Delete(_) => "delete",
        }
    }

    /// Cover currently attached to the command's parameters
    pub fn cover(&self) -> Option<&ExternalCover> {
        match self {
            ActionCommand::Create(p) => p.cover.as_ref(),
            ActionCommand::Update(p) | ActionCommand::Delete(p) => p.cover.as_ref(),
        }
    }

    /// Attaches a cover to the command's parameters, replacing any previous one
    pub fn set_cover(&mut self, cover: ExternalCover) {
        match self {
            ActionCommand::Create(p) => p.cover = Some(cover),
            ActionCommand::Update(p) | ActionCommand::Delete(p) => p.cover = Some(cover),
        }
    }
}
