//! Domain entities and business logic
//!
//! This module contains the core domain types for gchanges2notion:
//! - Newtypes for validated identifiers (`Guid`, `RecordId`)
//! - Raw change-feed entries as delivered by the storage provider
//! - Normalized file items and their excerpt/mime helpers
//! - Record parameters and the create/update/delete action commands
//! - The ordered set of tracked records used for capacity eviction
//! - Domain-specific error types

pub mod change;
pub mod command;
pub mod errors;
pub mod excerpt;
pub mod file_item;
pub mod mime;
pub mod newtypes;
pub mod tracked;

// Re-export commonly used types
pub use change::{Change, ChangeEntry, ChangeLabels, ChangeList, ParentReference};
pub use command::{
    ActionCommand, CreateRecordParams, ExternalCover, RecordProperties, UpdateRecordParams,
};
pub use errors::DomainError;
pub use excerpt::{truncate_excerpt, MAX_EXCERPT_BYTES, MAX_EXCERPT_LINES};
pub use file_item::{format_timestamp, parse_modified, FileHandle, FileItem};
pub use mime::{classify_mime_type, is_text_type, FOLDER_MIME_TYPE, GOOGLE_APPS_PREFIX};
pub use newtypes::{Guid, RecordId};
pub use tracked::{EvictionPolicy, TrackedRecord, TrackedRecords};
