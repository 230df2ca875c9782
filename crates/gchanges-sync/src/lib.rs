//! gchanges2notion Sync - Change-feed to record pipeline
//!
//! Provides:
//! - Normalization of change-feed entries into file items
//! - Composable lazy transforms over files and planned commands
//! - Create/update/archive planning against a state store
//! - Capacity reconciliation and the `send` orchestrator
//!
//! ## Modules
//!
//! - [`normalizer`] - Change entries to file items (ignore list, limit, excerpts)
//! - [`transform`] - File and command stream transforms (MIME filter, thumbnail cover)
//! - [`planner`] - Classifies each file into an action command
//! - [`reconcile`] - Archives records beyond the capacity limit
//! - [`store`] - In-memory state store
//! - [`orchestrator`] - One `send` pass over a change list

pub mod normalizer;
pub mod options;
pub mod orchestrator;
pub mod planner;
pub mod reconcile;
pub mod store;
pub mod transform;

#[cfg(test)]
pub(crate) mod testing;

pub use normalizer::{ChangeNormalizer, Clock};
pub use options::SendOptions;
pub use orchestrator::{SendSummary, SyncRunner};
pub use planner::ActionPlanner;
pub use store::MemoryStateStore;
pub use transform::{
    CommandStream, CommandTransform, FileStream, FileTransform, IgnoreMimeTypes, PlannedAction,
    SourcedFile, ThumbnailCover,
};
