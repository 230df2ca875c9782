//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the pipeline depends
//! on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`FileSource`] - Opens files in the storage provider (Google Drive)
//! - [`ContentExtractor`] - Extracts plain text from a file
//! - [`RecordService`] - Creates and updates database records (Notion)
//! - [`StateStore`] - Tracks which records mirror which files during a run

pub mod content_extractor;
pub mod file_source;
pub mod record_service;
pub mod state_store;

pub use content_extractor::ContentExtractor;
pub use file_source::FileSource;
pub use record_service::{Record, RecordService};
pub use state_store::StateStore;
