//! gchanges2notion Core - Domain types, ports and configuration
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `ChangeEntry`, `FileItem`, `ActionCommand`, `TrackedRecords`
//! - **Port definitions** - Traits for adapters: `FileSource`, `ContentExtractor`,
//!   `StateStore`, `RecordService`
//! - **Configuration** - YAML configuration with defaults and validation
//!
//! # Architecture
//!
//! The domain module holds pure logic (mime classification, excerpt
//! truncation, tracked-record ordering) with no I/O. Ports define the trait
//! interfaces that the Drive and Notion adapter crates implement. The
//! pipeline that ties them together lives in `gchanges-sync`.

pub mod config;
pub mod domain;
pub mod ports;
