//! File source port (driven/secondary port)
//!
//! Resolves a file id from the change feed into a [`FileHandle`].
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are adapter-specific
//!   and don't need domain-level classification.
//! - Synchronous: the pipeline is a single-pass iterator chain.

use crate::domain::FileHandle;

/// Access to files in the storage provider
pub trait FileSource {
    /// Opens the file with the given provider id
    ///
    /// A failure here is fatal for the run.
    fn open(&self, id: &str) -> anyhow::Result<FileHandle>;
}
