//! Content extractor port (driven/secondary port)

use crate::domain::FileHandle;

/// Produces a plain-text rendering of a file
///
/// Callers treat every error as "no content"; implementations may fail freely.
pub trait ContentExtractor {
    /// Extracts the text of `handle`
    ///
    /// # Arguments
    /// * `mime_type` - MIME type reported by the change feed ("" when absent)
    /// * `kind` - Coarse category derived from `mime_type`
    /// * `handle` - Handle returned by the file source
    /// * `id` - Provider file id
    fn extract(
        &self,
        mime_type: &str,
        kind: &str,
        handle: &FileHandle,
        id: &str,
    ) -> anyhow::Result<String>;
}
