//! Normalized file items
//!
//! A [`FileItem`] is the pipeline-internal view of one changed file: the raw
//! change entry reduced to the values written into a record, plus the handle
//! the storage adapter returned for it.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use super::errors::DomainError;
use super::newtypes::Guid;

/// Opaque reference to a file in the storage provider
///
/// Produced by a `FileSource` and handed back to the `ContentExtractor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// Provider file id
    pub id: String,
    /// Canonical URL for opening the file in the provider's UI
    pub url: String,
}

/// A changed file, normalized for record building
#[derive(Debug, Clone, PartialEq)]
pub struct FileItem {
    /// Handle to the underlying file
    pub handle: FileHandle,
    /// Stable identity (equal to the provider file id)
    pub guid: Guid,
    /// MIME type as reported by the provider ("" when absent)
    pub mime_type: String,
    /// Coarse category derived from the MIME type
    pub kind: String,
    /// Truncated plain-text excerpt ("" when extraction failed)
    pub excerpt: String,
    /// Description ("" when absent)
    pub description: String,
    /// Canonical URL of the file
    pub link: String,
    /// Last modification time
    pub modified: DateTime<Utc>,
    /// Untrusted thumbnail URL from the change entry
    pub thumbnail_link: Option<String>,
}

/// Renders a timestamp as ISO-8601 with millisecond precision (`...T00:00:00.000Z`)
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a change entry's `modifiedDate`
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_modified(value: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| DomainError::InvalidTimestamp(value.to_string()))
}
