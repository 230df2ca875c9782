//! MIME type helpers

/// Prefix shared by Google Workspace native file types
pub const GOOGLE_APPS_PREFIX: &str = "application/vnd.google-apps.";

/// MIME type of a Drive folder
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Derives the coarse file category stored in the record's `type` column
///
/// - Google Workspace types map to their suffix (`document`, `spreadsheet`, ...)
/// - `text/plain` maps to `text`
/// - anything else maps to its subtype (`text/csv` → `csv`), or to the whole
///   string when there is no `/`
pub fn classify_mime_type(mime_type: &str) -> String {
    if let Some(suffix) = mime_type.strip_prefix(GOOGLE_APPS_PREFIX) {
        return suffix.to_string();
    }
    if mime_type == "text/plain" {
        return "text".to_string();
    }
    match mime_type.split('/').nth(1) {
        Some(subtype) => subtype.to_string(),
        None => mime_type.to_string(),
    }
}

/// Returns true for `text/*` types (and a bare `text`)
pub fn is_text_type(mime_type: &str) -> bool {
    mime_type.split('/').next() == Some("text")
}
