//! File handles and plain-text content from Drive

use anyhow::Context;
use tracing::debug;

use gchanges_core::domain::{is_text_type, FileHandle, MAX_EXCERPT_LINES};
use gchanges_core::ports::{ContentExtractor, FileSource};

use crate::client::DriveClient;

/// Link used when the metadata carries no `alternateLink`
pub fn fallback_link(id: &str) -> String {
    format!("https://drive.google.com/file/d/{id}/view")
}

/// Export format used to read a Workspace file as text, by file kind
pub fn export_mime_type(kind: &str) -> Option<&'static str> {
    match kind {
        "document" | "presentation" => Some("text/plain"),
        "spreadsheet" => Some("text/csv"),
        _ => None,
    }
}

/// Rewrites a CSV export as tab-separated lines
///
/// Keeps at most [`MAX_EXCERPT_LINES`] rows and as many columns per row.
/// Quoted fields may contain commas, doubled quotes and line breaks.
pub fn csv_to_tab_lines(csv: &str) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = csv.chars().peekable();

    while let Some(c) = chars.next() {
        if rows.len() == MAX_EXCERPT_LINES {
            break;
        }
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if rows.len() < MAX_EXCERPT_LINES && (!field.is_empty() || !row.is_empty()) {
        row.push(field);
        rows.push(row);
    }

    rows.into_iter()
        .map(|mut cells| {
            cells.truncate(MAX_EXCERPT_LINES);
            cells.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl FileSource for DriveClient {
    fn open(&self, id: &str) -> anyhow::Result<FileHandle> {
        let file = self
            .get_file(id)
            .with_context(|| format!("Drive lookup of file {id} failed"))?;
        let url = match file.alternate_link {
            Some(link) => link,
            None => {
                debug!(file_id = %file.id, "No alternateLink, using the generic file link");
                fallback_link(&file.id)
            }
        };
        Ok(FileHandle { id: file.id, url })
    }
}

impl ContentExtractor for DriveClient {
    fn extract(
        &self,
        mime_type: &str,
        kind: &str,
        _handle: &FileHandle,
        id: &str,
    ) -> anyhow::Result<String> {
        if is_text_type(mime_type) {
            return self
                .download_text(id)
                .with_context(|| format!("Download of {id} failed"));
        }
        let Some(format) = export_mime_type(kind) else {
            return Ok(String::new());
        };
        let text = self
            .export_text(id, format)
            .with_context(|| format!("Export of {id} as {format} failed"))?;
        if format == "text/csv" {
            Ok(csv_to_tab_lines(&text))
        } else {
            Ok(text)
        }
    }
}
