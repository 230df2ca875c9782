//! Change normalization
//!
//! Turns raw change entries into [`FileItem`]s: ignored and id-less entries
//! are skipped, at most `limit` files are emitted, each surviving entry is
//! opened through the [`FileSource`] and its text pulled through the
//! [`ContentExtractor`].

use std::collections::HashSet;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use gchanges_core::domain::{
    classify_mime_type, parse_modified, truncate_excerpt, ChangeEntry, FileItem, Guid,
};
use gchanges_core::ports::{ContentExtractor, FileSource};

use crate::options::SendOptions;
use crate::transform::SourcedFile;

/// Source of the current time
pub type Clock = fn() -> DateTime<Utc>;

/// Lazy iterator of normalized files
///
/// Yields `Err` when the file source fails; callers are expected to stop there.
pub struct ChangeNormalizer<'a, I> {
    entries: I,
    ignore_ids: &'a HashSet<String>,
    remaining: usize,
    source: &'a dyn FileSource,
    extractor: &'a dyn ContentExtractor,
    clock: Clock,
}

impl<'a, I> ChangeNormalizer<'a, I>
where
    I: Iterator<Item = ChangeEntry>,
{
    pub fn new(
        options: &'a SendOptions,
        source: &'a dyn FileSource,
        extractor: &'a dyn ContentExtractor,
        entries: impl IntoIterator<IntoIter = I>,
    ) -> Self {
        Self {
            entries: entries.into_iter(),
            ignore_ids: &options.ignore_ids,
            remaining: options.limit,
            source,
            extractor,
            clock: Utc::now,
        }
    }

    /// Replaces the clock used when a modification date is missing
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn normalize(&self, guid: Guid, entry: ChangeEntry) -> anyhow::Result<SourcedFile> {
        let mime_type = entry.mime_type.clone().unwrap_or_default();
        let kind = classify_mime_type(&mime_type);

        let handle = self
            .source
            .open(guid.as_str())
            .with_context(|| format!("Failed to open file {guid}"))?;

        let excerpt = match self
            .extractor
            .extract(&mime_type, &kind, &handle, guid.as_str())
        {
            Ok(content) => truncate_excerpt(&content),
            Err(err) => {
                debug!(guid = %guid, mime_type = %mime_type, error = %err, "Content extraction failed");
                String::new()
            }
        };

        let modified = match entry.modified_date.as_deref() {
            Some(value) => parse_modified(value).unwrap_or_else(|err| {
                warn!(guid = %guid, error = %err, "Unparseable modification date, using current time");
                (self.clock)()
            }),
            None => (self.clock)(),
        };

        let item = FileItem {
            link: handle.url.clone(),
            handle,
            guid,
            mime_type,
            kind,
            excerpt,
            description: entry.description.clone().unwrap_or_default(),
            modified,
            thumbnail_link: entry.thumbnail_link.clone(),
        };
        debug!(guid = %item.guid, kind = %item.kind, parents = ?entry.parent_ids(), "Normalized file");
        Ok(SourcedFile { item, entry })
    }
}

impl<I> Iterator for ChangeNormalizer<'_, I>
where
    I: Iterator<Item = ChangeEntry>,
{
    type Item = anyhow::Result<SourcedFile>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let entry = self.entries.next()?;
            let Some(id) = entry.id.clone() else {
                warn!(title = entry.title_or_default(), "Skipping change entry without an id");
                continue;
            };
            if self.ignore_ids.contains(&id) {
                debug!(id = %id, "Skipping ignored file");
                continue;
            }
            let guid = match Guid::new(id) {
                Ok(guid) => guid,
                Err(err) => {
                    warn!(error = %err, "Skipping change entry with an invalid id");
                    continue;
                }
            };
            self.remaining -= 1;
            return Some(self.normalize(guid, entry));
        }
        None
    }
}
