//! Fakes and fixtures shared by the unit tests

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};

use gchanges_core::domain::{
    ActionCommand, ChangeEntry, ChangeLabels, CreateRecordParams, FileHandle, FileItem, Guid,
    RecordId, RecordProperties, UpdateRecordParams,
};
use gchanges_core::ports::{ContentExtractor, FileSource, Record, RecordService};

use crate::transform::{PlannedAction, SourcedFile};

pub(crate) fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 4, 18, 0, 0, 0).unwrap()
}

pub(crate) fn guid(s: &str) -> Guid {
    Guid::from_str(s).unwrap()
}

pub(crate) fn rid(s: &str) -> RecordId {
    RecordId::from_str(s).unwrap()
}

pub(crate) fn link_for(id: &str) -> String {
    format!("https://drive.google.com/file/d/{id}/view")
}

pub(crate) fn entry(id: &str, mime_type: &str) -> ChangeEntry {
    ChangeEntry {
        id: Some(id.to_string()),
        mime_type: Some(mime_type.to_string()),
        modified_date: Some("2022-04-17T10:00:00.000Z".to_string()),
        title: Some(format!("title-{id}")),
        ..ChangeEntry::default()
    }
}

pub(crate) fn trashed(mut entry: ChangeEntry) -> ChangeEntry {
    entry.labels = Some(ChangeLabels {
        trashed: Some(true),
    });
    entry
}

pub(crate) fn item(id: &str, mime_type: &str) -> FileItem {
    FileItem {
        handle: FileHandle {
            id: id.to_string(),
            url: link_for(id),
        },
        guid: guid(id),
        mime_type: mime_type.to_string(),
        kind: gchanges_core::domain::classify_mime_type(mime_type),
        excerpt: String::new(),
        description: String::new(),
        link: link_for(id),
        modified: fixed_clock(),
        thumbnail_link: None,
    }
}

pub(crate) fn sourced(id: &str, mime_type: &str) -> SourcedFile {
    SourcedFile {
        item: item(id, mime_type),
        entry: entry(id, mime_type),
    }
}

pub(crate) fn properties(id: &str) -> RecordProperties {
    RecordProperties {
        title: format!("title-{id}"),
        entry_updated: fixed_clock(),
        guid: Some(guid(id)),
        mime_type: "text/plain".to_string(),
        kind: "text".to_string(),
        excerpt: String::new(),
        description: String::new(),
        link: link_for(id),
        modified: fixed_clock(),
    }
}

/// A `Create` action for `id`, optionally carrying a thumbnail link
pub(crate) fn action(id: &str, thumbnail: Option<&str>) -> PlannedAction {
    let mut item = item(id, "text/plain");
    item.thumbnail_link = thumbnail.map(str::to_string);
    PlannedAction {
        command: ActionCommand::Create(CreateRecordParams {
            database_id: "db".to_string(),
            properties: properties(id),
            cover: None,
        }),
        item,
        entry: entry(id, "text/plain"),
    }
}

/// File source that resolves every id except the failing ones
#[derive(Default)]
pub(crate) struct FakeSource {
    pub failing: HashSet<String>,
    pub opened: RefCell<Vec<String>>,
}

impl FileSource for FakeSource {
    fn open(&self, id: &str) -> anyhow::Result<FileHandle> {
        self.opened.borrow_mut().push(id.to_string());
        if self.failing.contains(id) {
            anyhow::bail!("file {id} not found");
        }
        Ok(FileHandle {
            id: id.to_string(),
            url: link_for(id),
        })
    }
}

/// Extractor returning canned text; unknown ids fail
#[derive(Default)]
pub(crate) struct FakeExtractor {
    pub contents: HashMap<String, String>,
}

impl ContentExtractor for FakeExtractor {
    fn extract(
        &self,
        _mime_type: &str,
        _kind: &str,
        _handle: &FileHandle,
        id: &str,
    ) -> anyhow::Result<String> {
        self.contents
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no content for {id}"))
    }
}

/// A call received by [`RecordingService`]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Create(CreateRecordParams),
    Update(UpdateRecordParams),
}

/// Record service that records calls and hands out sequential ids
#[derive(Default)]
pub(crate) struct RecordingService {
    pub calls: RefCell<Vec<Call>>,
    pub next_id: Cell<usize>,
    /// Fail updates targeting this record id
    pub fail_update: Option<RecordId>,
}

impl RecordService for RecordingService {
    fn create_record(&self, params: &CreateRecordParams) -> anyhow::Result<Record> {
        self.calls.borrow_mut().push(Call::Create(params.clone()));
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        Ok(Record {
            id: rid(&format!("new-{n}")),
            archived: false,
            url: None,
        })
    }

    fn update_record(&self, params: &UpdateRecordParams) -> anyhow::Result<Record> {
        self.calls.borrow_mut().push(Call::Update(params.clone()));
        if self.fail_update.as_ref() == Some(&params.record_id) {
            anyhow::bail!("service unavailable");
        }
        Ok(Record {
            id: params.record_id.clone(),
            archived: params.archived,
            url: None,
        })
    }
}
