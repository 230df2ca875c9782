//! Action planning
//!
//! The [`ActionPlanner`] chains the whole lazy pipeline: normalization, the
//! file-level transforms, classification against the state store and the
//! command-level transforms.
//!
//! | tracked | trashed | command |
//! |---------|---------|---------|
//! | no      | no      | `Create` with every property |
//! | no      | yes     | nothing |
//! | yes     | no      | `Update` with every property but the guid |
//! | yes     | yes     | `Delete` (archive) |

use chrono::{DateTime, Utc};
use tracing::debug;

use gchanges_core::domain::{
    ActionCommand, ChangeEntry, CreateRecordParams, FileItem, RecordProperties,
    UpdateRecordParams,
};
use gchanges_core::ports::{ContentExtractor, FileSource, StateStore};

use crate::normalizer::{ChangeNormalizer, Clock};
use crate::options::SendOptions;
use crate::transform::{CommandStream, FileStream, PlannedAction, SourcedFile};

/// Builds the command stream for one run
pub struct ActionPlanner<'a> {
    options: &'a SendOptions,
    source: &'a dyn FileSource,
    extractor: &'a dyn ContentExtractor,
    clock: Clock,
}

impl<'a> ActionPlanner<'a> {
    pub fn new(
        options: &'a SendOptions,
        source: &'a dyn FileSource,
        extractor: &'a dyn ContentExtractor,
    ) -> Self {
        Self {
            options,
            source,
            extractor,
            clock: Utc::now,
        }
    }

    /// Replaces the clock used for `entryUpdated` and missing dates
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Normalized and filtered files, before classification
    pub fn files<I>(&self, entries: I) -> FileStream<'a>
    where
        I: IntoIterator<Item = ChangeEntry>,
        I::IntoIter: 'a,
    {
        let options = self.options;
        let normalized: FileStream<'a> = Box::new(
            ChangeNormalizer::new(options, self.source, self.extractor, entries)
                .with_clock(self.clock),
        );
        options
            .file_transforms
            .iter()
            .fold(normalized, |stream, transform| transform.apply(stream))
    }

    /// Lazily plans one command per file that needs one
    ///
    /// The store is consulted as each file is pulled, so changes made to it
    /// between items are observed by later ones.
    pub fn plan<S, I>(&self, store: &'a S, entries: I) -> CommandStream<'a>
    where
        S: StateStore + ?Sized,
        I: IntoIterator<Item = ChangeEntry>,
        I::IntoIter: 'a,
    {
        let options = self.options;
        let clock = self.clock;
        let commands: CommandStream<'a> =
            Box::new(self.files(entries).filter_map(move |res| match res {
                Ok(file) => classify(options, store, clock(), file).map(Ok),
                Err(err) => Some(Err(err)),
            }));
        options
            .command_transforms
            .iter()
            .fold(commands, |stream, transform| transform.apply(stream))
    }
}

/// Decides the command for one file
fn classify<S>(
    options: &SendOptions,
    store: &S,
    now: DateTime<Utc>,
    file: SourcedFile,
) -> Option<PlannedAction>
where
    S: StateStore + ?Sized,
{
    let SourcedFile { item, entry } = file;
    let command = match (store.record_id(&item.guid), entry.is_trashed()) {
        (None, true) => {
            debug!(guid = %item.guid, "Skipping trashed file without a record");
            return None;
        }
        (None, false) => ActionCommand::Create(CreateRecordParams {
            database_id: options.database_id.clone(),
            properties: properties(&item, &entry, now, true),
            cover: None,
        }),
        (Some(record_id), false) => ActionCommand::Update(UpdateRecordParams {
            record_id,
            properties: Some(properties(&item, &entry, now, false)),
            archived: false,
            cover: None,
        }),
        (Some(record_id), true) => ActionCommand::Delete(UpdateRecordParams::archive(record_id)),
    };
    debug!(guid = %item.guid, command = command.name(), "Planned command");
    Some(PlannedAction {
        command,
        item,
        entry,
    })
}

fn properties(
    item: &FileItem,
    entry: &ChangeEntry,
    now: DateTime<Utc>,
    with_guid: bool,
) -> RecordProperties {
    RecordProperties {
        title: entry.title_or_default().to_string(),
        entry_updated: now,
        guid: with_guid.then(|| item.guid.clone()),
        mime_type: item.mime_type.clone(),
        kind: item.kind.clone(),
        excerpt: item.excerpt.clone(),
        description: item.description.clone(),
        link: item.link.clone(),
        modified: item.modified,
    }
}
