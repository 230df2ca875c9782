//! Lazy stream transforms
//!
//! Two families of transforms sit around the planner: [`FileTransform`]s see
//! normalized files before classification, [`CommandTransform`]s see planned
//! actions afterwards. Both map a boxed iterator to a boxed iterator, are
//! applied left to right, and must pass `Err` items through unchanged so the
//! orchestrator can stop at the first fatal error.
//!
//! Any `fn(FileStream<'_>) -> FileStream<'_>` (or the command equivalent) is a
//! transform, so ad-hoc filters do not need a dedicated type.

use std::collections::HashSet;

use gchanges_core::domain::{ActionCommand, ChangeEntry, ExternalCover, FileItem, FOLDER_MIME_TYPE};

/// A normalized file together with the change entry it came from
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedFile {
    pub item: FileItem,
    pub entry: ChangeEntry,
}

/// A planned command with the file and entry that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAction {
    pub command: ActionCommand,
    pub item: FileItem,
    pub entry: ChangeEntry,
}

/// Lazy stream of normalized files
pub type FileStream<'a> = Box<dyn Iterator<Item = anyhow::Result<SourcedFile>> + 'a>;

/// Lazy stream of planned actions
pub type CommandStream<'a> = Box<dyn Iterator<Item = anyhow::Result<PlannedAction>> + 'a>;

/// Transform applied to the file stream before planning
pub trait FileTransform {
    fn apply<'a>(&'a self, stream: FileStream<'a>) -> FileStream<'a>;
}

/// Transform applied to the command stream after planning
pub trait CommandTransform {
    fn apply<'a>(&'a self, stream: CommandStream<'a>) -> CommandStream<'a>;
}

impl<F> FileTransform for F
where
    F: for<'a> Fn(FileStream<'a>) -> FileStream<'a>,
{
    fn apply<'a>(&'a self, stream: FileStream<'a>) -> FileStream<'a> {
        self(stream)
    }
}

impl<F> CommandTransform for F
where
    F: for<'a> Fn(CommandStream<'a>) -> CommandStream<'a>,
{
    fn apply<'a>(&'a self, stream: CommandStream<'a>) -> CommandStream<'a> {
        self(stream)
    }
}

// ============================================================================
// File-level: MIME type filter
// ============================================================================

/// Drops files whose MIME type is in the ignore set
#[derive(Debug, Clone, Default)]
pub struct IgnoreMimeTypes {
    types: HashSet<String>,
}

impl IgnoreMimeTypes {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if files of `mime_type` are dropped
    pub fn ignores(&self, mime_type: &str) -> bool {
        self.types.contains(mime_type)
    }
}

impl FileTransform for IgnoreMimeTypes {
    fn apply<'a>(&'a self, stream: FileStream<'a>) -> FileStream<'a> {
        Box::new(stream.filter(move |res| match res {
            Ok(file) => {
                let keep = !self.ignores(&file.item.mime_type);
                if !keep {
                    tracing::debug!(guid = %file.item.guid, mime_type = %file.item.mime_type, "Ignoring file by MIME type");
                }
                keep
            }
            Err(_) => true,
        }))
    }
}

// ============================================================================
// Command-level: thumbnail cover
// ============================================================================

/// Host whose thumbnails are safe to reference from a record
pub const THUMBNAIL_HOST: &str = "googleusercontent.com";

/// Returns `link` if it is safe to use as a record cover
///
/// The link must be an absolute URL without a query string (an empty `?` is
/// tolerated), served from `googleusercontent.com` or one of its subdomains.
/// Thumbnails carrying query parameters are short-lived signed URLs and would
/// break once they expire.
pub fn safe_thumbnail_url(link: &str) -> Option<&str> {
    let url = url::Url::parse(link).ok()?;
    if url.query().is_some_and(|q| !q.is_empty()) {
        return None;
    }
    let host = url.host_str()?;
    let trusted = host == THUMBNAIL_HOST
        || host
            .strip_suffix(THUMBNAIL_HOST)
            .is_some_and(|prefix| prefix.ends_with('.'));
    trusted.then_some(link)
}

/// Attaches the file's thumbnail as an external cover when it is safe
#[derive(Debug, Clone, Copy, Default)]
pub struct ThumbnailCover;

impl CommandTransform for ThumbnailCover {
    fn apply<'a>(&'a self, stream: CommandStream<'a>) -> CommandStream<'a> {
        Box::new(stream.map(|res| {
            res.map(|mut action| {
                let cover = action
                    .item
                    .thumbnail_link
                    .as_deref()
                    .and_then(safe_thumbnail_url)
                    .map(|url| ExternalCover {
                        url: url.to_string(),
                    });
                if let Some(cover) = cover {
                    action.command.set_cover(cover);
                }
                action
            })
        }))
    }
}

/// File transforms used when none are configured: drop folders
pub fn default_file_transforms() -> Vec<Box<dyn FileTransform>> {
    vec![Box::new(IgnoreMimeTypes::new([FOLDER_MIME_TYPE]))]
}

/// Command transforms used when none are configured: thumbnail covers
pub fn default_command_transforms() -> Vec<Box<dyn CommandTransform>> {
    vec![Box::new(ThumbnailCover)]
}
