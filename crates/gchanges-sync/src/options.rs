//! Per-run send options

use std::collections::HashSet;
use std::fmt;

use gchanges_core::config::{Config, DEFAULT_LIMIT};

use crate::transform::{
    default_command_transforms, default_file_transforms, CommandTransform, FileTransform,
    IgnoreMimeTypes, ThumbnailCover,
};

/// Settings for one `send` run
pub struct SendOptions {
    /// Database that receives the records
    pub database_id: String,
    /// File ids that are never mirrored
    pub ignore_ids: HashSet<String>,
    /// Maximum number of files handled, and number of records kept
    pub limit: usize,
    /// Applied to normalized files, left to right
    pub file_transforms: Vec<Box<dyn FileTransform>>,
    /// Applied to planned commands, left to right
    pub command_transforms: Vec<Box<dyn CommandTransform>>,
}

impl SendOptions {
    /// Options with default limit and transforms for `database_id`
    pub fn new(database_id: impl Into<String>) -> Self {
        Self {
            database_id: database_id.into(),
            ignore_ids: HashSet::new(),
            limit: DEFAULT_LIMIT,
            file_transforms: default_file_transforms(),
            command_transforms: default_command_transforms(),
        }
    }

    /// Options derived from the `notion` and `sync` sections of a config
    pub fn from_config(config: &Config) -> Self {
        Self {
            database_id: config.notion.database_id.clone(),
            ignore_ids: config.sync.ignore_ids.iter().cloned().collect(),
            limit: config.sync.limit,
            file_transforms: vec![Box::new(IgnoreMimeTypes::new(
                config.sync.ignore_types.iter().cloned(),
            ))],
            command_transforms: vec![Box::new(ThumbnailCover)],
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_ignore_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the file transforms
    pub fn with_file_transforms(mut self, transforms: Vec<Box<dyn FileTransform>>) -> Self {
        self.file_transforms = transforms;
        self
    }

    /// Replaces the command transforms
    pub fn with_command_transforms(mut self, transforms: Vec<Box<dyn CommandTransform>>) -> Self {
        self.command_transforms = transforms;
        self
    }
}

impl fmt::Debug for SendOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendOptions")
            .field("database_id", &self.database_id)
            .field("ignore_ids", &self.ignore_ids)
            .field("limit", &self.limit)
            .field("file_transforms", &self.file_transforms.len())
            .field("command_transforms", &self.command_transforms.len())
            .finish()
    }
}
