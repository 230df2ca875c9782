//! Change-feed types
//!
//! Port-level DTOs for the Google Drive (v2) `changes.list` response. Only the
//! fields the pipeline consumes are modelled; every field is optional because
//! the feed routinely omits them (deleted files carry almost nothing).

use serde::{Deserialize, Serialize};

/// One page of the storage provider's change feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeList {
    /// Changes in feed order (absent when the page is empty)
    pub items: Option<Vec<Change>>,
    /// Token for the next page of this listing
    pub next_page_token: Option<String>,
    /// Token to start the next listing from (present on the last page)
    pub new_start_page_token: Option<String>,
    /// Highest change id seen by the provider
    pub largest_change_id: Option<String>,
}

impl ChangeList {
    /// Builds a change list from file descriptors, one change per file
    pub fn from_entries(entries: impl IntoIterator<Item = ChangeEntry>) -> Self {
        let items = entries
            .into_iter()
            .map(|file| Change {
                file_id: file.id.clone(),
                deleted: None,
                file: Some(file),
            })
            .collect();
        Self {
            items: Some(items),
            ..Self::default()
        }
    }

    /// Returns true if at least one change carries a file descriptor
    pub fn has_entries(&self) -> bool {
        self.items
            .as_ref()
            .is_some_and(|items| items.iter().any(|c| c.file.is_some()))
    }

    /// Consumes the list, yielding the file descriptors in feed order
    ///
    /// Changes without a `file` (e.g. permanently removed files) are dropped.
    pub fn into_entries(self) -> impl Iterator<Item = ChangeEntry> {
        self.items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|change| change.file)
    }
}

/// A single change from the feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// Id of the changed file
    pub file_id: Option<String>,
    /// Whether the file was permanently removed
    pub deleted: Option<bool>,
    /// Current file descriptor (absent for removed files)
    pub file: Option<ChangeEntry>,
}

/// Raw file descriptor attached to a change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEntry {
    /// Provider file id, used as the record guid
    pub id: Option<String>,
    /// MIME type reported by the provider
    pub mime_type: Option<String>,
    /// Last modification time (RFC 3339)
    pub modified_date: Option<String>,
    /// User-supplied description
    pub description: Option<String>,
    /// Short-lived thumbnail URL
    pub thumbnail_link: Option<String>,
    /// File title
    pub title: Option<String>,
    /// Label flags (trashed, starred, ...)
    pub labels: Option<ChangeLabels>,
    /// Parent folders
    #[serde(default)]
    pub parents: Vec<ParentReference>,
}

impl ChangeEntry {
    /// Returns true if the file sits in the provider's trash
    pub fn is_trashed(&self) -> bool {
        self.labels
            .as_ref()
            .and_then(|l| l.trashed)
            .unwrap_or(false)
    }

    /// Title, or the empty string when the provider sent none
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Ids of the parent folders (missing ids become empty strings)
    pub fn parent_ids(&self) -> Vec<String> {
        self.parents
            .iter()
            .map(|p| p.id.clone().unwrap_or_default())
            .collect()
    }
}

/// Label flags of a file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeLabels {
    pub trashed: Option<bool>,
}

/// Reference to a parent folder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentReference {
    pub id: Option<String>,
}
