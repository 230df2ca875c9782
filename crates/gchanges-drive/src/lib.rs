//! gchanges2notion Drive - Google Drive v2 adapter
//!
//! Provides a blocking client for:
//! - Fetching pages of the change feed (`changes.list`)
//! - Resolving file handles (`files.get`)
//! - Reading plain-text content of files (download or export)
//!
//! ## Modules
//!
//! - [`client`] - Drive API HTTP client
//! - [`content`] - [`FileSource`](gchanges_core::ports::FileSource) and
//!   [`ContentExtractor`](gchanges_core::ports::ContentExtractor) implementations

pub mod client;
pub mod content;

pub use client::DriveClient;

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when communicating with the Drive API
#[derive(Debug, Error)]
pub enum DriveError {
    /// The access token is invalid or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Insufficient scopes, or the export is not allowed for this file
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The file does not exist or is not visible to the token
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// A server-side error occurred (5xx)
    #[error("Server error: {0}")]
    Server(String),

    /// Any other error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
