//! gchanges2notion Notion - Notion API client
//!
//! Provides a blocking client for:
//! - Creating and updating pages in a database (the records mirroring files)
//! - Querying a database to load the tracked records of a run
//! - Encoding record parameters as Notion property values
//!
//! ## Modules
//!
//! - [`client`] - Notion API HTTP client
//! - [`properties`] - Record parameters to Notion request bodies
//! - [`records`] - [`RecordService`](gchanges_core::ports::RecordService) implementation
//! - [`state`] - Loading tracked records from a database

pub mod client;
pub mod properties;
pub mod records;
pub mod state;

pub use client::NotionClient;
pub use state::load_tracked_records;

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when communicating with the Notion API
#[derive(Debug, Error)]
pub enum NotionError {
    /// The integration token is missing, invalid or revoked
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The integration has no access to the requested resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The page or database does not exist (or is not shared with the integration)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The write conflicted with another one
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Rate limit exceeded
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Delay requested by the server, when it sent one
        retry_after: Option<Duration>,
    },

    /// A server-side error occurred (5xx)
    #[error("Server error: {0}")]
    Server(String),

    /// Any other error reported by the API
    #[error("API error {code}: {message}")]
    Api {
        /// Notion error code (e.g. `validation_error`)
        code: String,
        message: String,
    },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
