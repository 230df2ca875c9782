//! Notion API client
//!
//! Provides a typed blocking HTTP client for the Notion API. Handles the
//! authentication and version headers, JSON (de)serialization, endpoint
//! construction and mapping of error statuses to [`NotionError`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gchanges_notion::client::NotionClient;
//!
//! # fn example() -> anyhow::Result<()> {
//! let client = NotionClient::new("secret_token");
//! let page = client.query_database("database-id", None)?;
//! println!("{} pages", page.results.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use gchanges_core::domain::{CreateRecordParams, UpdateRecordParams};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::properties::{create_body, query_body, update_body};
use crate::NotionError;

/// Base URL for the Notion API
pub const NOTION_BASE_URL: &str = "https://api.notion.com/v1";

/// API version sent with every request
pub const NOTION_VERSION: &str = "2022-06-28";

/// Page size used when querying a database (the API maximum)
pub const QUERY_PAGE_SIZE: u32 = 100;

// ============================================================================
// Notion API response types
// ============================================================================

/// A page object, reduced to what the pipeline reads
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub archived: bool,
    pub url: Option<String>,
    /// Raw property values, keyed by property name
    #[serde(default)]
    pub properties: serde_json::Value,
}

/// One page of a database query
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// Error object returned with non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

// ============================================================================
// NotionClient
// ============================================================================

/// HTTP client for Notion API calls
///
/// Wraps `reqwest::blocking::Client` with authentication headers and base URL
/// construction. Failed calls are not retried.
pub struct NotionClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// Integration token
    api_key: String,
}

impl NotionClient {
    /// Creates a new NotionClient with the given integration token
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, NOTION_BASE_URL)
    }

    /// Creates a new NotionClient with a custom base URL (useful for testing)
    ///
    /// # Arguments
    /// * `api_key` - Integration token
    /// * `base_url` - Custom base URL for API requests
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// Automatically prepends the base URL and adds the Authorization and
    /// Notion-Version headers.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
    }

    /// Creates a page in a database (`POST /pages`)
    pub fn create_page(&self, params: &CreateRecordParams) -> Result<Page, NotionError> {
        debug!(database_id = %params.database_id, "Creating page");
        self.send_json(self.request(Method::POST, "/pages").json(&create_body(params)))
    }

    /// Updates or archives a page (`PATCH /pages/{id}`)
    pub fn update_page(&self, params: &UpdateRecordParams) -> Result<Page, NotionError> {
        debug!(page_id = %params.record_id, archived = params.archived, "Updating page");
        let path = format!("/pages/{}", params.record_id);
        self.send_json(self.request(Method::PATCH, &path).json(&update_body(params)))
    }

    /// Queries one page of a database, most recently written entries first
    /// (`POST /databases/{id}/query`)
    pub fn query_database(
        &self,
        database_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<QueryResponse, NotionError> {
        debug!(database_id, cursor = ?start_cursor, "Querying database");
        let path = format!("/databases/{database_id}/query");
        let body = query_body(start_cursor, QUERY_PAGE_SIZE);
        self.send_json(self.request(Method::POST, &path).json(&body))
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, NotionError> {
        let response = request.send()?;
        let response = check_status(response)?;
        let text = response.text()?;
        serde_json::from_str(&text).map_err(|e| NotionError::InvalidResponse(e.to_string()))
    }
}

/// Maps a non-success response to a [`NotionError`]
fn check_status(response: Response) -> Result<Response, NotionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(parse_retry_after);
    let body: Option<ErrorBody> = response
        .text()
        .ok()
        .and_then(|text| serde_json::from_str(&text).ok());
    let (code, message) = match body {
        Some(ErrorBody { code, message }) => (
            code.unwrap_or_else(|| status.as_str().to_string()),
            message.unwrap_or_default(),
        ),
        None => (status.as_str().to_string(), String::new()),
    };
    warn!(status = status.as_u16(), code = %code, message = %message, "Notion API error");

    Err(match status {
        StatusCode::UNAUTHORIZED => NotionError::Unauthorized(message),
        StatusCode::FORBIDDEN => NotionError::Forbidden(message),
        StatusCode::NOT_FOUND => NotionError::NotFound(message),
        StatusCode::CONFLICT => NotionError::Conflict(message),
        StatusCode::TOO_MANY_REQUESTS => NotionError::RateLimited { retry_after },
        s if s.is_server_error() => NotionError::Server(format!("{status}: {message}")),
        _ => NotionError::Api { code, message },
    })
}

/// Parses a Retry-After header value into a Duration.
///
/// The header can be either:
/// - An integer number of seconds (e.g., "30")
/// - An HTTP-date (e.g., "Fri, 31 Dec 2025 23:59:59 GMT"), parsed as seconds from now
///
/// Returns `None` if the value cannot be parsed.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    if let Ok(seconds) = value.trim().parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date = chrono::DateTime::parse_from_rfc2822(value.trim()).ok()?;
    let diff = date.with_timezone(&chrono::Utc) - chrono::Utc::now();
    Some(diff.to_std().unwrap_or(Duration::ZERO))
}
