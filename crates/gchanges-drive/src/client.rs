//! Google Drive v2 API client
//!
//! Blocking HTTP client for the handful of Drive endpoints the pipeline
//! needs: the change feed, file metadata, media download and export.
//!
//! ```rust,no_run
//! use gchanges_drive::DriveClient;
//!
//! # fn example() -> anyhow::Result<()> {
//! let client = DriveClient::new("ya29.token");
//! let changes = client.list_changes(None, 100)?;
//! println!("next start token: {:?}", changes.new_start_page_token);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use gchanges_core::domain::ChangeList;

use crate::DriveError;

/// Base URL for the Drive v2 API
pub const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v2";

/// Fields requested when resolving a file handle
const FILE_FIELDS: &str = "id,alternateLink";

/// File metadata, reduced to what a handle needs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    /// Link for opening the file in the Drive UI
    pub alternate_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for Drive API calls
///
/// Holds an already issued OAuth access token; refreshing it is up to the
/// caller.
pub struct DriveClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl DriveClient {
    /// Creates a new DriveClient with the given access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, DRIVE_BASE_URL)
    }

    /// Creates a new DriveClient with a custom base URL (useful for testing)
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.access_token)
    }

    /// Fetches one page of the change feed (`GET /changes`)
    ///
    /// Without a page token the listing starts at the beginning of the feed.
    pub fn list_changes(
        &self,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<ChangeList, DriveError> {
        debug!(page_token = ?page_token, max_results, "Listing changes");
        let mut request = self
            .request(Method::GET, "/changes")
            .query(&[("maxResults", max_results.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }
        let response = check_status(request.send()?)?;
        parse_json(response)
    }

    /// Reads a file's metadata (`GET /files/{id}`)
    pub fn get_file(&self, id: &str) -> Result<DriveFile, DriveError> {
        let response = self
            .request(Method::GET, &format!("/files/{id}"))
            .query(&[("fields", FILE_FIELDS)])
            .send()?;
        parse_json(check_status(response)?)
    }

    /// Downloads a file's content as text (`GET /files/{id}?alt=media`)
    pub fn download_text(&self, id: &str) -> Result<String, DriveError> {
        let response = self
            .request(Method::GET, &format!("/files/{id}"))
            .query(&[("alt", "media")])
            .send()?;
        Ok(check_status(response)?.text()?)
    }

    /// Exports a Google Workspace file (`GET /files/{id}/export`)
    pub fn export_text(&self, id: &str, mime_type: &str) -> Result<String, DriveError> {
        let response = self
            .request(Method::GET, &format!("/files/{id}/export"))
            .query(&[("mimeType", mime_type)])
            .send()?;
        Ok(check_status(response)?.text()?)
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, DriveError> {
    let text = response.text()?;
    serde_json::from_str(&text).map_err(|e| DriveError::InvalidResponse(e.to_string()))
}

/// Maps a non-success response to a [`DriveError`]
fn check_status(response: Response) -> Result<Response, DriveError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs);
    let message = response
        .text()
        .ok()
        .and_then(|text| serde_json::from_str::<ErrorEnvelope>(&text).ok())
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_default();
    warn!(status = status.as_u16(), message = %message, "Drive API error");

    Err(match status {
        StatusCode::UNAUTHORIZED => DriveError::Unauthorized(message),
        StatusCode::FORBIDDEN => DriveError::Forbidden(message),
        StatusCode::NOT_FOUND => DriveError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => DriveError::RateLimited { retry_after },
        s if s.is_server_error() => DriveError::Server(format!("{status}: {message}")),
        _ => DriveError::Api {
            status: status.as_u16(),
            message,
        },
    })
}
