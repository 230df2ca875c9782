//! Shared helpers for Drive API integration tests

use wiremock::MockServer;

use gchanges_drive::DriveClient;

pub const TEST_TOKEN: &str = "ya29.test-token";

/// Runs `f` with a client pointed at `server` on tokio's blocking pool
pub async fn with_client<T, F>(server: &MockServer, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce(DriveClient) -> T + Send + 'static,
{
    let uri = server.uri();
    tokio::task::spawn_blocking(move || f(DriveClient::with_base_url(TEST_TOKEN, uri)))
        .await
        .expect("blocking task panicked")
}

/// Bearer header value sent by the client
pub fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}
