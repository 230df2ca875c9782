//! Shared helpers for Notion API integration tests
//!
//! The client is blocking, so every call runs on tokio's blocking pool while
//! the mock server keeps serving on the test runtime.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gchanges_notion::NotionClient;

pub const TEST_TOKEN: &str = "secret_test_token";
pub const DATABASE_ID: &str = "db-test-001";

/// Runs `f` with a client pointed at `server`, off the async runtime
pub async fn with_client<T, F>(server: &MockServer, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce(NotionClient) -> T + Send + 'static,
{
    let uri = server.uri();
    tokio::task::spawn_blocking(move || f(NotionClient::with_base_url(TEST_TOKEN, uri)))
        .await
        .expect("blocking task panicked")
}

/// A page object as returned by the API
pub fn page(id: &str, guid: Option<&str>, archived: bool) -> Value {
    let mut properties = json!({
        "title": { "type": "title", "title": [{ "plain_text": format!("title-{id}") }] }
    });
    if let Some(guid) = guid {
        properties["guid"] = json!({
            "type": "rich_text",
            "rich_text": [{ "type": "text", "plain_text": guid }]
        });
    }
    json!({
        "object": "page",
        "id": id,
        "archived": archived,
        "url": format!("https://www.notion.so/{id}"),
        "properties": properties
    })
}

/// Mounts `POST /pages` answering with the given page
pub async fn mount_create(server: &MockServer, response: Value) {
    Mock::given(method("POST"))
        .and(path("/pages"))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .and(header("Notion-Version", "2022-06-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

/// Mounts an error response for any request to `path_str`
pub async fn mount_error(server: &MockServer, verb: &str, path_str: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(path_str))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}
