//! Change feed against a mocked Drive API

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gchanges_drive::DriveError;

use crate::common::{bearer, with_client};

#[tokio::test]
async fn test_list_changes_with_page_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/changes"))
        .and(query_param("pageToken", "1200"))
        .and(query_param("maxResults", "50"))
        .and(header("Authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "drive#changeList",
            "largestChangeId": "1234",
            "newStartPageToken": "1235",
            "items": [
                {
                    "kind": "drive#change",
                    "fileId": "doc-1",
                    "deleted": false,
                    "file": {
                        "id": "doc-1",
                        "title": "Meeting notes",
                        "mimeType": "application/vnd.google-apps.document",
                        "modifiedDate": "2022-04-17T09:30:00.000Z",
                        "labels": { "trashed": false, "starred": true },
                        "parents": [{ "id": "root", "isRoot": true }]
                    }
                },
                { "kind": "drive#change", "fileId": "gone", "deleted": true }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = with_client(&server, |client| client.list_changes(Some("1200"), 50))
        .await
        .unwrap();

    assert_eq!(list.new_start_page_token.as_deref(), Some("1235"));
    assert!(list.has_entries());
    let entries: Vec<_> = list.into_entries().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id.as_deref(), Some("doc-1"));
    assert_eq!(entries[0].parent_ids(), vec!["root".to_string()]);
    assert!(!entries[0].is_trashed());
}

#[tokio::test]
async fn test_list_changes_empty_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/changes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "drive#changeList",
            "newStartPageToken": "77"
        })))
        .mount(&server)
        .await;

    let list = with_client(&server, |client| client.list_changes(None, 100))
        .await
        .unwrap();

    assert!(!list.has_entries());
    assert_eq!(list.new_start_page_token.as_deref(), Some("77"));
}

#[tokio::test]
async fn test_list_changes_expired_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/changes"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 401, "message": "Invalid Credentials" }
        })))
        .mount(&server)
        .await;

    let err = with_client(&server, |client| client.list_changes(None, 100))
        .await
        .unwrap_err();

    match err {
        DriveError::Unauthorized(message) => assert_eq!(message, "Invalid Credentials"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_changes_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/changes"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = with_client(&server, |client| client.list_changes(None, 100))
        .await
        .unwrap_err();

    assert!(matches!(err, DriveError::Server(_)));
}
