//! Tracked record loading against a mocked database query

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gchanges_core::domain::EvictionPolicy;
use gchanges_notion::load_tracked_records;

use crate::common::{mount_error, page, with_client, DATABASE_ID};

fn query_path() -> String {
    format!("/databases/{DATABASE_ID}/query")
}

#[tokio::test]
async fn test_load_follows_cursor_and_keeps_order() {
    let server = MockServer::start().await;

    // Second page first so the cursor matcher takes precedence
    Mock::given(method("POST"))
        .and(path(query_path()))
        .and(body_partial_json(json!({ "start_cursor": "cursor-2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "results": [page("page-c", Some("file-c"), false)],
            "has_more": false,
            "next_cursor": null
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(query_path()))
        .and(body_partial_json(json!({
            "sorts": [{ "property": "entryUpdated", "direction": "descending" }],
            "page_size": 100
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "results": [
                page("page-a", Some("file-a"), false),
                page("page-x", None, false),
                page("page-b", Some("file-b"), false),
                page("page-gone", Some("file-gone"), true)
            ],
            "has_more": true,
            "next_cursor": "cursor-2"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let records = with_client(&server, |client| {
        load_tracked_records(&client, DATABASE_ID, EvictionPolicy::default())
    })
    .await
    .unwrap();

    let order: Vec<(&str, Option<&str>)> = records
        .iter()
        .map(|r| (r.guid.as_str(), r.record_id.as_ref().map(|id| id.as_str())))
        .collect();
    assert_eq!(
        order,
        vec![
            ("file-a", Some("page-a")),
            ("file-b", Some("page-b")),
            ("file-c", Some("page-c")),
        ]
    );
    assert!(records.iter().all(|r| !r.touched));
}

#[tokio::test]
async fn test_load_keeps_newest_duplicate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(query_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                page("page-new", Some("file-a"), false),
                page("page-old", Some("file-a"), false)
            ],
            "has_more": false,
            "next_cursor": null
        })))
        .mount(&server)
        .await;

    let records = with_client(&server, |client| {
        load_tracked_records(&client, DATABASE_ID, EvictionPolicy::UntouchedOnly)
    })
    .await
    .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records.policy(), EvictionPolicy::UntouchedOnly);
    let guid = "file-a".parse().unwrap();
    assert_eq!(records.record_id(&guid).map(|id| id.as_str()), Some("page-new"));
}

#[tokio::test]
async fn test_load_missing_database_fails() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        "POST",
        &query_path(),
        404,
        json!({ "code": "object_not_found", "message": "Could not find database" }),
    )
    .await;

    let err = with_client(&server, |client| {
        load_tracked_records(&client, DATABASE_ID, EvictionPolicy::default())
    })
    .await
    .unwrap_err();

    assert!(err.to_string().contains(DATABASE_ID));
    assert!(matches!(
        err.downcast_ref::<gchanges_notion::NotionError>(),
        Some(gchanges_notion::NotionError::NotFound(_))
    ));
}
