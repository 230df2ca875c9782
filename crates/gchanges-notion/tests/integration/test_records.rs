//! Record service against a mocked Notion API

use std::str::FromStr;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gchanges_core::domain::{
    CreateRecordParams, ExternalCover, Guid, RecordId, RecordProperties, UpdateRecordParams,
};
use gchanges_core::ports::RecordService;
use gchanges_notion::NotionError;

use crate::common::{mount_create, mount_error, page, with_client, DATABASE_ID};

fn properties(guid: Option<&str>) -> RecordProperties {
    RecordProperties {
        title: "Meeting notes".into(),
        entry_updated: Utc.with_ymd_and_hms(2022, 4, 18, 0, 0, 0).unwrap(),
        guid: guid.map(|g| Guid::from_str(g).unwrap()),
        mime_type: "application/vnd.google-apps.document".into(),
        kind: "document".into(),
        excerpt: "Agenda".into(),
        description: String::new(),
        link: "https://docs.google.com/document/d/file-1/edit".into(),
        modified: Utc.with_ymd_and_hms(2022, 4, 17, 10, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_create_record_sends_parent_properties_and_cover() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pages"))
        .and(body_partial_json(json!({
            "parent": { "database_id": DATABASE_ID },
            "properties": {
                "guid": { "rich_text": [{ "type": "text", "text": { "content": "file-1" } }] },
                "type": { "select": { "name": "document" } }
            },
            "cover": { "type": "external", "external": { "url": "https://lh3.googleusercontent.com/t" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("page-1", Some("file-1"), false)))
        .expect(1)
        .mount(&server)
        .await;

    let record = with_client(&server, |client| {
        client.create_record(&CreateRecordParams {
            database_id: DATABASE_ID.into(),
            properties: properties(Some("file-1")),
            cover: Some(ExternalCover {
                url: "https://lh3.googleusercontent.com/t".into(),
            }),
        })
    })
    .await
    .unwrap();

    assert_eq!(record.id.as_str(), "page-1");
    assert!(!record.archived);
    assert_eq!(record.url.as_deref(), Some("https://www.notion.so/page-1"));
}

#[tokio::test]
async fn test_create_record_sends_auth_headers() {
    let server = MockServer::start().await;
    // Only matches with the expected bearer token and API version
    mount_create(&server, page("page-2", Some("file-2"), false)).await;

    let record = with_client(&server, |client| {
        client.create_record(&CreateRecordParams {
            database_id: DATABASE_ID.into(),
            properties: properties(Some("file-2")),
            cover: None,
        })
    })
    .await
    .unwrap();

    assert_eq!(record.id.as_str(), "page-2");
}

#[tokio::test]
async fn test_update_record_patches_page() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/pages/page-1"))
        .and(body_partial_json(json!({
            "properties": { "title": { "title": [{ "text": { "content": "Meeting notes" } }] } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("page-1", Some("file-1"), false)))
        .expect(1)
        .mount(&server)
        .await;

    let record = with_client(&server, |client| {
        client.update_record(&UpdateRecordParams {
            record_id: RecordId::from_str("page-1").unwrap(),
            properties: Some(properties(None)),
            archived: false,
            cover: None,
        })
    })
    .await
    .unwrap();

    assert_eq!(record.id.as_str(), "page-1");
}

#[tokio::test]
async fn test_archive_record() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/pages/page-9"))
        .and(body_partial_json(json!({ "archived": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("page-9", Some("old"), true)))
        .expect(1)
        .mount(&server)
        .await;

    let record = with_client(&server, |client| {
        client.update_record(&UpdateRecordParams::archive(RecordId::from_str("page-9").unwrap()))
    })
    .await
    .unwrap();

    assert!(record.archived);
}

#[tokio::test]
async fn test_unauthorized_maps_to_notion_error() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        "POST",
        "/pages",
        401,
        json!({ "object": "error", "status": 401, "code": "unauthorized", "message": "API token is invalid." }),
    )
    .await;

    let err = with_client(&server, |client| {
        client.create_record(&CreateRecordParams {
            database_id: DATABASE_ID.into(),
            properties: properties(Some("file-1")),
            cover: None,
        })
    })
    .await
    .unwrap_err();

    match err.downcast_ref::<NotionError>() {
        Some(NotionError::Unauthorized(message)) => assert_eq!(message, "API token is invalid."),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_error_maps_to_api_error() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        "PATCH",
        "/pages/page-1",
        400,
        json!({ "object": "error", "status": 400, "code": "validation_error", "message": "mimeType is not a property" }),
    )
    .await;

    let err = with_client(&server, |client| {
        client.update_record(&UpdateRecordParams::archive(RecordId::from_str("page-1").unwrap()))
    })
    .await
    .unwrap_err();

    match err.downcast_ref::<NotionError>() {
        Some(NotionError::Api { code, .. }) => assert_eq!(code, "validation_error"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_carries_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "7")
                .set_body_json(json!({ "code": "rate_limited", "message": "slow down" })),
        )
        .mount(&server)
        .await;

    let err = with_client(&server, |client| {
        client.create_record(&CreateRecordParams {
            database_id: DATABASE_ID.into(),
            properties: properties(Some("file-1")),
            cover: None,
        })
    })
    .await
    .unwrap_err();

    match err.downcast_ref::<NotionError>() {
        Some(NotionError::RateLimited { retry_after }) => {
            assert_eq!(*retry_after, Some(Duration::from_secs(7)))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
