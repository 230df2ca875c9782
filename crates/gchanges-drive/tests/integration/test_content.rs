//! File handles and content extraction against a mocked Drive API

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gchanges_core::domain::FileHandle;
use gchanges_core::ports::{ContentExtractor, FileSource};
use gchanges_drive::DriveError;

use crate::common::with_client;

fn handle(id: &str) -> FileHandle {
    FileHandle {
        id: id.to_string(),
        url: format!("https://drive.google.com/file/d/{id}/view"),
    }
}

#[tokio::test]
async fn test_open_uses_alternate_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/doc-1"))
        .and(query_param("fields", "id,alternateLink"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "doc-1",
            "alternateLink": "https://docs.google.com/document/d/doc-1/edit"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/bin-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "bin-1" })))
        .mount(&server)
        .await;

    let (doc, bin) = with_client(&server, |client| {
        (client.open("doc-1").unwrap(), client.open("bin-1").unwrap())
    })
    .await;

    assert_eq!(doc.id, "doc-1");
    assert_eq!(doc.url, "https://docs.google.com/document/d/doc-1/edit");
    assert_eq!(bin.url, "https://drive.google.com/file/d/bin-1/view");
}

#[tokio::test]
async fn test_open_missing_file_fails_with_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "message": "File not found: nope." }
        })))
        .mount(&server)
        .await;

    let err = with_client(&server, |client| client.open("nope")).await.unwrap_err();

    assert!(err.to_string().contains("nope"));
    assert!(matches!(
        err.downcast_ref::<DriveError>(),
        Some(DriveError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_extract_text_file_downloads_media() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/txt-1"))
        .and(query_param("alt", "media"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello\nworld"))
        .mount(&server)
        .await;

    let text = with_client(&server, |client| {
        client.extract("text/plain", "text", &handle("txt-1"), "txt-1")
    })
    .await
    .unwrap();

    assert_eq!(text, "hello\nworld");
}

#[tokio::test]
async fn test_extract_workspace_files_export() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/doc-1/export"))
        .and(query_param("mimeType", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Agenda"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/sheet-1/export"))
        .and(query_param("mimeType", "text/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n1,2"))
        .mount(&server)
        .await;

    let (doc, sheet) = with_client(&server, |client| {
        let doc = client
            .extract(
                "application/vnd.google-apps.document",
                "document",
                &handle("doc-1"),
                "doc-1",
            )
            .unwrap();
        let sheet = client
            .extract(
                "application/vnd.google-apps.spreadsheet",
                "spreadsheet",
                &handle("sheet-1"),
                "sheet-1",
            )
            .unwrap();
        (doc, sheet)
    })
    .await;

    assert_eq!(doc, "Agenda");
    assert_eq!(sheet, "a\tb\n1\t2");
}

#[tokio::test]
async fn test_extract_other_types_is_empty_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let text = with_client(&server, |client| {
        client.extract("application/pdf", "pdf", &handle("pdf-1"), "pdf-1")
    })
    .await
    .unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn test_extract_export_refused() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/slides-1/export"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "This file is too large to be exported." }
        })))
        .mount(&server)
        .await;

    let err = with_client(&server, |client| {
        client.extract(
            "application/vnd.google-apps.presentation",
            "presentation",
            &handle("slides-1"),
            "slides-1",
        )
    })
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DriveError>(),
        Some(DriveError::Forbidden(_))
    ));
}
