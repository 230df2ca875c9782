//! Record parameters to Notion request bodies
//!
//! The target database is expected to have these properties:
//!
//! | property       | Notion type |
//! |----------------|-------------|
//! | `title`        | title       |
//! | `entryUpdated` | date        |
//! | `guid`         | rich_text   |
//! | `mimeType`     | select      |
//! | `type`         | select      |
//! | `excerpt`      | rich_text   |
//! | `description`  | rich_text   |
//! | `link`         | url         |
//! | `modified`     | date        |

use serde_json::{json, Map, Value};

use gchanges_core::domain::{
    format_timestamp, CreateRecordParams, ExternalCover, RecordProperties, UpdateRecordParams,
};

/// Property holding the source file guid
pub const GUID_PROPERTY: &str = "guid";

/// Property used to order database queries
pub const ENTRY_UPDATED_PROPERTY: &str = "entryUpdated";

fn text(content: &str) -> Value {
    json!([{ "type": "text", "text": { "content": content } }])
}

fn date(ts: &chrono::DateTime<chrono::Utc>) -> Value {
    json!({ "start": format_timestamp(ts) })
}

/// Encodes record properties as a Notion `properties` object
///
/// `guid` is only included when set.
pub fn encode_properties(props: &RecordProperties) -> Value {
    let mut map = Map::new();
    map.insert("title".into(), json!({ "title": text(&props.title) }));
    map.insert(
        ENTRY_UPDATED_PROPERTY.into(),
        json!({ "date": date(&props.entry_updated) }),
    );
    if let Some(guid) = &props.guid {
        map.insert(
            GUID_PROPERTY.into(),
            json!({ "rich_text": text(guid.as_str()) }),
        );
    }
    map.insert(
        "mimeType".into(),
        json!({ "select": { "name": props.mime_type } }),
    );
    map.insert("type".into(), json!({ "select": { "name": props.kind } }));
    map.insert("excerpt".into(), json!({ "rich_text": text(&props.excerpt) }));
    map.insert(
        "description".into(),
        json!({ "rich_text": text(&props.description) }),
    );
    map.insert("link".into(), json!({ "url": props.link }));
    map.insert("modified".into(), json!({ "date": date(&props.modified) }));
    Value::Object(map)
}

/// Encodes a cover as an external file object
pub fn encode_cover(cover: &ExternalCover) -> Value {
    json!({ "type": "external", "external": { "url": cover.url } })
}

/// Body of `POST /pages`
pub fn create_body(params: &CreateRecordParams) -> Value {
    let mut body = json!({
        "parent": { "database_id": params.database_id },
        "properties": encode_properties(&params.properties),
    });
    if let Some(cover) = &params.cover {
        body["cover"] = encode_cover(cover);
    }
    body
}

/// Body of `PATCH /pages/{id}`
///
/// `archived` is only sent when true so that plain updates never restore or
/// archive a page by accident.
pub fn update_body(params: &UpdateRecordParams) -> Value {
    let mut body = Map::new();
    if let Some(props) = &params.properties {
        body.insert("properties".into(), encode_properties(props));
    }
    if params.archived {
        body.insert("archived".into(), Value::Bool(true));
    }
    if let Some(cover) = &params.cover {
        body.insert("cover".into(), encode_cover(cover));
    }
    Value::Object(body)
}

/// Body of `POST /databases/{id}/query`: newest `entryUpdated` first
pub fn query_body(start_cursor: Option<&str>, page_size: u32) -> Value {
    let mut body = json!({
        "sorts": [{ "property": ENTRY_UPDATED_PROPERTY, "direction": "descending" }],
        "page_size": page_size,
    });
    if let Some(cursor) = start_cursor {
        body["start_cursor"] = Value::String(cursor.to_string());
    }
    body
}

/// Reads the guid stored in a page's `properties`
///
/// Concatenates the plain text of every rich text segment; returns `None`
/// when the property is missing or empty.
pub fn page_guid(properties: &Value) -> Option<String> {
    let segments = properties
        .get(GUID_PROPERTY)?
        .get("rich_text")?
        .as_array()?;
    let guid: String = segments
        .iter()
        .filter_map(|s| {
            s.get("plain_text")
                .or_else(|| s.get("text").and_then(|t| t.get("content")))
                .and_then(Value::as_str)
        })
        .collect();
    (!guid.is_empty()).then_some(guid)
}
