//! Record service backed by Notion pages

use anyhow::Context;

use gchanges_core::domain::{CreateRecordParams, RecordId, UpdateRecordParams};
use gchanges_core::ports::{Record, RecordService};

use crate::client::{NotionClient, Page};

impl RecordService for NotionClient {
    fn create_record(&self, params: &CreateRecordParams) -> anyhow::Result<Record> {
        let page = self
            .create_page(params)
            .with_context(|| format!("Notion page creation in database {} failed", params.database_id))?;
        to_record(page)
    }

    fn update_record(&self, params: &UpdateRecordParams) -> anyhow::Result<Record> {
        let page = self
            .update_page(params)
            .with_context(|| format!("Notion page update of {} failed", params.record_id))?;
        to_record(page)
    }
}

fn to_record(page: Page) -> anyhow::Result<Record> {
    let id = RecordId::new(page.id).context("Notion returned an invalid page id")?;
    Ok(Record {
        id,
        archived: page.archived,
        url: page.url,
    })
}
