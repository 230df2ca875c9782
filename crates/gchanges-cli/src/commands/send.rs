//! Send command - Mirror a change list into Notion
//!
//! Provides the `gchanges2notion send` CLI command which:
//! 1. Loads and validates configuration
//! 2. Reads the API credentials from the environment
//! 3. Obtains the change list, from a JSON file or from the Drive feed
//! 4. Loads the tracked records from the database and runs the pipeline
//! 5. Displays the summary (and the next page token when reading from Drive)

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{ArgGroup, Args};
use tracing::info;

use gchanges_core::config::Config;
use gchanges_core::domain::ChangeList;
use gchanges_drive::DriveClient;
use gchanges_notion::{load_tracked_records, NotionClient};
use gchanges_sync::{MemoryStateStore, SendOptions, SyncRunner};

use crate::output::{get_formatter, OutputFormat};

/// Default page size when reading the Drive change feed
const DEFAULT_MAX_RESULTS: u32 = 100;

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("input").required(true).args(["changes", "page_token"])))]
pub struct SendCommand {
    /// Read the change list from a JSON file (`-` for stdin)
    #[arg(long)]
    pub changes: Option<PathBuf>,

    /// Fetch the change list from Drive, starting at this page token
    #[arg(long)]
    pub page_token: Option<String>,

    /// Number of changes requested from Drive
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: u32,

    /// Override `sync.limit` for this run (at least 1)
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub limit: Option<usize>,
}

impl SendCommand {
    pub fn execute(&self, config_path: &Path, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));

        let mut config = Config::load(config_path)
            .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
        if let Some(limit) = self.limit {
            config.sync.limit = limit;
        }
        let errors = config.validate();
        if !errors.is_empty() {
            for error in &errors {
                formatter.error(&error.to_string());
            }
            bail!("Configuration has {} error(s)", errors.len());
        }

        let api_key = env_credential(&config.notion.api_key_env)?;
        let access_token = env_credential(&config.drive.access_token_env)?;
        let notion = NotionClient::with_base_url(api_key, &config.notion.base_url);
        let drive = DriveClient::with_base_url(access_token, &config.drive.base_url);

        let (changes, next_token) = match (&self.changes, &self.page_token) {
            (Some(path), _) => (read_change_list(path)?, None),
            (None, Some(token)) => {
                let list = drive
                    .list_changes(Some(token), self.max_results)
                    .context("Failed to fetch the Drive change feed")?;
                let next = next_page_token(&list);
                (list, next)
            }
            (None, None) => bail!("either --changes or --page-token is required"),
        };

        let options = SendOptions::from_config(&config);
        info!(database_id = %options.database_id, limit = options.limit, "Starting send");

        let runner = SyncRunner::new(&notion, &drive, &drive);
        let summary = runner.send(&options, changes, |database_id| {
            let records = load_tracked_records(&notion, database_id, config.sync.eviction)?;
            Ok(MemoryStateStore::new(records))
        })?;

        if matches!(format, OutputFormat::Json) {
            let mut json =
                serde_json::to_value(summary).context("Failed to serialize summary")?;
            json["next_page_token"] = serde_json::json!(next_token);
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Sent {} change(s)", summary.total()));
            formatter.info(&format!("Created:  {}", summary.created));
            formatter.info(&format!("Updated:  {}", summary.updated));
            formatter.info(&format!("Archived: {}", summary.archived));
            formatter.info(&format!("Evicted:  {}", summary.evicted));
            if let Some(token) = &next_token {
                formatter.info(&format!("Next page token: {token}"));
            }
        }

        Ok(())
    }
}

fn env_credential(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("Environment variable {name} is not set"),
    }
}

/// Reads a change list in the Drive v2 `changes.list` JSON shape
fn read_change_list(path: &Path) -> Result<ChangeList> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read change list from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read change list {}", path.display()))?
    };
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid change list in {}", path.display()))
}

/// Token to resume the feed from: the next page if there is one, else the
/// start token for future changes
fn next_page_token(list: &ChangeList) -> Option<String> {
    list.next_page_token
        .clone()
        .or_else(|| list.new_start_page_token.clone())
}
