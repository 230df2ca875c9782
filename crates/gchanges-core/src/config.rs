//! Configuration module for gchanges2notion.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{EvictionPolicy, FOLDER_MIME_TYPE};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for gchanges2notion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub notion: NotionConfig,
    pub drive: DriveConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Target Notion database and API access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    /// Database that receives one record per file.
    pub database_id: String,
    /// Name of the environment variable holding the integration token.
    pub api_key_env: String,
    /// Base URL of the Notion API.
    pub base_url: String,
}

/// Google Drive API access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Name of the environment variable holding the OAuth access token.
    pub access_token_env: String,
    /// Base URL of the Drive v2 API.
    pub base_url: String,
}

/// Pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum number of files handled per run, and the number of records kept.
    pub limit: usize,
    /// File ids that are never mirrored.
    pub ignore_ids: Vec<String>,
    /// MIME types that are never mirrored.
    pub ignore_types: Vec<String>,
    /// Which records may be archived once over capacity.
    pub eviction: EvictionPolicy,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/gchanges2notion/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("gchanges2notion")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default Notion API base URL.
pub const DEFAULT_NOTION_BASE_URL: &str = "https://api.notion.com/v1";

/// Default Drive API base URL.
pub const DEFAULT_DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v2";

/// Default number of files per run.
pub const DEFAULT_LIMIT: usize = 10;

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            database_id: String::new(),
            api_key_env: "NOTION_API_KEY".into(),
            base_url: DEFAULT_NOTION_BASE_URL.into(),
        }
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            access_token_env: "GOOGLE_ACCESS_TOKEN".into(),
            base_url: DEFAULT_DRIVE_BASE_URL.into(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            ignore_ids: Vec::new(),
            ignore_types: vec![FOLDER_MIME_TYPE.into()],
            eviction: EvictionPolicy::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"sync.limit"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- notion ---
        if self.notion.database_id.trim().is_empty() {
            errors.push(ValidationError {
                field: "notion.database_id".into(),
                message: "must not be empty".into(),
            });
        }
        if self.notion.api_key_env.trim().is_empty() {
            errors.push(ValidationError {
                field: "notion.api_key_env".into(),
                message: "must name an environment variable".into(),
            });
        }
        if let Err(e) = url::Url::parse(&self.notion.base_url) {
            errors.push(ValidationError {
                field: "notion.base_url".into(),
                message: format!("invalid URL: {e}"),
            });
        }

        // --- drive ---
        if self.drive.access_token_env.trim().is_empty() {
            errors.push(ValidationError {
                field: "drive.access_token_env".into(),
                message: "must name an environment variable".into(),
            });
        }
        if let Err(e) = url::Url::parse(&self.drive.base_url) {
            errors.push(ValidationError {
                field: "drive.base_url".into(),
                message: format!("invalid URL: {e}"),
            });
        }

        // --- sync ---
        // A zero limit would archive every tracked record at the end of a run
        if self.sync.limit == 0 {
            errors.push(ValidationError {
                field: "sync.limit".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid log level '{}'; expected one of: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows overriding individual fields.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pre-populated with defaults.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn database_id(mut self, id: impl Into<String>) -> Self {
        self.config.notion.database_id = id.into();
        self
    }

    pub fn notion_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.notion.base_url = url.into();
        self
    }

    pub fn drive_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.drive.base_url = url.into();
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.config.sync.limit = limit;
        self
    }

    pub fn ignore_ids(mut self, ids: Vec<String>) -> Self {
        self.config.sync.ignore_ids = ids;
        self
    }

    pub fn ignore_types(mut self, types: Vec<String>) -> Self {
        self.config.sync.ignore_types = types;
        self
    }

    pub fn eviction(mut self, policy: EvictionPolicy) -> Self {
        self.config.sync.eviction = policy;
        self
    }

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Consume the builder and return the final [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate, returning errors if any.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let errors = self.config.validate();
        if errors.is_empty() {
            Ok(self.config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
