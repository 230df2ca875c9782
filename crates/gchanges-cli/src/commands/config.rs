//! Config command - View and check gchanges2notion configuration
//!
//! Provides the `gchanges2notion config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Checks the configuration file and reports errors

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use gchanges_core::config::{Config, ValidationError};

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// Check the configuration file
    Check,
}

impl ConfigCommand {
    pub fn execute(&self, config_path: &Path, format: OutputFormat) -> Result<()> {
        match self {
            ConfigCommand::Show => execute_show(config_path, format),
            ConfigCommand::Check => execute_check(config_path, format),
        }
    }
}

fn execute_show(config_path: &Path, format: OutputFormat) -> Result<()> {
    let formatter = get_formatter(matches!(format, OutputFormat::Json));
    let config = Config::load_or_default(config_path);

    info!(config_path = %config_path.display(), "Showing configuration");

    if matches!(format, OutputFormat::Json) {
        let json =
            serde_json::to_value(&config).context("Failed to serialize configuration to JSON")?;
        formatter.print_json(&json);
    } else {
        formatter.success(&format!("Configuration ({})", config_path.display()));
        formatter.info("");
        let yaml =
            serde_yaml::to_string(&config).context("Failed to serialize configuration to YAML")?;
        for line in yaml.lines() {
            formatter.info(line);
        }
    }
    Ok(())
}

/// Outcome of checking a configuration file
#[derive(Debug)]
enum CheckOutcome {
    Missing,
    Unreadable(String),
    Checked(Vec<ValidationError>),
}

fn check(config_path: &Path) -> CheckOutcome {
    if !config_path.exists() {
        return CheckOutcome::Missing;
    }
    match Config::load(config_path) {
        Ok(config) => CheckOutcome::Checked(config.validate()),
        Err(e) => CheckOutcome::Unreadable(e.to_string()),
    }
}

fn execute_check(config_path: &Path, format: OutputFormat) -> Result<()> {
    let formatter = get_formatter(matches!(format, OutputFormat::Json));
    info!(config_path = %config_path.display(), "Checking configuration");

    let errors: Vec<String> = match check(config_path) {
        CheckOutcome::Missing => vec![format!("Configuration file not found: {}", config_path.display())],
        CheckOutcome::Unreadable(e) => vec![format!("Failed to parse configuration: {e}")],
        CheckOutcome::Checked(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };

    if matches!(format, OutputFormat::Json) {
        formatter.print_json(&serde_json::json!({
            "valid": errors.is_empty(),
            "config_path": config_path.display().to_string(),
            "errors": errors,
        }));
    } else if errors.is_empty() {
        formatter.success("Configuration is valid");
        formatter.info(&format!("File: {}", config_path.display()));
    } else {
        formatter.error(&format!(
            "Configuration has {} error{}:",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" }
        ));
        formatter.info(&format!("File: {}", config_path.display()));
        for error in &errors {
            formatter.info(&format!("  {error}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("invalid configuration")
    }
}
