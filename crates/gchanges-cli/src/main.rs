//! gchanges2notion CLI - Mirrors Google Drive changes into a Notion database
//!
//! Provides commands for:
//! - Sending a page of the Drive change feed to Notion
//! - Checking and showing the configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gchanges_core::config::Config;

mod commands;
mod output;

use commands::{config::ConfigCommand, send::SendCommand};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "gchanges2notion",
    version,
    about = "Mirror Google Drive changes into a Notion database"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send a change list to the Notion database
    Send(SendCommand),
    /// View and check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Filter directive for the tracing subscriber
///
/// `-v` flags take precedence over the configured level.
fn log_directive(verbose: u8, configured: Option<&str>) -> String {
    match verbose {
        0 => configured.unwrap_or("info").to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    let configured = Config::load(&config_path).ok().map(|c| c.logging.level);
    let directive = log_directive(cli.verbose, configured.as_deref());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Send(cmd) => cmd.execute(&config_path, format),
        Commands::Config(cmd) => cmd.execute(&config_path, format),
    }
}
