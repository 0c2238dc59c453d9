//! Command-line argument parsing for the dockhost binary
//!
//! Supports:
//! - Opening files as documents
//! - Flagging documents as having unsaved changes
//! - Overriding the config file and the unsaved-changes guard
//! - Text or JSON teardown reports

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Open documents, then tear the host down through close requests
#[derive(Parser, Debug)]
#[command(
    name = "dockhost",
    version,
    about = "Open documents and close them through vetoable close requests"
)]
pub struct CliArgs {
    /// Files to open as documents (an untitled document if none)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Mark document N (1-indexed) as having unsaved changes
    #[arg(short = 'm', long = "modified", value_name = "N")]
    pub modified: Vec<usize>,

    /// Allow closing documents with unsaved changes
    #[arg(long)]
    pub no_guard: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for the teardown report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Teardown report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Files to open; empty means one untitled document
    pub paths: Vec<PathBuf>,
    /// Documents to flag as modified - 0-indexed, converted from user input
    pub modified: Vec<usize>,
    /// Disable the unsaved-changes guard regardless of config
    pub disable_guard: bool,
    /// Explicit config file
    pub config_path: Option<PathBuf>,
    pub format: OutputFormat,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let document_count = self.paths.len().max(1);

        let mut modified = Vec::with_capacity(self.modified.len());
        for n in self.modified {
            if n == 0 || n > document_count {
                return Err(format!(
                    "Document number {} out of range (1-{})",
                    n, document_count
                ));
            }
            // Convert from 1-indexed (user input) to 0-indexed (internal)
            let idx = n - 1;
            if !modified.contains(&idx) {
                modified.push(idx);
            }
        }

        Ok(StartupConfig {
            paths: self.paths,
            modified,
            disable_guard: self.no_guard,
            config_path: self.config,
            format: self.format,
        })
    }
}
