//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Upload command arguments.
#[derive(Debug, Args)]
pub struct UploadCommand {
    /// File to send for analysis
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Report a failed upload instead of staying silent
    #[arg(long)]
    pub show_errors: bool,
}

/// Submit command arguments.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Report a failed upload instead of staying silent
    #[arg(long)]
    pub show_errors: bool,
}

/// Interactive session arguments.
#[derive(Debug, Args)]
pub struct SessionCommand {
    /// Report failed uploads instead of staying silent
    #[arg(long)]
    pub show_errors: bool,
}

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Saved response body (JSON)
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Evaluate command arguments.
#[derive(Debug, Args)]
pub struct EvaluateCommand {
    /// Company document (JSON with a `data.financials` list)
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Rendered page text
    #[default]
    Plain,
    /// JSON output
    Json,
}
