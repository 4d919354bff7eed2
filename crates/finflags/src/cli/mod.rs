//! Command-line interface for finflags.
//!
//! This module provides the CLI structure for the `finflags` binary and the
//! interactive page loop.

mod commands;
pub mod interactive;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, EvaluateCommand, OutputFormat, RenderCommand, SessionCommand, SubmitCommand,
    UploadCommand,
};

/// finflags - Financial Analysis Model
///
/// Upload a company document to the analysis endpoint and view the three
/// rule flags it returns.
#[derive(Debug, Parser)]
#[command(name = "finflags")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select a file, submit it and show the result
    Upload(UploadCommand),

    /// Submit with no file selected
    Submit(SubmitCommand),

    /// Run the upload page interactively
    Session(SessionCommand),

    /// Render a saved analysis response
    Render(RenderCommand),

    /// Evaluate the flag rules locally
    Evaluate(EvaluateCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
