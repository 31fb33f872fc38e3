//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CheckCommand, CompletionsCommand, ShowCommand, VarsCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting layered service configuration.
#[derive(Parser)]
#[command(name = "layercfg")]
#[command(version, about = "Inspect layered service configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Configuration file (JSON, or YAML by extension)
    #[arg(long, short = 'c', value_name = "PATH", global = true, env = "LAYERCFG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the loaded configuration
    Show(ShowCommand),

    /// Check that the configuration loads and required fields are set
    Check(CheckCommand),

    /// List the environment variables the configuration reads
    Vars(VarsCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
