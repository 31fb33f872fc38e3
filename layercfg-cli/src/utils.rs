//! Utility functions for CLI operations.
//!
//! This module provides the global options shared by every command and
//! the configuration loading they all go through.

use crate::error::CliError;
use crate::schema::ServiceSettings;
use layercfg::ConfigBuilder;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Configuration file to load.
    pub config: Option<PathBuf>,
}

/// Load the service configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. The configuration file given by `--config`
/// 3. Built-in defaults (lowest priority)
///
/// Required fields are only checked when `validate` is set.
pub fn load_settings(global: &GlobalOptions, validate: bool) -> Result<ServiceSettings, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(path) = &global.config {
        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                path.display()
            )));
        }
        log::debug!("Using configuration file {}", path.display());
        builder = builder.with_file(path);
    } else {
        log::debug!("No configuration file given; using defaults and environment");
    }

    if !validate {
        log::debug!("Skipping required-field validation");
        builder = builder.skip_validation();
    }

    let settings = builder.build()?;
    Ok(settings)
}
