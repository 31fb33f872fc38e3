//! Show command implementation.
//!
//! This module implements the `show` command, which loads the service
//! configuration from every source and prints the result.

use crate::error::CliError;
use crate::utils::{load_settings, GlobalOptions};
use clap::{Args, ValueEnum};

/// Print the loaded configuration.
#[derive(Args)]
pub struct ShowCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "json", ignore_case = true)]
    pub format: ShowFormat,

    /// Fail when required fields are missing
    #[arg(long)]
    pub validate: bool,
}

/// Output format for the show command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ShowFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = load_settings(global, self.validate)?;

        let rendered = match self.format {
            ShowFormat::Json => serde_json::to_string_pretty(&settings)?,
            ShowFormat::Yaml => serde_yaml::to_string(&settings)?,
        };
        println!("{}", rendered.trim_end());

        Ok(())
    }
}
