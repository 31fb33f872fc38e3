//! Vars command implementation.
//!
//! This module implements the `vars` command, which lists every field of
//! the service configuration with the environment variable that sets it.

use crate::error::CliError;
use crate::schema::ServiceSettings;
use crate::utils::GlobalOptions;
use clap::{Args, ValueEnum};
use layercfg::{describe, FieldInfo};
use std::io::Write;

/// Column headers for table output.
const COLUMN_HEADERS: [&str; 4] = ["env", "path", "default", "required"];

/// List the environment variables the configuration reads.
#[derive(Args)]
pub struct VarsCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: VarsFormat,

    /// Only list required fields
    #[arg(long)]
    pub required_only: bool,
}

/// Output format for the vars command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum VarsFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
}

impl VarsCommand {
    /// Execute the vars command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let fields: Vec<FieldInfo> = describe::<ServiceSettings>()
            .into_iter()
            .filter(|field| !self.required_only || field.required)
            .collect();

        let mut stdout = std::io::stdout().lock();
        match self.format {
            VarsFormat::Table => write_table(&mut stdout, &fields)?,
            VarsFormat::Json => {
                serde_json::to_writer_pretty(&mut stdout, &fields)?;
                writeln!(stdout)?;
            }
        }

        Ok(())
    }
}

fn write_table(out: &mut impl Write, fields: &[FieldInfo]) -> std::io::Result<()> {
    writeln!(out, "{}", COLUMN_HEADERS.join("\t").to_uppercase())?;
    for field in fields {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            field.env.as_deref().unwrap_or("-"),
            field.path,
            field.default.unwrap_or("-"),
            if field.required { "yes" } else { "no" }
        )?;
    }
    Ok(())
}
