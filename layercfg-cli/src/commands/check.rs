//! Command to check that the service configuration is complete.

use crate::error::CliError;
use crate::utils::{load_settings, GlobalOptions};
use clap::Args;
use layercfg::Error as LibError;

/// Check that the configuration loads and required fields are set.
#[derive(Args)]
pub struct CheckCommand {}

impl CheckCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match load_settings(global, true) {
            Ok(_) => {
                println!("Configuration is valid");
                Ok(())
            }
            Err(CliError::Library(e @ LibError::Validation { .. })) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
            Err(e) => Err(e),
        }
    }
}
