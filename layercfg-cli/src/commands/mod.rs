//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `show`: Print the loaded configuration
//! - `check`: Check that the configuration loads and required fields are set
//! - `vars`: List the environment variables the configuration reads
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod completions;
pub mod show;
pub mod vars;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use show::ShowCommand;
pub use vars::VarsCommand;
