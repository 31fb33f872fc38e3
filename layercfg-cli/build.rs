//! Build script for layercfg-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("layercfg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect layered service configuration")
        .long_about(
            "Load a service configuration from defaults, a JSON or YAML file and \
             environment variables, then print, check or document it",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file (JSON, or YAML by extension)")
                .value_name("PATH")
                .global(true)
                .env("LAYERCFG_CONFIG"),
        )
        .subcommands(vec![
            Command::new("show")
                .about("Print the loaded configuration")
                .long_about("Load the configuration from every source and print it as JSON or YAML"),
            Command::new("check")
                .about("Check that the configuration loads and required fields are set")
                .long_about("Load the configuration and exit with status 1 if required fields are empty"),
            Command::new("vars")
                .about("List the environment variables the configuration reads")
                .long_about("Describe every configuration field with its variable, default and required flag"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("layercfg.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
