//! Integration tests for the `check` command.

mod common;

use common::{TestEnv, SAMPLE_JSON};
use predicates::prelude::*;

#[test]
fn test_check_missing_required_field() {
    let env = TestEnv::new();

    env.command()
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "required fields: [password] are not filled up",
        ))
        .stderr(predicate::str::contains("Configuration validation failed"));
}

#[test]
fn test_check_valid_from_env() {
    let env = TestEnv::new();

    env.command_valid()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_check_valid_from_file() {
    let env = TestEnv::new();
    let path = env.write_file("config.json", SAMPLE_JSON);

    env.command()
        .arg("--config")
        .arg(&path)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_check_invalid_file() {
    let env = TestEnv::new();
    let path = env.write_file("config.json", "{\"version\": ");

    env.command_valid()
        .arg("--config")
        .arg(&path)
        .arg("check")
        .assert()
        .code(6);
}

#[test]
fn test_check_quiet_still_reports_errors() {
    let env = TestEnv::new();

    env.command()
        .args(["--quiet", "check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
