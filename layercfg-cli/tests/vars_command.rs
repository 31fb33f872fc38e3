//! Integration tests for the `vars` command.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_vars_table() {
    let env = TestEnv::new();

    env.command()
        .arg("vars")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ENV\tPATH\tDEFAULT\tREQUIRED"))
        .stdout(predicate::str::contains(
            "SERVER_ADDR\tserver.addr\tlocalhost:8080\tno",
        ))
        .stdout(predicate::str::contains(
            "REPLICAS_<n>_POSTGRES_USER\treplicas[].user\tpostgres\tno",
        ))
        .stdout(predicate::str::contains("POSTGRES_PASSWORD\tpostgres.password\t-\tyes"));
}

#[test]
fn test_vars_json() {
    let env = TestEnv::new();

    let output = env.command().args(["vars", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let fields: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    let websocket = fields
        .iter()
        .find(|field| field["path"] == "websocket.port")
        .unwrap();
    assert_eq!(websocket["env"], "WEBSOCKET_PORT");
    assert_eq!(websocket["default"], "9876");
    assert_eq!(websocket["required"], false);
}

#[test]
fn test_vars_required_only() {
    let env = TestEnv::new();

    let output = env
        .command()
        .args(["vars", "--format", "json", "--required-only"])
        .output()
        .unwrap();
    let fields: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    let paths: Vec<&str> = fields
        .iter()
        .map(|field| field["path"].as_str().unwrap())
        .collect();

    assert_eq!(paths, vec!["version", "postgres.password", "replicas[].password"]);
}
