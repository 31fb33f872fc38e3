//! Common test utilities for integration tests.
//!
//! This module provides fixture configuration types and helper functions
//! for testing the layercfg library.

use std::fs;
use std::path::{Path, PathBuf};

use layercfg::{Duration, Field, Settings};
use serde::{Deserialize, Serialize};

/// Path to a file under `tests/fixtures/configs`.
#[allow(dead_code)]
pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("configs")
        .join(relative)
}

/// Writes a configuration file into `dir`.
#[allow(dead_code)]
pub fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub addr: String,
}

impl Settings for Server {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![Field::value("addr", &mut self.addr)
            .env("SERVER_ADDR")
            .default("localhost:8080")]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Postgres {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
}

impl Postgres {
    #[allow(dead_code)]
    pub fn new(host: &str, port: &str, user: &str, password: &str) -> Self {
        Self {
            host: host.to_string(),
            port: port.to_string(),
            user: user.to_string(),
            password: password.to_string(),
        }
    }
}

impl Settings for Postgres {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::value("host", &mut self.host)
                .env("POSTGRES_HOST")
                .default("localhost"),
            Field::value("port", &mut self.port)
                .env("POSTGRES_PORT")
                .default("5432"),
            Field::value("user", &mut self.user)
                .env("POSTGRES_USER")
                .default("postgres"),
            Field::value("password", &mut self.password)
                .env("POSTGRES_PASSWORD")
                .default("12345"),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Redis {
    pub addrs: Vec<String>,
}

impl Settings for Redis {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![Field::value("addrs", &mut self.addrs)
            .env("REDIS_ADDR")
            .default("localhost:6379")]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nats {
    pub server_url: String,
    pub max_reconnection_attempts: i32,
    pub reconnect_interval: Duration,
}

impl Settings for Nats {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::value("server_url", &mut self.server_url)
                .env("NATS_SERVER_URL")
                .default("nats://localhost:4222"),
            Field::value("max_reconnection_attempts", &mut self.max_reconnection_attempts)
                .env("NATS_MAX_RECONNECT_ATTEMPTS")
                .default("5"),
            Field::value("reconnect_interval", &mut self.reconnect_interval)
                .env("NATS_RECONNECT_INTERVAL")
                .default("2s"),
        ]
    }
}

/// A service configuration exercising every kind of field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub version: String,
    pub server: Server,
    pub postgres: Postgres,
    pub replicas: Vec<Postgres>,
    pub redis: Redis,
    pub nats: Nats,
}

impl Settings for ServiceConfig {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::value("version", &mut self.version)
                .env("VERSION")
                .default("0"),
            Field::nested("server", &mut self.server),
            Field::nested("postgres", &mut self.postgres),
            Field::sections("replicas", &mut self.replicas).env_prefix("REPLICAS"),
            Field::nested("redis", &mut self.redis),
            Field::nested("nats", &mut self.nats),
        ]
    }
}

/// Section element used by the reconstruction tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payload {
    pub addr: String,
    pub addr_renamed: String,
    pub timeout: std::time::Duration,
}

impl Payload {
    #[allow(dead_code)]
    pub fn new(addr: &str, addr_renamed: &str, timeout_secs: u64) -> Self {
        Self {
            addr: addr.to_string(),
            addr_renamed: addr_renamed.to_string(),
            timeout: std::time::Duration::from_secs(timeout_secs),
        }
    }
}

impl Settings for Payload {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::value("addr", &mut self.addr)
                .env("ADDR")
                .default("0.0.0.0"),
            Field::value("addr_renamed", &mut self.addr_renamed).env("HOST"),
            Field::value("timeout", &mut self.timeout).env("TIMEOUT"),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub payload: Vec<Payload>,
    pub payload_opt: Option<Vec<Payload>>,
}

impl Settings for Configuration {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::sections("payload", &mut self.payload).env_prefix("APP"),
            Field::sections("payload_opt", &mut self.payload_opt).env_prefix("APP"),
        ]
    }
}
