//! Service configuration inspected by the CLI.
//!
//! A typical backend service: an HTTP server, a primary database with any
//! number of read replicas, a Redis cluster, a NATS connection and a
//! websocket endpoint.

use layercfg::{Duration, Field, Settings};
use serde::{Deserialize, Serialize};

/// HTTP server settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    /// Listen address.
    pub addr: String,
    /// Request read timeout.
    pub read_timeout: Duration,
    /// Response write timeout.
    pub write_timeout: Duration,
}

impl Settings for Server {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::value("addr", &mut self.addr)
                .env("SERVER_ADDR")
                .default("localhost:8080"),
            Field::value("read_timeout", &mut self.read_timeout)
                .env("READ_TIMEOUT")
                .default("1s"),
            Field::value("write_timeout", &mut self.write_timeout)
                .env("WRITE_TIMEOUT")
                .default("10s"),
        ]
    }
}

/// Postgres connection settings, used for the primary and each replica.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Postgres {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
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
                .required(),
        ]
    }
}

/// Redis cluster settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Redis {
    /// Node addresses.
    pub addrs: Vec<String>,
}

impl Settings for Redis {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![Field::value("addrs", &mut self.addrs)
            .env("REDIS_ADDR")
            .default("localhost:6379")]
    }
}

/// NATS connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nats {
    /// Server URL.
    pub server_url: String,
    /// Reconnection attempts before giving up.
    pub max_reconnection_attempts: i32,
    /// Delay between reconnection attempts.
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

/// Websocket endpoint settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Websocket {
    /// Listen port.
    pub port: u16,
}

impl Settings for Websocket {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![Field::value("port", &mut self.port)
            .env("WEBSOCKET_PORT")
            .default("9876")]
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Deployed version.
    pub version: String,
    /// HTTP server.
    pub server: Server,
    /// Primary database.
    pub postgres: Postgres,
    /// Read replicas, rebuilt from `REPLICAS_<n>_*` variables.
    pub replicas: Vec<Postgres>,
    /// Redis cluster.
    pub redis: Redis,
    /// NATS connection.
    pub nats: Nats,
    /// Websocket endpoint.
    pub websocket: Websocket,
}

impl Settings for ServiceSettings {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::value("version", &mut self.version)
                .env("VERSION")
                .default("0")
                .required(),
            Field::nested("server", &mut self.server),
            Field::nested("postgres", &mut self.postgres),
            Field::sections("replicas", &mut self.replicas).env_prefix("REPLICAS"),
            Field::nested("redis", &mut self.redis),
            Field::nested("nats", &mut self.nats),
            Field::nested("websocket", &mut self.websocket),
        ]
    }
}
