//! Configuration loading passes.
//!
//! A configuration type implementing [`Settings`](crate::field::Settings)
//! is populated from the following sources, in increasing priority:
//!
//! 1. Default literals declared on its fields
//! 2. A JSON or YAML configuration file
//! 3. Environment variables: one per annotated field, plus the indexed
//!    `<PREFIX>_<index>_<FIELD>` family for section lists
//!
//! Required fields are checked once every source has been applied, and all
//! violations are reported together.
//!
//! # Examples
//!
//! Loading with an isolated environment:
//!
//! ```
//! use layercfg::config::{ConfigBuilder, EnvSnapshot};
//! use layercfg::{Duration, Field, Settings};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! struct Payload {
//!     addr: String,
//!     timeout: Duration,
//! }
//!
//! impl Settings for Payload {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::value("addr", &mut self.addr).env("ADDR").default("0.0.0.0"),
//!             Field::value("timeout", &mut self.timeout).env("TIMEOUT"),
//!         ]
//!     }
//! }
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Configuration {
//!     payloads: Vec<Payload>,
//! }
//!
//! impl Settings for Configuration {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![Field::sections("payloads", &mut self.payloads).env_prefix("APP")]
//!     }
//! }
//!
//! let env = EnvSnapshot::new()
//!     .with("APP_0_ADDR", "localhost")
//!     .with("APP_0_TIMEOUT", "1m")
//!     .with("APP_1_TIMEOUT", "2m");
//!
//! let config: Configuration = ConfigBuilder::new().with_env(env).build().unwrap();
//! assert_eq!(config.payloads.len(), 2);
//! assert_eq!(config.payloads[0].addr, "localhost");
//! assert_eq!(config.payloads[1].addr, "0.0.0.0");
//! assert_eq!(config.payloads[1].timeout, Duration::from_mins(2));
//! ```

pub mod builder;
pub mod defaults;
pub mod describe;
pub mod environment;
pub mod loader;
mod sections;
pub mod validator;
pub mod walker;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::{init, ConfigBuilder};
pub use defaults::fill_defaults;
pub use describe::{describe, FieldInfo};
pub use environment::{apply_env, set_var, unset_var, EnvGuard, EnvSnapshot, EnvSource, ProcessEnv};
pub use loader::ConfigLoader;
pub use validator::validate;
pub use walker::{walk, Visitor};
