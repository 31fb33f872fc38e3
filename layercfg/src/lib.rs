#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # layercfg
//!
//! Struct-driven configuration loading.
//!
//! A configuration type lists its fields once, with their default
//! literal, overriding environment variable and required flag. The
//! library then populates it from defaults, an optional JSON or YAML file
//! and the environment, and checks that required fields were filled.
//!
//! ## Core Types
//!
//! - [`Settings`] and [`Field`]: field descriptors for a configuration type
//! - [`FieldValue`]: leaf types coercible from text
//! - [`ConfigBuilder`] and [`init`]: the layered loading pipeline
//! - [`EnvSource`] and [`EnvSnapshot`]: environment access
//! - [`Duration`]: a signed duration with a textual interchange format
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use layercfg::{ConfigBuilder, EnvSnapshot, Field, Settings};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Postgres {
//!     host: String,
//!     user: String,
//! }
//!
//! impl Settings for Postgres {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::value("host", &mut self.host).env("POSTGRES_HOST").default("localhost"),
//!             Field::value("user", &mut self.user).env("POSTGRES_USER").required(),
//!         ]
//!     }
//! }
//!
//! let env = EnvSnapshot::new().with("POSTGRES_USER", "postgres");
//! let postgres: Postgres = ConfigBuilder::new().with_env(env).build().unwrap();
//! assert_eq!(postgres.host, "localhost");
//! assert_eq!(postgres.user, "postgres");
//! ```

pub mod config;
pub mod duration;
pub mod error;
pub mod field;
pub mod logging;

// Re-export key types at crate root for convenience
pub use config::{
    apply_env, describe, fill_defaults, init, set_var, unset_var, validate, ConfigBuilder,
    EnvGuard, EnvSnapshot, EnvSource, FieldInfo, ProcessEnv,
};
pub use duration::{Duration, ParseDurationError};
pub use error::{Error, Result};
pub use field::{Field, FieldSpec, FieldValue, SectionList, Settings, Slot};
pub use logging::{init_logger, LogLevel, Logger};
