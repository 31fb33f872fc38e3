//! Layered configuration loading.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::defaults::fill_defaults;
use crate::config::environment::{apply_env, EnvSource, ProcessEnv};
use crate::config::loader::ConfigLoader;
use crate::config::validator::validate;
use crate::error::Result;
use crate::field::Settings;

/// Builder for loading a configuration from its layered sources.
///
/// Sources apply in increasing priority:
///
/// 1. Default literals on the fields
/// 2. The configuration file, if one is given
/// 3. Environment variables, including indexed section variables
///
/// Required fields are checked last.
///
/// # Examples
///
/// ```
/// use layercfg::{ConfigBuilder, EnvSnapshot, Field, Settings};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct Server {
///     addr: String,
/// }
///
/// impl Settings for Server {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![Field::value("addr", &mut self.addr)
///             .env("SERVER_ADDR")
///             .default("localhost:8080")
///             .required()]
///     }
/// }
///
/// let server: Server = ConfigBuilder::new()
///     .with_env(EnvSnapshot::new().with("SERVER_ADDR", "0.0.0.0:80"))
///     .build()
///     .unwrap();
/// assert_eq!(server.addr, "0.0.0.0:80");
/// ```
#[derive(Default)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
    env: Option<Box<dyn EnvSource>>,
    skip_env: bool,
    skip_validation: bool,
}

impl ConfigBuilder {
    /// Creates a builder reading the process environment and no file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the given configuration file. An empty path loads nothing.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.file = (!path.as_os_str().is_empty()).then(|| path.to_path_buf());
        self
    }

    /// Reads environment variables from `env` instead of the process.
    #[must_use]
    pub fn with_env(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Some(Box::new(env));
        self
    }

    /// Skip environment variable overrides.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skip the required field check.
    #[must_use]
    pub fn skip_validation(mut self) -> Self {
        self.skip_validation = true;
        self
    }

    /// Populates an existing configuration in place.
    ///
    /// Values already present in `config` count as set: default literals
    /// do not replace them, but the file and the environment do.
    ///
    /// # Errors
    ///
    /// Returns the first error of any pass. Passes before the failing one
    /// have already written to `config`.
    pub fn load_into<T>(&self, config: &mut T) -> Result<()>
    where
        T: Settings + Serialize + DeserializeOwned,
    {
        fill_defaults(config)?;

        if let Some(path) = &self.file {
            ConfigLoader::merge_file(config, path)?;
        }

        if !self.skip_env {
            match &self.env {
                Some(env) => apply_env(config, &**env)?,
                None => apply_env(config, &ProcessEnv)?,
            }
        }

        if !self.skip_validation {
            validate(config)?;
        }

        log::info!(
            "Configuration loaded (file: {})",
            self.file
                .as_deref()
                .map_or_else(|| "none".to_string(), |path| path.display().to_string())
        );
        Ok(())
    }

    /// Builds a configuration starting from `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns the first error of any pass.
    pub fn build<T>(&self) -> Result<T>
    where
        T: Settings + Default + Serialize + DeserializeOwned,
    {
        let mut config = T::default();
        self.load_into(&mut config)?;
        Ok(config)
    }
}

impl fmt::Debug for ConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigBuilder")
            .field("file", &self.file)
            .field("custom_env", &self.env.is_some())
            .field("skip_env", &self.skip_env)
            .field("skip_validation", &self.skip_validation)
            .finish()
    }
}

/// Populates `config` from defaults, the JSON or YAML file at `path` and
/// the process environment, then checks required fields.
///
/// An empty `path` skips the file.
///
/// # Errors
///
/// Returns the first coercion, file, or reconstruction error, or a
/// [`crate::Error::Validation`] naming every required field left empty.
///
/// # Examples
///
/// ```no_run
/// use layercfg::{init, Field, Settings};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct Config {
///     version: String,
/// }
///
/// impl Settings for Config {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![Field::value("version", &mut self.version).env("VERSION").required()]
///     }
/// }
///
/// let mut config = Config::default();
/// init(&mut config, "config.json").unwrap();
/// ```
pub fn init<T>(config: &mut T, path: impl AsRef<Path>) -> Result<()>
where
    T: Settings + Serialize + DeserializeOwned,
{
    ConfigBuilder::new().with_file(path).load_into(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::EnvSnapshot;
    use crate::duration::Duration;
    use crate::error::Error;
    use crate::field::Field;
    use serde::Deserialize;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Node {
        host: String,
        timeout: Duration,
    }

    impl Settings for Node {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::value("host", &mut self.host).env("HOST").default("localhost"),
                Field::value("timeout", &mut self.timeout).env("TIMEOUT").default("5s"),
            ]
        }
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Service {
        name: String,
        workers: u32,
        nodes: Vec<Node>,
    }

    impl Settings for Service {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::value("name", &mut self.name).env("SERVICE_NAME").required(),
                Field::value("workers", &mut self.workers)
                    .env("SERVICE_WORKERS")
                    .default("4"),
                Field::sections("nodes", &mut self.nodes).env_prefix("NODES"),
            ]
        }
    }

    #[test]
    fn test_defaults_only() {
        let service: Service = ConfigBuilder::new()
            .skip_env()
            .skip_validation()
            .build()
            .unwrap();
        assert_eq!(service.workers, 4);
        assert!(service.nodes.is_empty());
    }

    #[test]
    fn test_env_overrides_file_overrides_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("service.json");
        fs::write(
            &path,
            r#"{"name": "from-file", "workers": 8, "nodes": [{"host": "db1", "timeout": "1s"}]}"#,
        )
        .unwrap();

        let env = EnvSnapshot::new()
            .with("SERVICE_NAME", "from-env")
            .with("NODES_1_HOST", "db2");
        let service: Service = ConfigBuilder::new()
            .with_file(&path)
            .with_env(env)
            .build()
            .unwrap();

        assert_eq!(service.name, "from-env");
        assert_eq!(service.workers, 8);
        assert_eq!(
            service.nodes,
            vec![
                Node {
                    host: "db1".to_string(),
                    timeout: Duration::from_secs(1),
                },
                Node {
                    host: "db2".to_string(),
                    timeout: Duration::from_secs(5),
                },
            ]
        );
    }

    #[test]
    fn test_validation_runs_last() {
        let err = ConfigBuilder::new()
            .with_env(EnvSnapshot::new())
            .build::<Service>()
            .unwrap_err();
        assert_eq!(err.missing_fields().unwrap(), ["name"]);
    }

    #[test]
    fn test_empty_path_skips_file() {
        let builder = ConfigBuilder::new().with_file("");
        let service: Service = builder
            .with_env(EnvSnapshot::new().with("SERVICE_NAME", "api"))
            .build()
            .unwrap();
        assert_eq!(service.name, "api");
    }

    #[test]
    fn test_missing_file_fails() {
        let err = ConfigBuilder::new()
            .with_file("/nonexistent/service.json")
            .with_env(EnvSnapshot::new())
            .build::<Service>()
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
