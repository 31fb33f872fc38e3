//! Environment variable handling for configuration overrides.
//!
//! The loader never reads the process environment directly: it goes
//! through an [`EnvSource`], so that tests and embedding applications can
//! hand it an isolated [`EnvSnapshot`] instead of mutating process-wide
//! state. [`ProcessEnv`] is the source backed by the real environment.

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;

use crate::config::walker::{walk, Visitor};
use crate::error::{Error, Result};
use crate::field::{FieldSpec, Settings, Slot};

/// Read access to a table of environment variables.
pub trait EnvSource {
    /// Looks up one variable.
    fn var(&self, key: &str) -> Option<String>;

    /// Lists every variable, sorted by name.
    fn vars(&self) -> Vec<(String, String)>;
}

/// The process environment.
///
/// Entries whose name or value is not valid UTF-8 are invisible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        vars.sort();
        vars
    }
}

/// An isolated, in-memory environment table.
///
/// # Examples
///
/// ```
/// use layercfg::{EnvSnapshot, EnvSource};
///
/// let env = EnvSnapshot::new()
///     .with("APP_0_ADDR", "localhost")
///     .with("APP_0_TIMEOUT", "1m");
/// assert_eq!(env.var("APP_0_ADDR").as_deref(), Some("localhost"));
/// assert_eq!(env.vars().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        ProcessEnv.vars().into_iter().collect()
    }

    /// Adds a variable, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Removes a variable, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    /// Number of variables in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true if the table holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl EnvSource for EnvSnapshot {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Sets a process environment variable.
///
/// The process environment is shared by every thread: do not call this
/// while another thread is loading configuration that reads `key`.
///
/// # Errors
///
/// Returns [`Error::InvalidEnvKey`] if `key` is empty or contains `=` or a
/// NUL byte, or if `value` contains a NUL byte.
pub fn set_var(key: &str, value: &str) -> Result<()> {
    check_key(key)?;
    if value.contains('\0') {
        return Err(Error::InvalidEnvKey {
            key: key.to_string(),
        });
    }
    env::set_var(key, value);
    Ok(())
}

/// Removes a process environment variable.
///
/// # Errors
///
/// Returns [`Error::InvalidEnvKey`] if `key` is empty or contains `=` or a
/// NUL byte.
pub fn unset_var(key: &str) -> Result<()> {
    check_key(key)?;
    env::remove_var(key);
    Ok(())
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains('=') || key.contains('\0') {
        return Err(Error::InvalidEnvKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// RAII guard for setting and restoring process environment variables.
///
/// Variables set through the guard get their previous value back (or are
/// removed) when the guard is dropped. Previous values are kept as raw OS
/// strings, so non-UTF-8 values survive the round trip.
///
/// Note: tests using the process environment should not run in parallel;
/// mark them `#[serial]`.
#[derive(Debug, Default)]
pub struct EnvGuard {
    saved: Vec<(String, Option<OsString>)>,
}

impl EnvGuard {
    /// Creates a guard that has not touched anything yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` for the guard's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnvKey`] for names the process environment
    /// cannot hold.
    pub fn set(mut self, key: &str, value: &str) -> Result<Self> {
        let previous = env::var_os(key);
        set_var(key, value)?;
        self.saved.push((key.to_string(), previous));
        Ok(self)
    }

    /// Removes `key` for the guard's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnvKey`] for names the process environment
    /// cannot hold.
    pub fn remove(mut self, key: &str) -> Result<Self> {
        let previous = env::var_os(key);
        unset_var(key)?;
        self.saved.push((key.to_string(), previous));
        Ok(self)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // restore in reverse so repeated keys end at their first saved value
        for (key, previous) in self.saved.drain(..).rev() {
            match previous {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
    }
}

/// Applies environment overrides to every annotated field.
///
/// Leaves with an `env` annotation take the variable's value when it is
/// set. Section lists with an `env_prefix` annotation are rebuilt from
/// their indexed variable family.
///
/// # Errors
///
/// Returns the first coercion or section reconstruction error.
pub fn apply_env<T: Settings>(settings: &mut T, env: &dyn EnvSource) -> Result<()> {
    walk(settings, &mut EnvFiller { env })
}

/// Visitor applying environment overrides.
pub(crate) struct EnvFiller<'e> {
    env: &'e dyn EnvSource,
}

impl Visitor for EnvFiller<'_> {
    fn visit(&mut self, spec: &FieldSpec, slot: Slot<'_>) -> Result<()> {
        match slot {
            Slot::List(list) => match spec.env_prefix {
                Some(prefix) => list.apply_env(prefix, self.env),
                None => Ok(()),
            },
            Slot::Value(value) => {
                let Some(key) = spec.env else {
                    return Ok(());
                };
                let Some(raw) = self.env.var(key) else {
                    return Ok(());
                };
                log::debug!("Applying {key} to field {}", spec.name);
                value.coerce(&raw)
            }
            Slot::Nested(_) => Ok(()),
        }
    }
}
