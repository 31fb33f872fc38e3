//! Configuration file loading.
//!
//! A configuration file is decoded into a document tree and merged over
//! the configuration's current state, so keys the file leaves out keep
//! their defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use layercfg::config::ConfigLoader;
/// use std::path::Path;
///
/// let document = ConfigLoader::read_document(Path::new("config.json")).unwrap();
/// println!("{document}");
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads a configuration file into a document tree.
    ///
    /// Files ending in `.yaml` or `.yml` are decoded as YAML, everything
    /// else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened, or the decoder's
    /// error if its contents are malformed.
    pub fn read_document(path: &Path) -> Result<Value> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let document = if is_yaml(path) {
            serde_yaml::from_reader(reader)?
        } else {
            serde_json::from_reader(reader)?
        };
        Ok(document)
    }

    /// Decodes the file at `path` on top of `config`.
    ///
    /// Objects merge key by key; any other value in the file replaces the
    /// current one. A `null` only replaces lists and values that are
    /// already null, so it leaves set strings, numbers, booleans and nested
    /// structures as they were.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or if the
    /// merged document does not fit `T`.
    pub fn merge_file<T>(config: &mut T, path: &Path) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let document = Self::read_document(path)?;
        let mut current = serde_json::to_value(&*config)?;
        merge_values(&mut current, document);
        *config = serde_json::from_value(current)?;

        log::debug!("Merged configuration file {}", path.display());
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Deep-merges `overlay` into `base`.
pub(crate) fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Object(_), Value::Null) => {}
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
