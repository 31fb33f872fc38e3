//! Section lists rebuilt from indexed environment variables.
//!
//! A list of configuration structures annotated with a prefix, say `APP`,
//! is merged with every variable of the shape `APP_<index>_<TOKEN>`:
//!
//! ```text
//! APP_0_ADDR=localhost
//! APP_0_TIMEOUT=1m
//! APP_1_TIMEOUT=2m
//! ```
//!
//! Existing elements keep their position and receive the overrides for
//! their index; indices past the end create new elements, starting from
//! the element type's defaults. The result is assembled in ascending
//! index order, with gaps dropped.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use regex::Regex;

use crate::config::defaults::fill_defaults;
use crate::config::environment::EnvSource;
use crate::error::{Error, Result};
use crate::field::{FieldSpec, SectionList, Settings, Slot};

impl<T: Settings + Default + Clone> SectionList for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn apply_env(&mut self, prefix: &str, env: &dyn EnvSource) -> Result<()> {
        if let Some(rebuilt) = reconstruct(prefix, Some(self.as_slice()), env)? {
            *self = rebuilt;
        }
        Ok(())
    }

    fn element_specs(&self) -> Vec<FieldSpec> {
        element_specs::<T>()
    }
}

impl<T: Settings + Default + Clone> SectionList for Option<Vec<T>> {
    fn is_zero(&self) -> bool {
        self.as_ref().map_or(true, Vec::is_empty)
    }

    fn apply_env(&mut self, prefix: &str, env: &dyn EnvSource) -> Result<()> {
        if let Some(rebuilt) = reconstruct(prefix, self.as_deref(), env)? {
            *self = Some(rebuilt);
        }
        Ok(())
    }

    fn element_specs(&self) -> Vec<FieldSpec> {
        element_specs::<T>()
    }
}

fn element_specs<T: Settings + Default>() -> Vec<FieldSpec> {
    let mut element = T::default();
    let specs = element.fields().into_iter().map(|field| field.spec).collect();
    specs
}

/// Merges the `<prefix>_<index>_<TOKEN>` variables of `env` into
/// `existing`.
///
/// Returns `None` when there is nothing to assemble: no existing element
/// and no matching variable. The caller then leaves its field alone.
pub(crate) fn reconstruct<T>(
    prefix: &str,
    existing: Option<&[T]>,
    env: &dyn EnvSource,
) -> Result<Option<Vec<T>>>
where
    T: Settings + Default + Clone,
{
    if prefix.is_empty() {
        return Err(Error::PrefixRequired);
    }

    let mut elements: BTreeMap<usize, T> = BTreeMap::new();
    for (index, element) in existing.unwrap_or_default().iter().enumerate() {
        let mut element = element.clone();
        fill_defaults(&mut element)?;
        elements.insert(index, element);
    }

    let pattern = Regex::new(&format!(
        "^{}_([0-9]+)_([0-9A-Za-z_]+)$",
        regex::escape(prefix)
    ))?;

    for (key, value) in env.vars() {
        if value.is_empty() {
            continue;
        }
        let Some(captures) = pattern.captures(&key) else {
            continue;
        };

        let index_text = &captures[1];
        let index: usize = index_text.parse().map_err(|source| Error::IndexParse {
            key: key.clone(),
            index: index_text.to_string(),
            source,
        })?;

        let element = match elements.entry(index) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let mut fresh = T::default();
                fill_defaults(&mut fresh)?;
                entry.insert(fresh)
            }
        };

        log::debug!("Applying {key} to element {index} of {prefix} sections");
        set_token(element, &captures[2], &value)?;
    }

    if elements.is_empty() {
        return Ok(None);
    }
    Ok(Some(elements.into_values().collect()))
}

/// Writes `raw` into the field of `element` named by `token`.
///
/// The token matches a field's `env` annotation exactly, or else the
/// field's name once lower-cased.
fn set_token(element: &mut dyn Settings, token: &str, raw: &str) -> Result<()> {
    let derived = token.to_lowercase();
    let mut fields = element.fields();

    let position = fields
        .iter()
        .position(|field| field.spec.env == Some(token))
        .or_else(|| fields.iter().position(|field| field.spec.name == derived));
    let Some(position) = position else {
        return Err(Error::FieldNotFound { name: derived });
    };

    let field = fields.swap_remove(position);
    match field.slot {
        Slot::Value(value) => value.coerce(raw),
        Slot::Nested(_) | Slot::List(_) => {
            log::warn!(
                "Ignoring {token}: field {} is not a single value",
                field.spec.name
            );
            Ok(())
        }
    }
}
