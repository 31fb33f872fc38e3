//! Required field validation.

use crate::config::walker::{walk, Visitor};
use crate::error::{Error, Result};
use crate::field::{FieldSpec, Settings, Slot};

/// Checks that every field marked required holds a value.
///
/// Violations are collected over the whole tree and reported together,
/// by declared field name.
///
/// # Errors
///
/// Returns [`Error::Validation`] listing every required field left empty.
///
/// # Examples
///
/// ```
/// use layercfg::{validate, Field, Settings};
///
/// #[derive(Default)]
/// struct Postgres {
///     user: String,
///     password: String,
/// }
///
/// impl Settings for Postgres {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::value("user", &mut self.user).required(),
///             Field::value("password", &mut self.password).required(),
///         ]
///     }
/// }
///
/// let err = validate(&mut Postgres::default()).unwrap_err();
/// assert_eq!(err.missing_fields().unwrap(), ["user", "password"]);
/// ```
pub fn validate<T: Settings>(settings: &mut T) -> Result<()> {
    let mut validator = RequiredValidator::default();
    walk(settings, &mut validator)?;

    if validator.missing.is_empty() {
        return Ok(());
    }
    log::debug!("Required fields missing: {:?}", validator.missing);
    Err(Error::Validation {
        fields: validator.missing,
    })
}

/// Visitor collecting required fields that are still empty.
#[derive(Default)]
pub(crate) struct RequiredValidator {
    missing: Vec<String>,
}

impl Visitor for RequiredValidator {
    fn visit(&mut self, spec: &FieldSpec, slot: Slot<'_>) -> Result<()> {
        if !spec.required {
            return Ok(());
        }
        let empty = match slot {
            Slot::Value(value) => value.is_zero(),
            Slot::List(list) => list.is_zero(),
            Slot::Nested(_) => false,
        };
        if empty {
            self.missing.push(spec.name.to_string());
        }
        Ok(())
    }
}
