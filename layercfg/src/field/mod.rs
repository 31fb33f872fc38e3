//! Field descriptors for configuration types.
//!
//! A configuration type describes itself by implementing [`Settings`]:
//! it hands out one [`Field`] per struct field, in declaration order,
//! pairing the field's metadata ([`FieldSpec`]) with a mutable slot the
//! loading passes write through.
//!
//! # Examples
//!
//! ```
//! use layercfg::{Duration, Field, Settings};
//!
//! #[derive(Debug, Clone, Default)]
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
//! #[derive(Debug, Default)]
//! struct Configuration {
//!     payloads: Vec<Payload>,
//! }
//!
//! impl Settings for Configuration {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![Field::sections("payloads", &mut self.payloads).env_prefix("APP")]
//!     }
//! }
//! ```

pub mod value;

pub use value::FieldValue;

use crate::config::environment::EnvSource;
use crate::error::Result;

/// Metadata attached to one configuration field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSpec {
    /// Declared field name, as written in the struct.
    pub name: &'static str,
    /// Literal applied when the field is still empty after construction.
    pub default: Option<&'static str>,
    /// Environment variable overriding the field.
    pub env: Option<&'static str>,
    /// Prefix of the indexed variable family rebuilding a section list.
    pub env_prefix: Option<&'static str>,
    /// Whether the field must be non-empty once loading finishes.
    pub required: bool,
}

/// Mutable access to a field's storage, by kind.
pub enum Slot<'a> {
    /// A leaf value coerced from text.
    Value(&'a mut dyn FieldValue),
    /// A nested configuration structure.
    Nested(&'a mut dyn Settings),
    /// A list of configuration structures.
    List(&'a mut dyn SectionList),
}

/// A field descriptor paired with its storage.
pub struct Field<'a> {
    /// The field's metadata.
    pub spec: FieldSpec,
    /// The field's storage.
    pub slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// Describes a leaf field.
    #[must_use]
    pub fn value(name: &'static str, value: &'a mut dyn FieldValue) -> Self {
        Self::new(name, Slot::Value(value))
    }

    /// Describes a nested configuration structure.
    #[must_use]
    pub fn nested(name: &'static str, settings: &'a mut dyn Settings) -> Self {
        Self::new(name, Slot::Nested(settings))
    }

    /// Describes a list of configuration structures.
    #[must_use]
    pub fn sections(name: &'static str, list: &'a mut dyn SectionList) -> Self {
        Self::new(name, Slot::List(list))
    }

    fn new(name: &'static str, slot: Slot<'a>) -> Self {
        Self {
            spec: FieldSpec {
                name,
                ..FieldSpec::default()
            },
            slot,
        }
    }

    /// Sets the default literal.
    #[must_use]
    pub fn default(mut self, literal: &'static str) -> Self {
        self.spec.default = Some(literal);
        self
    }

    /// Sets the overriding environment variable.
    #[must_use]
    pub fn env(mut self, key: &'static str) -> Self {
        self.spec.env = Some(key);
        self
    }

    /// Sets the prefix of the indexed variables rebuilding a section list.
    #[must_use]
    pub fn env_prefix(mut self, prefix: &'static str) -> Self {
        self.spec.env_prefix = Some(prefix);
        self
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.spec.required = true;
        self
    }
}

/// A configuration structure the loader can populate.
///
/// Implementations return every field, in declaration order. Field names
/// must be the struct's own field names: indexed environment variables
/// fall back to them when no field declares the variable's token.
pub trait Settings {
    /// Describes the structure's fields.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// A list of configuration structures, rebuilt from indexed environment
/// variables.
///
/// Implemented for `Vec<T>` and `Option<Vec<T>>`.
pub trait SectionList {
    /// Returns true when the list is absent or empty.
    fn is_zero(&self) -> bool;

    /// Merges `<prefix>_<index>_<FIELD>` variables into the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is empty, an index does not parse,
    /// a token names no field, or a value fails coercion.
    fn apply_env(&mut self, prefix: &str, env: &dyn EnvSource) -> Result<()>;

    /// Describes the fields of one list element.
    fn element_specs(&self) -> Vec<FieldSpec>;
}
