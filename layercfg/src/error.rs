//! Error types for the layercfg library.
//!
//! This module provides a single error hierarchy for every loading pass
//! (defaults, configuration file, environment, validation), using
//! `thiserror` for ergonomic error handling.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a layercfg error.
///
/// # Examples
///
/// ```
/// use layercfg::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the layercfg library.
///
/// Every error aborts the pass that produced it. Coercion errors always
/// carry the offending literal and the name of the target type so that
/// operators can fix their input without reading source code.
#[derive(Debug, Error)]
pub enum Error {
    /// A section list was annotated with an empty environment prefix.
    #[error("prefix is required")]
    PrefixRequired,

    /// An indexed environment variable carried an index that does not fit
    /// in `usize`.
    #[error("failed to parse index {index:?} of environment variable {key}: {source}")]
    IndexParse {
        /// The full environment variable name.
        key: String,
        /// The index segment of the name.
        index: String,
        /// The underlying integer parse error.
        #[source]
        source: ParseIntError,
    },

    /// An indexed environment variable named a field that the section
    /// element does not have.
    #[error("field {name} not found")]
    FieldNotFound {
        /// The field name derived from the variable's token.
        name: String,
    },

    /// The matcher for indexed environment variables could not be built.
    #[error("invalid environment key pattern: {0}")]
    KeyPattern(#[from] regex::Error),

    /// A literal could not be parsed as a signed integer.
    #[error("failed to parse value {value:?} as {type_name} type")]
    IntegerParse {
        /// The offending literal.
        value: String,
        /// The target type.
        type_name: &'static str,
    },

    /// A literal could not be parsed as an unsigned integer.
    #[error("failed to parse value {value:?} as {type_name} type")]
    UnsignedParse {
        /// The offending literal.
        value: String,
        /// The target type.
        type_name: &'static str,
    },

    /// A literal could not be parsed as a floating point number.
    #[error("failed to parse value {value:?} as {type_name} type")]
    FloatParse {
        /// The offending literal.
        value: String,
        /// The target type.
        type_name: &'static str,
    },

    /// A literal could not be parsed as an RFC 3339 timestamp.
    #[error("failed to parse value {value:?} as {type_name} type")]
    TimeParse {
        /// The offending literal.
        value: String,
        /// The target type.
        type_name: &'static str,
    },

    /// A literal could not be parsed as a duration.
    #[error("failed to parse value {value:?} as {type_name} type")]
    DurationParse {
        /// The offending literal.
        value: String,
        /// The target type.
        type_name: &'static str,
    },

    /// An environment variable name cannot be written to the process
    /// environment.
    #[error("invalid environment variable name {key:?}")]
    InvalidEnvKey {
        /// The rejected name.
        key: String,
    },

    /// The configuration file could not be opened or read.
    #[error("open {}: {source}", path.display())]
    Io {
        /// The configuration file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON, or does not fit the
    /// configuration type.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file is not valid YAML.
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    /// One or more required fields are still empty after loading.
    #[error("required fields: [{}] are not filled up. Please check configuration", fields.join(", "))]
    Validation {
        /// Declared names of every required field left empty.
        fields: Vec<String>,
    },
}

impl Error {
    /// Check if error is an aggregate validation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::Error;
    ///
    /// let err = Error::Validation { fields: vec!["user".to_string()] };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Names of the required fields left empty, if this is a validation
    /// failure.
    #[must_use]
    pub fn missing_fields(&self) -> Option<&[String]> {
        match self {
            Self::Validation { fields } => Some(fields),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_parse_error() {
        let err = Error::IntegerParse {
            value: "age".to_string(),
            type_name: "i64",
        };
        assert_eq!(err.to_string(), r#"failed to parse value "age" as i64 type"#);
    }

    #[test]
    fn test_unsigned_parse_error() {
        let err = Error::UnsignedParse {
            value: "1.0".to_string(),
            type_name: "u64",
        };
        assert_eq!(err.to_string(), r#"failed to parse value "1.0" as u64 type"#);
    }

    #[test]
    fn test_duration_errors_are_distinguishable() {
        let custom = Error::DurationParse {
            value: "soon".to_string(),
            type_name: "Duration",
        };
        let standard = Error::DurationParse {
            value: "soon".to_string(),
            type_name: "std::time::Duration",
        };
        assert_ne!(custom.to_string(), standard.to_string());
        assert!(standard.to_string().contains("std::time::Duration"));
    }

    #[test]
    fn test_field_not_found_error() {
        let err = Error::FieldNotFound {
            name: "addr_renamed".to_string(),
        };
        assert_eq!(err.to_string(), "field addr_renamed not found");
    }

    #[test]
    fn test_index_parse_error() {
        let source = "99999999999999999999999".parse::<usize>().unwrap_err();
        let err = Error::IndexParse {
            key: "APP_99999999999999999999999_ADDR".to_string(),
            index: "99999999999999999999999".to_string(),
            source,
        };
        let display = err.to_string();
        assert!(display.contains("APP_99999999999999999999999_ADDR"));
        assert!(display.contains("failed to parse index"));
    }

    #[test]
    fn test_io_error_display() {
        let err = Error::Io {
            path: PathBuf::from("config.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "open config.json: No such file or directory");
    }

    #[test]
    fn test_validation_error_lists_every_field() {
        let err = Error::Validation {
            fields: vec!["user".to_string(), "password".to_string()],
        };
        let display = err.to_string();
        assert!(display.contains("[user, password]"));
        assert!(display.contains("not filled up"));
        assert_eq!(
            err.missing_fields(),
            Some(&["user".to_string(), "password".to_string()][..])
        );
    }

    #[test]
    fn test_missing_fields_on_other_errors() {
        assert!(Error::PrefixRequired.missing_fields().is_none());
        assert!(!Error::PrefixRequired.is_validation());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u16> {
            Err(Error::PrefixRequired)
        }

        assert!(returns_result().is_err());
    }
}
