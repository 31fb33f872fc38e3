//! Coercion of text literals into typed field values.
//!
//! Every leaf type the loader can populate implements [`FieldValue`]. The
//! rules are deliberately small:
//!
//! - strings and paths are assigned as-is;
//! - `Vec<String>` splits on `,`; other lists and string maps are left
//!   untouched;
//! - integers parse base-10 through 64 bits, then narrow;
//! - booleans are true only for `"1"` or a case-insensitive `"true"`;
//! - timestamps use RFC 3339;
//! - durations use the short-unit grammar of [`crate::duration`];
//! - `Option<T>` allocates the inner value on write.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};

use crate::duration::{parse_duration, Duration};
use crate::error::{Error, Result};

/// A leaf value that can be set from a text literal.
pub trait FieldValue {
    /// Parses `raw` and stores the result.
    ///
    /// # Errors
    ///
    /// Returns a parse error carrying `raw` and the target type name when
    /// the literal does not fit the type.
    fn coerce(&mut self, raw: &str) -> Result<()>;

    /// Returns true when the value is its type's empty value.
    fn is_zero(&self) -> bool;
}

/// Interprets a flag literal.
///
/// # Examples
///
/// ```
/// use layercfg::field::value::is_true;
///
/// assert!(is_true("1"));
/// assert!(is_true("TRUE"));
/// assert!(!is_true("yes"));
/// assert!(!is_true(""));
/// ```
#[must_use]
pub fn is_true(raw: &str) -> bool {
    raw == "1" || raw.eq_ignore_ascii_case("true")
}

impl FieldValue for String {
    fn coerce(&mut self, raw: &str) -> Result<()> {
        raw.clone_into(self);
        Ok(())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for PathBuf {
    fn coerce(&mut self, raw: &str) -> Result<()> {
        *self = PathBuf::from(raw);
        Ok(())
    }

    fn is_zero(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl FieldValue for bool {
    fn coerce(&mut self, raw: &str) -> Result<()> {
        *self = is_true(raw);
        Ok(())
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

macro_rules! signed_value {
    ($($ty:ty),*) => {$(
        impl FieldValue for $ty {
            fn coerce(&mut self, raw: &str) -> Result<()> {
                let error = || Error::IntegerParse {
                    value: raw.to_string(),
                    type_name: stringify!($ty),
                };
                let wide: i64 = raw.parse().map_err(|_| error())?;
                *self = <$ty>::try_from(wide).map_err(|_| error())?;
                Ok(())
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }
        }
    )*};
}

macro_rules! unsigned_value {
    ($($ty:ty),*) => {$(
        impl FieldValue for $ty {
            fn coerce(&mut self, raw: &str) -> Result<()> {
                let error = || Error::UnsignedParse {
                    value: raw.to_string(),
                    type_name: stringify!($ty),
                };
                let wide: u64 = raw.parse().map_err(|_| error())?;
                *self = <$ty>::try_from(wide).map_err(|_| error())?;
                Ok(())
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }
        }
    )*};
}

macro_rules! float_value {
    ($($ty:ty),*) => {$(
        impl FieldValue for $ty {
            fn coerce(&mut self, raw: &str) -> Result<()> {
                *self = raw.parse().map_err(|_| Error::FloatParse {
                    value: raw.to_string(),
                    type_name: stringify!($ty),
                })?;
                Ok(())
            }

            fn is_zero(&self) -> bool {
                self.to_bits() == 0
            }
        }
    )*};
}

signed_value!(i8, i16, i32, i64, isize);
unsigned_value!(u8, u16, u32, u64, usize);
float_value!(f32, f64);

impl FieldValue for Vec<String> {
    fn coerce(&mut self, raw: &str) -> Result<()> {
        *self = raw.split(',').map(str::to_string).collect();
        Ok(())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

// Lists of anything but strings have no text form; coercion leaves them be.
macro_rules! opaque_list {
    ($($ty:ty),*) => {$(
        impl FieldValue for Vec<$ty> {
            fn coerce(&mut self, _raw: &str) -> Result<()> {
                Ok(())
            }

            fn is_zero(&self) -> bool {
                self.is_empty()
            }
        }
    )*};
}

opaque_list!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool);

impl FieldValue for HashMap<String, String> {
    fn coerce(&mut self, _raw: &str) -> Result<()> {
        Ok(())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for BTreeMap<String, String> {
    fn coerce(&mut self, _raw: &str) -> Result<()> {
        Ok(())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for DateTime<Utc> {
    fn coerce(&mut self, raw: &str) -> Result<()> {
        let parsed = DateTime::parse_from_rfc3339(raw).map_err(|_| Error::TimeParse {
            value: raw.to_string(),
            type_name: "DateTime<Utc>",
        })?;
        *self = parsed.with_timezone(&Utc);
        Ok(())
    }

    fn is_zero(&self) -> bool {
        self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
    }
}

impl FieldValue for DateTime<FixedOffset> {
    fn coerce(&mut self, raw: &str) -> Result<()> {
        *self = DateTime::parse_from_rfc3339(raw).map_err(|_| Error::TimeParse {
            value: raw.to_string(),
            type_name: "DateTime<FixedOffset>",
        })?;
        Ok(())
    }

    fn is_zero(&self) -> bool {
        self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
    }
}

impl FieldValue for Duration {
    fn coerce(&mut self, raw: &str) -> Result<()> {
        *self = raw.parse().map_err(|_| Error::DurationParse {
            value: raw.to_string(),
            type_name: "Duration",
        })?;
        Ok(())
    }

    fn is_zero(&self) -> bool {
        Duration::is_zero(*self)
    }
}

impl FieldValue for std::time::Duration {
    fn coerce(&mut self, raw: &str) -> Result<()> {
        let error = || Error::DurationParse {
            value: raw.to_string(),
            type_name: "std::time::Duration",
        };
        let nanos = parse_duration(raw).map_err(|_| error())?;
        let nanos = u64::try_from(nanos).map_err(|_| error())?;
        *self = std::time::Duration::from_nanos(nanos);
        Ok(())
    }

    fn is_zero(&self) -> bool {
        std::time::Duration::is_zero(self)
    }
}

impl<T: FieldValue + Default> FieldValue for Option<T> {
    fn coerce(&mut self, raw: &str) -> Result<()> {
        let mut inner = T::default();
        inner.coerce(raw)?;
        *self = Some(inner);
        Ok(())
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}
