//! Duration values with a textual interchange format.
//!
//! [`Duration`] is a signed nanosecond count that reads and writes the
//! conventional short-unit grammar (`"10s"`, `"2m30s"`, `"1.5ms"`) both in
//! environment/default literals and in configuration files, where it is
//! serialized as a string rather than a number.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Magnitude of the most negative representable duration.
const MAX_MAGNITUDE: u64 = 1 << 63;

/// Error returned when a duration literal does not follow the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDurationError {
    /// The literal is malformed.
    #[error("invalid duration {0:?}")]
    Invalid(String),

    /// A number is not followed by a unit.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    /// A unit is not one of `ns`, `us`, `µs`, `ms`, `s`, `m`, `h`.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The unrecognized unit.
        unit: String,
        /// The whole literal.
        input: String,
    },
}

/// A signed span of time with nanosecond precision.
///
/// # Examples
///
/// ```
/// use layercfg::Duration;
///
/// let timeout: Duration = "2m30s".parse().unwrap();
/// assert_eq!(timeout, Duration::from_secs(150));
/// assert_eq!(timeout.to_string(), "2m30s");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    /// The zero duration.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Creates a duration from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis * MILLISECOND as i64)
    }

    /// Creates a duration from seconds.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs * SECOND as i64)
    }

    /// Creates a duration from minutes.
    #[must_use]
    pub const fn from_mins(mins: i64) -> Self {
        Self(mins * MINUTE as i64)
    }

    /// Returns the duration as signed nanoseconds.
    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Returns true for the zero duration.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration(self.0))
    }
}

impl FromStr for Duration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s).map(Self)
    }
}

impl From<Duration> for i64 {
    fn from(duration: Duration) -> Self {
        duration.0
    }
}

impl TryFrom<Duration> for std::time::Duration {
    type Error = std::num::TryFromIntError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        u64::try_from(duration.0).map(std::time::Duration::from_nanos)
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = std::num::TryFromIntError;

    fn try_from(duration: std::time::Duration) -> Result<Self, Self::Error> {
        i64::try_from(duration.as_nanos()).map(Self)
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Parses a duration literal into signed nanoseconds.
///
/// A literal is an optional sign followed by one or more decimal numbers,
/// each with an optional fraction and a mandatory unit, such as `"300ms"`,
/// `"-1.5h"` or `"2h45m"`. The bare literal `"0"` is also accepted.
///
/// # Errors
///
/// Returns [`ParseDurationError`] when the literal is malformed, uses an
/// unknown unit, or overflows 64-bit nanoseconds.
pub fn parse_duration(input: &str) -> Result<i64, ParseDurationError> {
    let invalid = || ParseDurationError::Invalid(input.to_string());

    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let first = rest.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after_whole) = leading_int(rest).ok_or_else(invalid)?;
        let has_whole = after_whole.len() != rest.len();
        rest = after_whole;

        let mut fraction = 0u64;
        let mut scale = 1f64;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, digit_scale, after_fraction) = leading_fraction(after_dot);
            has_fraction = after_fraction.len() != after_dot.len();
            fraction = digits;
            scale = digit_scale;
            rest = after_fraction;
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_len = rest
            .bytes()
            .position(|b| b == b'.' || b.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(ParseDurationError::MissingUnit(input.to_string()));
        }
        let (unit_text, after_unit) = rest.split_at(unit_len);
        rest = after_unit;

        let unit = unit_nanos(unit_text).ok_or_else(|| ParseDurationError::UnknownUnit {
            unit: unit_text.to_string(),
            input: input.to_string(),
        })?;

        if whole > MAX_MAGNITUDE / unit {
            return Err(invalid());
        }
        let mut value = whole * unit;
        if fraction > 0 {
            // fractions are scaled through f64 and truncated
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
            let scaled = (fraction as f64 * (unit as f64 / scale)) as u64;
            value = value.checked_add(scaled).ok_or_else(invalid)?;
            if value > MAX_MAGNITUDE {
                return Err(invalid());
            }
        }
        total = total.checked_add(value).ok_or_else(invalid)?;
        if total > MAX_MAGNITUDE {
            return Err(invalid());
        }
    }

    if negative {
        return match i64::try_from(total) {
            Ok(value) => Ok(-value),
            // total is exactly 2^63 here
            Err(_) => Ok(i64::MIN),
        };
    }
    i64::try_from(total).map_err(|_| invalid())
}

/// Formats signed nanoseconds using the largest fitting units.
///
/// # Examples
///
/// ```
/// use layercfg::duration::format_duration;
///
/// assert_eq!(format_duration(0), "0s");
/// assert_eq!(format_duration(1_500_000), "1.5ms");
/// assert_eq!(format_duration(60_000_000_000), "1m0s");
/// assert_eq!(format_duration(-7_200_000_000_000), "-2h0m0s");
/// ```
#[must_use]
pub fn format_duration(nanos: i64) -> String {
    if nanos == 0 {
        return "0s".to_string();
    }

    let sign = if nanos < 0 { "-" } else { "" };
    let magnitude = nanos.unsigned_abs();

    if magnitude < SECOND {
        let (unit, precision) = if magnitude < MICROSECOND {
            ("ns", 0)
        } else if magnitude < MILLISECOND {
            ("µs", 3)
        } else {
            ("ms", 6)
        };
        let (fraction, whole) = format_fraction(magnitude, precision);
        return format!("{sign}{whole}{fraction}{unit}");
    }

    let (fraction, whole_secs) = format_fraction(magnitude, 9);
    let secs = whole_secs % 60;
    let whole_mins = whole_secs / 60;
    if whole_mins == 0 {
        return format!("{sign}{secs}{fraction}s");
    }

    let mins = whole_mins % 60;
    let hours = whole_mins / 60;
    if hours == 0 {
        format!("{sign}{mins}m{secs}{fraction}s")
    } else {
        format!("{sign}{hours}h{mins}m{secs}{fraction}s")
    }
}

/// Splits `value` into the digits below `precision` (rendered as a
/// trimmed `.fraction`, or nothing when zero) and the remaining whole part.
fn format_fraction(value: u64, precision: u32) -> (String, u64) {
    let divisor = 10u64.pow(precision);
    let remainder = value % divisor;
    if remainder == 0 {
        return (String::new(), value / divisor);
    }

    let digits = format!("{remainder:0width$}", width = precision as usize);
    (format!(".{}", digits.trim_end_matches('0')), value / divisor)
}

/// Consumes a run of ASCII digits. Returns `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    for digit in s[..end].bytes() {
        if value > MAX_MAGNITUDE / 10 {
            return None;
        }
        value = value * 10 + u64::from(digit - b'0');
        if value > MAX_MAGNITUDE {
            return None;
        }
    }
    Some((value, &s[end..]))
}

/// Consumes a run of fraction digits, dropping precision that would
/// overflow instead of failing.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    let mut scale = 1f64;
    let mut overflowed = false;
    for digit in s[..end].bytes() {
        if overflowed {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
        {
            Some(next) if next <= MAX_MAGNITUDE => {
                value = next;
                scale *= 10.0;
            }
            _ => overflowed = true,
        }
    }
    (value, scale, &s[end..])
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}
