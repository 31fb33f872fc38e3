//! Listing of the fields a configuration type accepts.

use serde::Serialize;

use crate::field::{Settings, Slot};

/// One configurable leaf, as an operator sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    /// Dotted path from the root; section elements appear as `name[]`.
    pub path: String,
    /// Environment variable overriding the field. Section element fields
    /// show the index as `<n>`.
    pub env: Option<String>,
    /// Default literal.
    pub default: Option<&'static str>,
    /// Whether the field must be non-empty after loading.
    pub required: bool,
}

/// Describes every leaf of `T`, depth-first in declaration order.
///
/// # Examples
///
/// ```
/// use layercfg::{describe, Duration, Field, Settings};
///
/// #[derive(Debug, Clone, Default)]
/// struct Payload {
///     addr: String,
///     timeout: Duration,
/// }
///
/// impl Settings for Payload {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::value("addr", &mut self.addr).env("ADDR").default("0.0.0.0"),
///             Field::value("timeout", &mut self.timeout),
///         ]
///     }
/// }
///
/// #[derive(Debug, Default)]
/// struct Configuration {
///     payloads: Vec<Payload>,
/// }
///
/// impl Settings for Configuration {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![Field::sections("payloads", &mut self.payloads).env_prefix("APP")]
///     }
/// }
///
/// let fields = describe::<Configuration>();
/// assert_eq!(fields[0].path, "payloads[].addr");
/// assert_eq!(fields[0].env.as_deref(), Some("APP_<n>_ADDR"));
/// assert_eq!(fields[1].env.as_deref(), Some("APP_<n>_TIMEOUT"));
/// ```
#[must_use]
pub fn describe<T: Settings + Default>() -> Vec<FieldInfo> {
    let mut settings = T::default();
    let mut fields = Vec::new();
    collect(&mut settings, "", &mut fields);
    fields
}

fn collect(settings: &mut dyn Settings, parent: &str, out: &mut Vec<FieldInfo>) {
    for field in settings.fields() {
        let path = if parent.is_empty() {
            field.spec.name.to_string()
        } else {
            format!("{parent}.{}", field.spec.name)
        };

        match field.slot {
            Slot::Value(_) => out.push(FieldInfo {
                path,
                env: field.spec.env.map(str::to_string),
                default: field.spec.default,
                required: field.spec.required,
            }),
            Slot::Nested(nested) => collect(nested, &path, out),
            Slot::List(list) => {
                let Some(prefix) = field.spec.env_prefix else {
                    out.push(FieldInfo {
                        path: format!("{path}[]"),
                        env: None,
                        default: None,
                        required: field.spec.required,
                    });
                    continue;
                };
                for element in list.element_specs() {
                    let token = element
                        .env
                        .map_or_else(|| element.name.to_uppercase(), str::to_string);
                    out.push(FieldInfo {
                        path: format!("{path}[].{}", element.name),
                        env: Some(format!("{prefix}_<n>_{token}")),
                        default: element.default,
                        required: element.required,
                    });
                }
            }
        }
    }
}
