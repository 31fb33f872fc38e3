//! Default value pass.
//!
//! Fields annotated with a default literal receive it when they are still
//! empty. Fields already holding a value are left alone, so the pass can
//! run over hand-built structures and over section elements that were
//! created after the first pass.

use crate::config::walker::{walk, Visitor};
use crate::error::Result;
use crate::field::{FieldSpec, Settings, Slot};

/// Fills empty fields with their default literals.
///
/// # Errors
///
/// Returns a parse error if a default literal does not fit its field's
/// type.
///
/// # Examples
///
/// ```
/// use layercfg::{fill_defaults, Field, Settings};
///
/// #[derive(Default)]
/// struct Server {
///     addr: String,
/// }
///
/// impl Settings for Server {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![Field::value("addr", &mut self.addr).default("localhost:8080")]
///     }
/// }
///
/// let mut server = Server::default();
/// fill_defaults(&mut server).unwrap();
/// assert_eq!(server.addr, "localhost:8080");
/// ```
pub fn fill_defaults<T: Settings>(settings: &mut T) -> Result<()> {
    walk(settings, &mut DefaultFiller)
}

/// Visitor applying default literals to empty leaves.
pub(crate) struct DefaultFiller;

impl Visitor for DefaultFiller {
    fn visit(&mut self, spec: &FieldSpec, slot: Slot<'_>) -> Result<()> {
        let (Some(literal), Slot::Value(value)) = (spec.default, slot) else {
            return Ok(());
        };
        if !value.is_zero() {
            return Ok(());
        }

        log::debug!("Applying default {literal:?} to field {}", spec.name);
        value.coerce(literal)
    }
}
