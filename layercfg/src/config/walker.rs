//! Depth-first traversal of configuration structures.
//!
//! Every loading pass is a [`Visitor`] run over the tree by [`walk`]:
//! nested structures are entered in declaration order and every other
//! field (leaf values and section lists) is handed to the visitor. The
//! first error aborts the walk.

use crate::error::Result;
use crate::field::{FieldSpec, Settings, Slot};

/// A single pass over the fields of a configuration tree.
pub trait Visitor {
    /// Visits one leaf or section-list field.
    ///
    /// # Errors
    ///
    /// Any error stops the walk and is returned from [`walk`].
    fn visit(&mut self, spec: &FieldSpec, slot: Slot<'_>) -> Result<()>;
}

/// Runs `visitor` over every field of `settings`, depth-first.
///
/// # Errors
///
/// Returns the first error reported by the visitor.
pub fn walk(settings: &mut dyn Settings, visitor: &mut dyn Visitor) -> Result<()> {
    for field in settings.fields() {
        match field.slot {
            Slot::Nested(nested) => walk(nested, visitor)?,
            slot => visitor.visit(&field.spec, slot)?,
        }
    }
    Ok(())
}
