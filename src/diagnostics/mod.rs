//! Typed diagnostic attachments carried by an exception.
//!
//! Every [`Exception`](crate::Exception) owns a [`Diagnostics`] collection.
//! Entries are keyed by a [`DiagnosticKey`](crate::markers::DiagnosticKey)
//! marker type, so retrieving a value is a type-checked lookup rather than a
//! string comparison. Entries keep the order in which their keys were first
//! inserted.

mod iter;
mod owned;
mod ref_;

pub use self::{iter::DiagnosticsIter, owned::Diagnostics, ref_::DiagnosticRef};
