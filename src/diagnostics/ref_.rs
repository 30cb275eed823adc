use core::{any::TypeId, fmt};

use spire_error_internals::RawDiagnostic;

use crate::markers::DiagnosticKey;

/// A borrowed view of one entry of a
/// [`Diagnostics`](crate::diagnostics::Diagnostics) collection.
///
/// `Display` and `Debug` render the value through the handler chosen by its
/// key.
#[derive(Copy, Clone)]
pub struct DiagnosticRef<'a> {
    key: TypeId,
    key_name: &'static str,
    raw: &'a RawDiagnostic,
}

impl<'a> DiagnosticRef<'a> {
    pub(super) fn new(key: TypeId, key_name: &'static str, raw: &'a RawDiagnostic) -> Self {
        Self { key, key_name, raw }
    }

    /// The [`NAME`](DiagnosticKey::NAME) of the key.
    #[must_use]
    pub fn key_name(self) -> &'static str {
        self.key_name
    }

    /// The [`TypeId`] of the key marker type.
    #[must_use]
    pub fn key_type_id(self) -> TypeId {
        self.key
    }

    /// The type name of the attached value.
    #[must_use]
    pub fn value_type_name(self) -> &'static str {
        self.raw.value_type_name()
    }

    /// Whether the key's handler keeps this value out of rendered output.
    #[must_use]
    pub fn is_hidden(self) -> bool {
        self.raw.is_hidden()
    }

    /// Returns the value if this entry is keyed by `K`.
    #[must_use]
    pub fn downcast<K: DiagnosticKey>(self) -> Option<&'a K::Value> {
        if self.key == TypeId::of::<K>() {
            self.raw.downcast::<K::Value>()
        } else {
            None
        }
    }
}

impl fmt::Display for DiagnosticRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.raw, f)
    }
}

impl fmt::Debug for DiagnosticRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.raw, f)
    }
}
