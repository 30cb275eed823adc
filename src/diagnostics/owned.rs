use core::{any::TypeId, fmt};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use spire_error_internals::RawDiagnostic;

use crate::{
    diagnostics::{DiagnosticRef, DiagnosticsIter},
    markers::DiagnosticKey,
};

#[derive(Clone)]
pub(super) struct Entry {
    pub(super) key_name: &'static str,
    pub(super) raw: RawDiagnostic,
}

/// A collection of diagnostic values keyed by marker type.
///
/// At most one value is stored per key. Inserting a value for a key that is
/// already present replaces the value but keeps the entry's position.
///
/// Cloning the collection is cheap: values are reference counted and shared
/// between the clones.
///
/// # Examples
///
/// ```
/// use spire_error::{diagnostic_key, diagnostics::Diagnostics};
///
/// diagnostic_key! {
///     /// Byte offset at which parsing stopped.
///     pub enum Offset: usize;
/// }
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.insert::<Offset>(40);
///
/// assert_eq!(diagnostics.get::<Offset>(), Some(&40));
/// assert_eq!(diagnostics.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Diagnostics {
    entries: IndexMap<TypeId, Entry, FxBuildHasher>,
}

impl Diagnostics {
    /// Creates an empty collection. Does not allocate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `value` under the key `K`, replacing any previous value for
    /// that key.
    pub fn insert<K: DiagnosticKey>(&mut self, value: K::Value) {
        let entry = Entry {
            key_name: K::NAME,
            raw: RawDiagnostic::new::<K::Value, K::Handler>(value),
        };
        self.entries.insert(TypeId::of::<K>(), entry);
    }

    /// Returns the value attached under `K`, if any.
    #[must_use]
    pub fn get<K: DiagnosticKey>(&self) -> Option<&K::Value> {
        self.entries
            .get(&TypeId::of::<K>())?
            .raw
            .downcast::<K::Value>()
    }

    /// Whether a value is attached under `K`.
    #[must_use]
    pub fn contains<K: DiagnosticKey>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<K>())
    }

    /// Removes the value attached under `K`, returning whether one was
    /// present. The order of the remaining entries is preserved.
    pub fn remove<K: DiagnosticKey>(&mut self) -> bool {
        self.entries.shift_remove(&TypeId::of::<K>()).is_some()
    }

    /// Copies every entry of `other` into `self`. Entries of `other` win when
    /// both collections hold a value for the same key.
    pub fn extend_from(&mut self, other: &Diagnostics) {
        self.entries.extend(
            other
                .entries
                .iter()
                .map(|(key, entry)| (*key, entry.clone())),
        );
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The number of attached values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no values are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> DiagnosticsIter<'_> {
        DiagnosticsIter::new(self.entries.iter())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type IntoIter = DiagnosticsIter<'a>;
    type Item = DiagnosticRef<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|diagnostic| (diagnostic.key_name(), diagnostic)),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::String, vec::Vec};

    use super::*;
    use crate::{diagnostic_key, handlers};

    diagnostic_key! {
        pub enum Offset: usize;
        pub enum FileName: &'static str;
        pub enum RawBytes: Vec<u8> => handlers::Debug;
        pub enum Token: String => handlers::Hidden;
    }

    #[test]
    fn test_diagnostics_send_sync() {
        static_assertions::assert_impl_all!(Diagnostics: Send, Sync, Clone);
    }

    #[test]
    fn test_insert_and_get_by_key() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.insert::<Offset>(40);
        diagnostics.insert::<FileName>("header.bin");

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.get::<Offset>(), Some(&40));
        assert_eq!(diagnostics.get::<FileName>(), Some(&"header.bin"));
        assert!(!diagnostics.contains::<RawBytes>());
        assert_eq!(diagnostics.get::<RawBytes>(), None);
    }

    #[test]
    fn test_insert_replaces_and_keeps_position() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.insert::<Offset>(1);
        diagnostics.insert::<FileName>("a");
        diagnostics.insert::<Offset>(2);

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.get::<Offset>(), Some(&2));

        let names: Vec<&str> = diagnostics.iter().map(|d| d.key_name()).collect();
        assert_eq!(names, ["Offset", "FileName"]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.insert::<Offset>(1);
        diagnostics.insert::<FileName>("a");
        diagnostics.insert::<RawBytes>(alloc::vec![0xde, 0xad]);

        assert!(diagnostics.remove::<FileName>());
        assert!(!diagnostics.remove::<FileName>());

        let names: Vec<&str> = diagnostics.iter().map(|d| d.key_name()).collect();
        assert_eq!(names, ["Offset", "RawBytes"]);
    }

    #[test]
    fn test_extend_from_prefers_other() {
        let mut base = Diagnostics::new();
        base.insert::<Offset>(1);
        base.insert::<FileName>("base");

        let mut other = Diagnostics::new();
        other.insert::<FileName>("other");
        other.insert::<RawBytes>(alloc::vec![1]);

        base.extend_from(&other);

        assert_eq!(base.len(), 3);
        assert_eq!(base.get::<FileName>(), Some(&"other"));
        assert_eq!(other.len(), 2);
    }

    #[test]
    fn test_clone_keeps_values() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.insert::<Token>(String::from("secret"));
        let copy = diagnostics.clone();
        diagnostics.clear();

        assert!(diagnostics.is_empty());
        assert_eq!(copy.get::<Token>().map(String::as_str), Some("secret"));
    }

    #[test]
    fn test_debug_uses_handlers() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.insert::<Offset>(7);
        diagnostics.insert::<RawBytes>(alloc::vec![1, 2]);
        diagnostics.insert::<Token>(String::from("secret"));

        assert_eq!(
            format!("{diagnostics:?}"),
            "{\"Offset\": 7, \"RawBytes\": [1, 2], \"Token\": <hidden>}"
        );
    }
}
