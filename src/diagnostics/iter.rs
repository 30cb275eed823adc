use core::{any::TypeId, iter::FusedIterator};

use crate::diagnostics::{DiagnosticRef, owned::Entry};

/// Iterator over the entries of a
/// [`Diagnostics`](crate::diagnostics::Diagnostics) collection, in insertion
/// order.
#[must_use]
#[derive(Clone)]
pub struct DiagnosticsIter<'a> {
    inner: indexmap::map::Iter<'a, TypeId, Entry>,
}

impl<'a> DiagnosticsIter<'a> {
    pub(super) fn new(inner: indexmap::map::Iter<'a, TypeId, Entry>) -> Self {
        Self { inner }
    }
}

fn to_ref<'a>((key, entry): (&'a TypeId, &'a Entry)) -> DiagnosticRef<'a> {
    DiagnosticRef::new(*key, entry.key_name, &entry.raw)
}

impl<'a> Iterator for DiagnosticsIter<'a> {
    type Item = DiagnosticRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(to_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for DiagnosticsIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(to_ref)
    }
}

impl ExactSizeIterator for DiagnosticsIter<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl FusedIterator for DiagnosticsIter<'_> {}
