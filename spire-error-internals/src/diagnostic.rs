//! Type-erased diagnostic payloads.
//!
//! A [`RawDiagnostic`] owns a value of some type `V` together with the
//! [`DiagnosticHandler`] `H` chosen for it. Both types are erased behind the
//! private [`UntypedDiagnostic`] trait, which is the only place where `V` and
//! `H` are known at the same time. Since the pair is fixed at construction
//! and cannot be changed afterwards, the handler always matches the payload.

use core::{
    any::{Any, TypeId},
    fmt,
    marker::PhantomData,
};

use triomphe::Arc;
use unsize::CoerceUnsize;

use crate::handlers::DiagnosticHandler;

/// Object-safe view of a `DiagnosticData<V, H>`.
trait UntypedDiagnostic: 'static + Send + Sync {
    /// The payload as [`Any`], for type-checked retrieval.
    fn value(&self) -> &dyn Any;

    /// The name of the payload type.
    fn value_type_name(&self) -> &'static str;

    /// Formats the payload with `H::display`.
    fn display(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Formats the payload with `H::debug`.
    fn debug(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Forwards to `H::is_hidden`.
    fn is_hidden(&self) -> bool;
}

/// A payload paired with its handler.
struct DiagnosticData<V, H> {
    /// The attached value.
    value: V,
    /// The handler used to format `value`.
    _handler: PhantomData<fn(H) -> H>,
}

impl<V, H> UntypedDiagnostic for DiagnosticData<V, H>
where
    V: 'static + Send + Sync,
    H: DiagnosticHandler<V>,
{
    fn value(&self) -> &dyn Any {
        &self.value
    }

    fn value_type_name(&self) -> &'static str {
        core::any::type_name::<V>()
    }

    fn display(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        H::display(&self.value, formatter)
    }

    fn debug(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        H::debug(&self.value, formatter)
    }

    fn is_hidden(&self) -> bool {
        H::is_hidden(&self.value)
    }
}

/// A type-erased, reference-counted diagnostic payload.
///
/// Cloning a [`RawDiagnostic`] is cheap: the clone shares the payload with
/// the original. Payloads are immutable once attached.
#[derive(Clone)]
pub struct RawDiagnostic {
    /// The erased payload.
    inner: Arc<dyn UntypedDiagnostic>,
}

impl RawDiagnostic {
    /// Erases `value`, remembering `H` as the handler used to format it.
    ///
    /// # Examples
    ///
    /// ```
    /// use spire_error_internals::{RawDiagnostic, handlers::DiagnosticHandler};
    ///
    /// struct Plain;
    /// impl DiagnosticHandler<u32> for Plain {
    ///     fn display(value: &u32, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    ///         write!(f, "{value}")
    ///     }
    /// }
    ///
    /// let diagnostic = RawDiagnostic::new::<u32, Plain>(5);
    /// assert_eq!(diagnostic.downcast::<u32>(), Some(&5));
    /// assert_eq!(diagnostic.to_string(), "5");
    /// ```
    #[must_use]
    pub fn new<V, H>(value: V) -> Self
    where
        V: 'static + Send + Sync,
        H: DiagnosticHandler<V>,
    {
        let data: DiagnosticData<V, H> = DiagnosticData {
            value,
            _handler: PhantomData,
        };
        let inner = Arc::new(data).unsize(unsize::Coercion!(to dyn UntypedDiagnostic));
        Self { inner }
    }

    /// The [`TypeId`] of the stored value.
    #[inline]
    #[must_use]
    pub fn value_type_id(&self) -> TypeId {
        Any::type_id(self.inner.value())
    }

    /// The type name of the stored value.
    #[inline]
    #[must_use]
    pub fn value_type_name(&self) -> &'static str {
        self.inner.value_type_name()
    }

    /// Returns the stored value if it is of type `V`.
    #[inline]
    #[must_use]
    pub fn downcast<V: 'static>(&self) -> Option<&V> {
        self.inner.value().downcast_ref::<V>()
    }

    /// Whether the handler asked for this value to be left out of rendered
    /// output.
    #[inline]
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }
}

impl fmt::Display for RawDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.display(f)
    }
}

impl fmt::Debug for RawDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.debug(f)
    }
}
