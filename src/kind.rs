//! Exception kinds generated from a tag type.
//!
//! Rather than writing one struct per exception kind, a kind is the generic
//! [`Error<T, B>`] instantiated with a stateless [`Tag`] and a base kind `B`.
//! Two different tags always produce two different types, so a function
//! returning `Result<_, DataError>` can never be handed a
//! [`SystemError`](crate::kinds::SystemError) by mistake.
//!
//! A kind adds no storage of its own: it is `#[repr(transparent)]` over its
//! base and dereferences to it, so everything an
//! [`Exception`](crate::Exception) can do is available on every kind.
//!
//! # Catching
//!
//! Raising means returning `Err(kind)`. A caller can then handle the error
//! by:
//!
//! - its own kind, through the static type of the `Result`;
//! - its base kind, through [`Error::into_base`] or a [`From`] conversion
//!   into [`Exception`];
//! - the generic [`core::error::Error`] interface, e.g. with `?` into
//!   `Box<dyn Error + Send + Sync>`;
//! - any level of its hierarchy after type erasure, through
//!   [`Raised`](crate::Raised).

use alloc::string::String;
use core::{
    any::TypeId,
    fmt,
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

use crate::{
    Exception,
    markers::{DiagnosticKey, Tag},
};

mod sealed {
    pub trait Sealed {}
}

/// Implemented by [`Exception`] and by every [`Error<T, B>`].
///
/// This trait is sealed: new kinds are created by declaring a new [`Tag`],
/// not by implementing this trait.
pub trait ErrorKind:
    sealed::Sealed + Clone + fmt::Debug + fmt::Display + core::error::Error + Send + Sync + 'static
{
    /// The name of the kind.
    const NAME: &'static str;

    /// The underlying exception.
    fn as_exception(&self) -> &Exception;

    /// Mutable access to the underlying exception.
    fn as_exception_mut(&mut self) -> &mut Exception;

    /// Unwraps the underlying exception, forgetting the kind.
    fn into_exception(self) -> Exception;

    /// Wraps an exception as this kind.
    #[doc(hidden)]
    fn from_exception(exception: Exception) -> Self;

    /// Whether `kind` is the [`TypeId`] of this kind or of one of its bases.
    #[doc(hidden)]
    fn is_a(kind: TypeId) -> bool;
}

impl sealed::Sealed for Exception {}

impl ErrorKind for Exception {
    const NAME: &'static str = "Exception";

    #[inline]
    fn as_exception(&self) -> &Exception {
        self
    }

    #[inline]
    fn as_exception_mut(&mut self) -> &mut Exception {
        self
    }

    #[inline]
    fn into_exception(self) -> Exception {
        self
    }

    #[inline]
    fn from_exception(exception: Exception) -> Self {
        exception
    }

    fn is_a(kind: TypeId) -> bool {
        kind == TypeId::of::<Exception>()
    }
}

/// An exception kind, distinguished from every other kind by its tag `T`.
///
/// `B` is the base kind, [`Exception`] unless stated otherwise. Kinds can be
/// stacked: [`PlatformError`](crate::kinds::PlatformError) is an
/// `Error<PlatformErrorTag, SystemError>`, which is itself an
/// `Error<SystemErrorTag, Exception>`.
///
/// New kinds are usually declared with [`error_kind!`](crate::error_kind).
///
/// # Examples
///
/// ```
/// use spire_error::prelude::*;
///
/// error_kind! {
///     /// Failures reaching the license server.
///     pub type LicenseError = Error<LicenseErrorTag, SystemError>;
/// }
///
/// fn validate(key: &str) -> Result<(), LicenseError> {
///     check!(LicenseError, !key.is_empty());
///     Ok(())
/// }
///
/// let error = validate("").unwrap_err();
/// assert_eq!(error.describe(), "Assert failed: !key.is_empty()");
///
/// let system: SystemError = error.into_base();
/// assert_eq!(system.describe(), "Assert failed: !key.is_empty()");
/// ```
#[repr(transparent)]
pub struct Error<T: Tag, B: ErrorKind = Exception> {
    base: B,
    _tag: PhantomData<fn() -> T>,
}

impl<T: Tag, B: ErrorKind> Error<T, B> {
    /// Creates a new exception of this kind from a message.
    #[track_caller]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_exception(Exception::new(message.into()))
    }

    /// Creates a new exception of this kind from a formatted message. The
    /// message is rendered immediately. If a `Display` impl in `args`
    /// fails, the message is left empty.
    ///
    /// ```
    /// use spire_error::prelude::*;
    ///
    /// let error = DataError::from_args(format_args!("expected {} columns, got {}", 4, 3));
    /// assert_eq!(error.describe(), "expected 4 columns, got 3");
    /// ```
    #[track_caller]
    #[must_use]
    pub fn from_args(args: fmt::Arguments<'_>) -> Self {
        Self::from_exception(Exception::from_args(args))
    }

    /// Appends `message` to the accumulated message.
    ///
    /// See [`Exception::push_message`] for the in-place variant.
    #[must_use]
    pub fn append<M: fmt::Display>(mut self, message: M) -> Self {
        self.as_exception_mut().push_message(message);
        self
    }

    /// Attaches `value` under the key `K`.
    ///
    /// See [`Exception::insert_diagnostic`] for the in-place variant.
    #[must_use]
    pub fn attach<K: DiagnosticKey>(mut self, value: K::Value) -> Self {
        self.as_exception_mut().insert_diagnostic::<K>(value);
        self
    }

    /// Converts into the base kind, keeping the message and diagnostics.
    #[inline]
    #[must_use]
    pub fn into_base(self) -> B {
        self.base
    }

    /// Unwraps the underlying exception, forgetting the kind.
    #[inline]
    #[must_use]
    pub fn into_exception(self) -> Exception {
        self.base.into_exception()
    }
}

impl<T: Tag, B: ErrorKind> sealed::Sealed for Error<T, B> {}

impl<T: Tag, B: ErrorKind> ErrorKind for Error<T, B> {
    const NAME: &'static str = T::NAME;

    #[inline]
    fn as_exception(&self) -> &Exception {
        self.base.as_exception()
    }

    #[inline]
    fn as_exception_mut(&mut self) -> &mut Exception {
        self.base.as_exception_mut()
    }

    #[inline]
    fn into_exception(self) -> Exception {
        self.base.into_exception()
    }

    #[inline]
    fn from_exception(exception: Exception) -> Self {
        Self {
            base: B::from_exception(exception),
            _tag: PhantomData,
        }
    }

    fn is_a(kind: TypeId) -> bool {
        kind == TypeId::of::<Self>() || B::is_a(kind)
    }
}

impl<T: Tag, B: ErrorKind> Deref for Error<T, B> {
    type Target = B;

    #[inline]
    fn deref(&self) -> &B {
        &self.base
    }
}

impl<T: Tag, B: ErrorKind> DerefMut for Error<T, B> {
    #[inline]
    fn deref_mut(&mut self) -> &mut B {
        &mut self.base
    }
}

impl<T: Tag, B: ErrorKind> Clone for Error<T, B> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            _tag: PhantomData,
        }
    }
}

impl<T: Tag, B: ErrorKind> fmt::Display for Error<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.base, f)
    }
}

impl<T: Tag, B: ErrorKind> fmt::Debug for Error<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_exception().debug_named(T::NAME, f)
    }
}

impl<T: Tag, B: ErrorKind> core::error::Error for Error<T, B> {}

impl<T: Tag, B: ErrorKind> From<Error<T, B>> for Exception {
    #[inline]
    fn from(error: Error<T, B>) -> Self {
        error.into_exception()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString};

    use super::*;
    use crate::{
        diagnostic_key,
        kinds::{DataError, PlatformError, RuntimeError, SystemError},
    };

    diagnostic_key! {
        pub enum Column: u32;
    }

    #[test]
    fn test_kinds_are_distinct_types() {
        static_assertions::assert_type_ne_all!(
            Exception,
            SystemError,
            DataError,
            RuntimeError,
            PlatformError
        );
        static_assertions::assert_not_impl_any!(DataError: From<SystemError>, From<RuntimeError>);
        static_assertions::assert_not_impl_any!(SystemError: From<DataError>);
        static_assertions::assert_impl_all!(SystemError: From<PlatformError>);
        static_assertions::assert_impl_all!(Exception: From<DataError>, From<PlatformError>);
    }

    #[test]
    fn test_kinds_add_no_storage() {
        assert_eq!(size_of::<DataError>(), size_of::<Exception>());
        assert_eq!(size_of::<PlatformError>(), size_of::<Exception>());
    }

    #[test]
    fn test_kinds_are_send_sync_errors() {
        static_assertions::assert_impl_all!(
            PlatformError: Send,
            Sync,
            Clone,
            core::error::Error
        );
    }

    #[test]
    fn test_constructors_produce_exact_message() {
        assert_eq!(DataError::new("bad header").describe(), "bad header");
        assert_eq!(
            DataError::new("bad header".to_string()).describe(),
            "bad header"
        );
        assert_eq!(
            RuntimeError::from_args(format_args!("{}:{}", "a", 1)).describe(),
            "a:1"
        );
        assert_eq!(
            RuntimeError::from_args(format_args!("static")).describe(),
            "static"
        );
    }

    #[test]
    fn test_append_and_attach_keep_kind() {
        let error: DataError = DataError::new("bad header")
            .append(" at offset ")
            .append(format_args!("{}", 40))
            .attach::<Column>(3);

        assert_eq!(error.describe(), "bad header at offset 40");
        assert_eq!(error.diagnostic::<Column>(), Some(&3));
    }

    #[test]
    fn test_base_operations_through_deref() {
        let mut error = PlatformError::new("CreateFile failed");
        error.push_message(": access denied");
        error.insert_diagnostic::<Column>(9);

        let system: SystemError = error.clone().into();
        let exception: Exception = error.into();

        for describe in [system.describe(), exception.describe()] {
            assert_eq!(describe, "CreateFile failed: access denied");
        }
        assert_eq!(system.diagnostic::<Column>(), Some(&9));
        assert_eq!(exception.diagnostic::<Column>(), Some(&9));
    }

    #[test]
    fn test_hierarchy_membership() {
        assert!(PlatformError::is_a(TypeId::of::<PlatformError>()));
        assert!(PlatformError::is_a(TypeId::of::<SystemError>()));
        assert!(PlatformError::is_a(TypeId::of::<Exception>()));
        assert!(!PlatformError::is_a(TypeId::of::<DataError>()));

        assert!(!SystemError::is_a(TypeId::of::<PlatformError>()));
        assert!(!DataError::is_a(TypeId::of::<SystemError>()));
        assert!(!RuntimeError::is_a(TypeId::of::<DataError>()));
    }

    #[test]
    fn test_debug_uses_kind_name() {
        let mut error = DataError::new("bad header");
        error.diagnostics_mut().clear();

        assert_eq!(
            format!("{error:?}"),
            "DataError { message: \"bad header\", diagnostics: {} }"
        );
        assert_eq!(<PlatformError as ErrorKind>::NAME, "PlatformError");
        assert_eq!(<Exception as ErrorKind>::NAME, "Exception");
    }
}
