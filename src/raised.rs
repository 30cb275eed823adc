//! Type-erased raised exceptions.

use core::{
    any::TypeId,
    fmt,
    ops::{Deref, DerefMut},
};

use crate::{ErrorKind, Exception};

/// An exception whose static kind has been erased, but which still knows its
/// concrete kind and everything above it.
///
/// [`Raised`] is what a function returns when it can fail with several
/// kinds. Handlers then pick the kind they care about with
/// [`catch`](Self::catch), which, like a `catch` clause, also accepts any
/// base of the concrete kind.
///
/// # Examples
///
/// ```
/// use spire_error::prelude::*;
///
/// fn open_device() -> Result<(), Raised> {
///     raise!(PlatformError, "device {} is busy", 3)
/// }
///
/// let raised = open_device().unwrap_err();
/// assert_eq!(raised.kind_name(), "PlatformError");
/// assert!(raised.is::<SystemError>());
/// assert!(!raised.is::<DataError>());
///
/// let raised = match raised.catch::<DataError>() {
///     Ok(_) => unreachable!("a platform error is not a data error"),
///     Err(raised) => raised,
/// };
/// let system = raised.catch::<SystemError>().unwrap();
/// assert_eq!(system.describe(), "device 3 is busy");
/// ```
#[derive(Clone)]
pub struct Raised {
    exception: Exception,
    kind_name: &'static str,
    is_a: fn(TypeId) -> bool,
}

impl Raised {
    /// Erases the static kind of `error`.
    #[must_use]
    pub fn new<K: ErrorKind>(error: K) -> Self {
        Self {
            exception: error.into_exception(),
            kind_name: K::NAME,
            is_a: K::is_a,
        }
    }

    /// The name of the concrete kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.kind_name
    }

    /// Whether the concrete kind is `K` or has `K` as one of its bases.
    #[must_use]
    pub fn is<K: ErrorKind>(&self) -> bool {
        (self.is_a)(TypeId::of::<K>())
    }

    /// Recovers the exception as `K` if the concrete kind is `K` or has `K`
    /// as one of its bases. Otherwise `self` is handed back unchanged.
    ///
    /// The message and diagnostics are preserved either way.
    pub fn catch<K: ErrorKind>(self) -> Result<K, Self> {
        if self.is::<K>() {
            Ok(K::from_exception(self.exception))
        } else {
            Err(self)
        }
    }

    /// The underlying exception.
    #[must_use]
    pub fn as_exception(&self) -> &Exception {
        &self.exception
    }

    /// Unwraps the underlying exception, forgetting the kind.
    #[must_use]
    pub fn into_exception(self) -> Exception {
        self.exception
    }
}

impl<K: ErrorKind> From<K> for Raised {
    fn from(error: K) -> Self {
        Self::new(error)
    }
}

impl Deref for Raised {
    type Target = Exception;

    fn deref(&self) -> &Exception {
        &self.exception
    }
}

impl DerefMut for Raised {
    fn deref_mut(&mut self) -> &mut Exception {
        &mut self.exception
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.exception, f)
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.exception.debug_named(self.kind_name, f)
    }
}

impl core::error::Error for Raised {}
