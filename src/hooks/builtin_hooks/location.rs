//! Source location diagnostics.
//!
//! Every new exception gets a [`CreatedAt`] diagnostic holding the place in
//! user code where it was created, formatted as `file:line:column`. The
//! location is tracked through `#[track_caller]`, so for exceptions raised by
//! [`check!`](crate::check) it points at the macro invocation.
//!
//! ```rust
//! use spire_error::{
//!     hooks::builtin_hooks::location::CreatedAt,
//!     kinds::DataError,
//! };
//!
//! let error = DataError::new("truncated record");
//! if let Some(location) = error.diagnostic::<CreatedAt>() {
//!     assert!(location.file.ends_with(".rs"));
//! }
//! ```

use alloc::borrow::Cow;
use core::fmt;

use crate::{handlers::DiagnosticHandler, hooks::DiagnosticCollector};

/// Source code location where an exception was created.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Location {
    /// The source file path.
    pub file: Cow<'static, str>,
    /// The line number.
    pub line: u32,
    /// The column number.
    pub column: u32,
}

impl Location {
    /// The location of the caller, following `#[track_caller]` frames.
    #[track_caller]
    #[must_use]
    pub fn caller() -> Self {
        let location = core::panic::Location::caller();
        Self {
            file: location.file().into(),
            line: location.line(),
            column: location.column(),
        }
    }
}

/// Formats a [`Location`] as `file:line:column`.
#[derive(Copy, Clone, Debug)]
pub struct LocationHandler;

impl DiagnosticHandler<Location> for LocationHandler {
    fn display(value: &Location, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", value.file, value.line, value.column)
    }
}

diagnostic_key! {
    /// Where the exception was created.
    pub enum CreatedAt: Location => LocationHandler;
}

/// Collects the [`Location`] of exception creation.
///
/// ```rust
/// use spire_error::hooks::{
///     Hooks,
///     builtin_hooks::location::{CreatedAt, LocationCollector},
/// };
///
/// // Equivalent to `Hooks::new()`
/// let hooks = Hooks::new_without_locations()
///     .diagnostic_collector::<CreatedAt, _>(LocationCollector);
/// assert_eq!(hooks.len(), 1);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct LocationCollector;

impl DiagnosticCollector<CreatedAt> for LocationCollector {
    #[track_caller]
    fn collect(&self) -> Location {
        Location::caller()
    }
}

#[derive(Debug)]
pub(crate) struct LocationOptions {
    pub(crate) enabled: bool,
}

impl LocationOptions {
    #[cfg(feature = "std")]
    pub(crate) fn get() -> &'static Self {
        static OPTIONS: std::sync::OnceLock<LocationOptions> = std::sync::OnceLock::new();

        OPTIONS.get_or_init(|| {
            let var = std::env::var_os("SPIRE_ERROR_LOCATION");
            Self::parse(var.as_deref().map(|var| var.to_string_lossy()).as_deref())
        })
    }

    #[cfg(not(feature = "std"))]
    pub(crate) fn get() -> &'static Self {
        &Self { enabled: true }
    }

    fn parse(var: Option<&str>) -> Self {
        let disabled = var.is_some_and(|var| {
            let var = var.trim();
            var == "0" || var.eq_ignore_ascii_case("off") || var.eq_ignore_ascii_case("false")
        });
        Self { enabled: !disabled }
    }
}
