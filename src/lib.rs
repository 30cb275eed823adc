#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Typed exception kinds with accumulated messages and structured
//! diagnostics.
//!
//! ## Overview
//!
//! Every error in this crate is an [`Exception`]: a human-readable message
//! that can be extended as the error travels up the stack, plus typed
//! diagnostic values keyed by marker types. Exceptions come in *kinds*.
//! A kind is an [`Error<Tag, Base>`](Error): a distinct type named by a tag,
//! that behaves exactly like its base and converts into it.
//!
//! Four kinds are built in:
//!
//! - [`SystemError`](kinds::SystemError): unexpected failures in
//!   third-party or OS APIs;
//! - [`DataError`](kinds::DataError): failures handling a data source;
//! - [`RuntimeError`](kinds::RuntimeError): other program logic failures;
//! - [`PlatformError`](kinds::PlatformError): a failing platform call, which
//!   is also a `SystemError`.
//!
//! ## Quick Example
//!
//! ```
//! use spire_error::prelude::*;
//!
//! diagnostic_key! {
//!     /// Line number in the input.
//!     pub enum LineNo: usize;
//! }
//!
//! fn parse_line(line_no: usize, line: &str) -> Result<u32, DataError> {
//!     check!(DataError, !line.is_empty());
//!     line.trim().parse::<u32>().map_err(|error| {
//!         DataError::new("invalid number: ")
//!             .append(error)
//!             .attach::<LineNo>(line_no)
//!     })
//! }
//!
//! let error = parse_line(3, "x").unwrap_err();
//! assert_eq!(error.describe(), "invalid number: invalid digit found in string");
//! assert_eq!(error.diagnostic::<LineNo>(), Some(&3));
//!
//! // Every kind converts into its base
//! let error: Exception = parse_line(4, "").unwrap_err().into();
//! assert_eq!(error.describe(), "Assert failed: !line.is_empty()");
//! ```
//!
//! ## Raising and catching
//!
//! Raising an exception means returning it in an `Err`. The [`check!`],
//! [`win_check!`] and [`raise!`] macros do so, converting the kind with
//! [`From`] into whatever error type the function returns.
//!
//! Catching is ordinary Rust: match on the `Result`. A function that may
//! raise several kinds can return [`Raised`], which remembers the concrete
//! kind and can be caught as that kind or any of its bases:
//!
//! ```
//! use spire_error::prelude::*;
//!
//! fn close_handle() -> spire_error::Result<()> {
//!     raise!(PlatformError, "handle {} is invalid", 7)
//! }
//!
//! let raised = close_handle().unwrap_err();
//! assert!(raised.is::<SystemError>());
//! let system: SystemError = raised.catch().unwrap();
//! assert_eq!(system.describe(), "handle 7 is invalid");
//! ```
//!
//! All kinds implement [`core::error::Error`], so they also work with
//! `Box<dyn Error>` and other error-handling libraries.
//!
//! ## Diagnostics
//!
//! Keys are declared with [`diagnostic_key!`]. Each key names its value type
//! and the [handler](handlers) used to format it. `{:#}` prints the message
//! followed by all visible diagnostics. The location where an exception was
//! created is recorded by default; see [`hooks`] to change what is collected.
//!
//! ## Features
//!
//! - `std` (default): `std::sync` locking for hooks, environment
//!   configuration, [`PlatformErrorCode::last`](platform::PlatformErrorCode::last)
//!   and [`win_check!`]. Without it the crate is `no_std` + `alloc`.
//! - `tracing`: emit `tracing` events (target `spire_error`) when checks fail
//!   and when hooks are installed.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod diagnostics;
mod exception;
pub mod handlers;
pub mod hooks;
mod kind;
pub mod kinds;
pub mod markers;
pub mod platform;
pub mod prelude;
mod raised;

pub use self::{
    exception::Exception,
    kind::{Error, ErrorKind},
    raised::Raised,
};

/// A [`Result`](core::result::Result) type alias where the error defaults
/// to [`Raised`].
///
/// # Examples
///
/// ```
/// use spire_error::prelude::*;
///
/// fn read_flag(value: &str) -> spire_error::Result<bool> {
///     match value {
///         "yes" => Ok(true),
///         "no" => Ok(false),
///         other => raise!(DataError, "unknown flag value {other:?}"),
///     }
/// }
///
/// assert!(read_flag("yes").unwrap());
/// assert!(read_flag("maybe").unwrap_err().is::<DataError>());
/// ```
pub type Result<T, E = Raised> = core::result::Result<T, E>;

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    use alloc::string::String;
    use core::fmt;
    #[doc(hidden)]
    pub use core::{
        concat, convert::From, format_args, result::Result::Err, stringify,
    };

    use crate::{ErrorKind, Exception};

    #[doc(hidden)]
    #[inline]
    #[cold]
    #[must_use]
    #[track_caller]
    pub fn check_failed<K: ErrorKind>(condition: &'static str) -> K {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "spire_error", kind = K::NAME, condition, "check failed");

        K::from_exception(Exception::new(String::from(condition)))
    }

    #[doc(hidden)]
    #[inline]
    #[cold]
    #[must_use]
    #[track_caller]
    pub fn check_failed_with<K: ErrorKind>(
        condition: &'static str,
        args: fmt::Arguments<'_>,
    ) -> K {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "spire_error", kind = K::NAME, condition, "check failed");

        let mut message = String::from(condition);
        let _ = crate::exception::write_or_rollback(&mut message, format_args!(": {args}"));
        K::from_exception(Exception::new(message))
    }

    #[doc(hidden)]
    #[inline]
    #[cold]
    #[must_use]
    #[track_caller]
    #[cfg(feature = "std")]
    pub fn platform_check_failed(
        code: crate::platform::PlatformErrorCode,
        condition: &'static str,
    ) -> crate::kinds::PlatformError {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "spire_error",
            kind = <crate::kinds::PlatformError as ErrorKind>::NAME,
            condition,
            code = code.code(),
            "platform check failed"
        );

        crate::kinds::PlatformError::from_exception(Exception::new(String::from(condition)))
            .attach::<crate::platform::PlatformErrorInfo>(code)
    }

    #[doc(hidden)]
    #[inline]
    #[cold]
    #[must_use]
    #[track_caller]
    pub fn raise<K: ErrorKind>(args: fmt::Arguments<'_>) -> K {
        K::from_exception(Exception::from_args(args))
    }
}
