//! Marker traits for exception kinds and diagnostic keys.
//!
//! Both traits are implemented by stateless marker types. The markers are
//! never instantiated: they exist so that the type system, rather than a
//! runtime registry, tells two exception kinds or two diagnostic keys apart.
//! The idiomatic marker is an uninhabited enum, which makes accidental
//! instantiation impossible.
//!
//! Markers are normally declared through the [`error_kind!`] and
//! [`diagnostic_key!`] macros, but implementing the traits by hand is just as
//! valid.
//!
//! # Examples
//!
//! ```
//! use spire_error::{
//!     Error, handlers,
//!     markers::{DiagnosticKey, Tag},
//! };
//!
//! pub enum TimeoutTag {}
//!
//! impl Tag for TimeoutTag {
//!     const NAME: &'static str = "TimeoutError";
//! }
//!
//! pub type TimeoutError = Error<TimeoutTag>;
//!
//! pub enum ElapsedMillis {}
//!
//! impl DiagnosticKey for ElapsedMillis {
//!     type Value = u64;
//!     type Handler = handlers::Display;
//!     const NAME: &'static str = "ElapsedMillis";
//! }
//!
//! let error = TimeoutError::new("request timed out").attach::<ElapsedMillis>(1500);
//! assert_eq!(error.diagnostic::<ElapsedMillis>(), Some(&1500));
//! ```
//!
//! [`error_kind!`]: crate::error_kind
//! [`diagnostic_key!`]: crate::diagnostic_key

use crate::handlers::DiagnosticHandler;

/// A marker type naming an exception kind.
///
/// Instantiating [`Error<T, B>`](crate::Error) with two different tags
/// produces two distinct types, even when they share the same base.
pub trait Tag: 'static {
    /// The name of the kind, used when formatting exceptions with `{:?}` and
    /// by [`Raised::kind_name`](crate::Raised::kind_name).
    const NAME: &'static str;
}

/// A marker type keying one kind of diagnostic attachment.
///
/// An exception stores at most one value per key. The key decides the type
/// of the value and the handler used to format it.
pub trait DiagnosticKey: 'static {
    /// The type of the attached value.
    type Value: 'static + Send + Sync;

    /// The handler used to format the value when an exception renders its
    /// diagnostics.
    type Handler: DiagnosticHandler<Self::Value>;

    /// The name of the key, shown next to the value when rendered.
    const NAME: &'static str;
}
