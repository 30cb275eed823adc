//! Handlers that control how diagnostic values are formatted.
//!
//! A handler is chosen per [`DiagnosticKey`](crate::markers::DiagnosticKey)
//! through its `Handler` associated type. The built-in handlers cover the
//! common cases:
//!
//! - [`Display`]: delegates to the value's `Display` and `Debug` impls. This
//!   is the default used by [`diagnostic_key!`](crate::diagnostic_key).
//! - [`struct@Debug`]: uses the value's `Debug` impl for both.
//! - [`Hidden`]: keeps the value retrievable by key but leaves it out of
//!   rendered output. Useful for payloads meant for programmatic inspection
//!   only.
//!
//! Custom handlers implement [`DiagnosticHandler`].

pub use spire_error_internals::handlers::DiagnosticHandler;

/// Handler for types implementing [`Display`](core::fmt::Display) and
/// [`Debug`](core::fmt::Debug).
#[derive(Copy, Clone, Debug)]
pub struct Display;

impl<V> DiagnosticHandler<V> for Display
where
    V: core::fmt::Display + core::fmt::Debug,
{
    fn display(value: &V, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(value, formatter)
    }

    fn debug(value: &V, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(value, formatter)
    }
}

/// Handler for types implementing only [`Debug`](core::fmt::Debug).
#[derive(Copy, Clone, Debug)]
pub struct Debug;

impl<V> DiagnosticHandler<V> for Debug
where
    V: core::fmt::Debug,
{
    fn display(value: &V, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(value, formatter)
    }
}

/// Handler for values that should never show up in rendered output.
///
/// The value is still attached and can be read back by key.
#[derive(Copy, Clone, Debug)]
pub struct Hidden;

impl<V> DiagnosticHandler<V> for Hidden {
    fn display(_value: &V, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        formatter.write_str("<hidden>")
    }

    fn is_hidden(_value: &V) -> bool {
        true
    }
}
