//! Handlers used for formatting diagnostic payloads.
//!
//! A handler is a stateless type implementing [`DiagnosticHandler`] for some
//! value type. The handler is chosen when a diagnostic key is declared and is
//! remembered by the type-erased [`RawDiagnostic`](crate::RawDiagnostic), so
//! the payload can be rendered long after its concrete type has been erased.

/// Trait for types that know how to format a diagnostic payload of type `V`.
///
/// # Examples
///
/// ```
/// use spire_error_internals::handlers::DiagnosticHandler;
///
/// struct ApiToken(String);
///
/// struct RedactedHandler;
///
/// impl DiagnosticHandler<ApiToken> for RedactedHandler {
///     fn display(_value: &ApiToken, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
///         f.write_str("<redacted>")
///     }
///
///     fn is_hidden(_value: &ApiToken) -> bool {
///         true
///     }
/// }
/// ```
pub trait DiagnosticHandler<V>: 'static {
    /// Formats the value using display-style formatting.
    fn display(value: &V, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result;

    /// Formats the value using debug-style formatting.
    ///
    /// Defaults to [`display`](Self::display).
    fn debug(value: &V, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Self::display(value, formatter)
    }

    /// Whether the value should be left out when an exception renders its
    /// diagnostics. The value is still retrievable by key.
    fn is_hidden(_value: &V) -> bool {
        false
    }
}
