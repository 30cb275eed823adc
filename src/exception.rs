//! The base exception type.

use alloc::string::String;
use core::fmt::{self, Write as _};

use crate::{diagnostics::Diagnostics, markers::DiagnosticKey};

/// Base type for every exception kind.
///
/// An [`Exception`] holds an accumulated, human-readable message together
/// with any number of typed [`Diagnostics`]. It is not constructed directly:
/// values are created through a kind such as
/// [`RuntimeError`](crate::kinds::RuntimeError), and every kind dereferences
/// to its base, eventually reaching an [`Exception`].
///
/// # Message
///
/// The message returned by [`describe`](Self::describe) (and printed by
/// `{}`) is always the construction message followed by every appended
/// fragment, in append order. Appending renders its argument eagerly. When a
/// `Display` impl fails halfway through, the fragment is rolled back so the
/// message is never left partially appended.
///
/// # Formatting
///
/// - `{}` prints exactly the message.
/// - `{:#}` prints the message followed by one line per visible diagnostic.
/// - `{:?}` prints the kind name, message and diagnostics.
///
/// # Examples
///
/// ```
/// use spire_error::prelude::*;
///
/// let error = DataError::new("bad header").append(" at offset 40");
/// assert_eq!(error.describe(), "bad header at offset 40");
/// assert_eq!(format!("{error}"), "bad header at offset 40");
/// ```
#[derive(Clone)]
pub struct Exception {
    message: String,
    diagnostics: Diagnostics,
}

impl Exception {
    /// Creates an exception with the given message and runs the installed
    /// creation hooks on it.
    #[track_caller]
    #[must_use]
    pub(crate) fn new(message: String) -> Self {
        let mut exception = Self {
            message,
            diagnostics: Diagnostics::new(),
        };
        crate::hooks::run_creation_hooks(&mut exception.diagnostics);
        exception
    }

    /// Creates an exception from a formatted message. A failing `Display`
    /// impl leaves the message empty instead of panicking.
    #[track_caller]
    #[must_use]
    pub(crate) fn from_args(args: fmt::Arguments<'_>) -> Self {
        let message = match args.as_str() {
            Some(message) => String::from(message),
            None => {
                let mut message = String::new();
                let _ = write_or_rollback(&mut message, args);
                message
            }
        };
        Self::new(message)
    }

    /// Returns the accumulated message.
    #[inline]
    #[must_use]
    pub fn describe(&self) -> &str {
        &self.message
    }

    /// Appends `message` to the accumulated message, returning `self` so
    /// several appends can be chained.
    ///
    /// Both plain strings and formatted values are accepted:
    ///
    /// ```
    /// use spire_error::prelude::*;
    ///
    /// let mut error = RuntimeError::new("queue full");
    /// error
    ///     .push_message(": ")
    ///     .push_message(format_args!("{} of {} slots used", 64, 64));
    /// assert_eq!(error.describe(), "queue full: 64 of 64 slots used");
    /// ```
    pub fn push_message<M: fmt::Display>(&mut self, message: M) -> &mut Self {
        // A failing Display impl leaves the message untouched.
        let _ = self.write_fmt(format_args!("{message}"));
        self
    }

    /// By-value variant of [`push_message`](Self::push_message).
    #[must_use]
    pub fn append<M: fmt::Display>(mut self, message: M) -> Self {
        self.push_message(message);
        self
    }

    /// Attaches `value` under the key `K`, replacing any previous value for
    /// that key.
    pub fn insert_diagnostic<K: DiagnosticKey>(&mut self, value: K::Value) -> &mut Self {
        self.diagnostics.insert::<K>(value);
        self
    }

    /// By-value variant of [`insert_diagnostic`](Self::insert_diagnostic).
    #[must_use]
    pub fn attach<K: DiagnosticKey>(mut self, value: K::Value) -> Self {
        self.insert_diagnostic::<K>(value);
        self
    }

    /// Returns the value attached under `K`, if any.
    #[must_use]
    pub fn diagnostic<K: DiagnosticKey>(&self) -> Option<&K::Value> {
        self.diagnostics.get::<K>()
    }

    /// All attached diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Mutable access to the attached diagnostics.
    #[must_use]
    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub(crate) fn debug_named(&self, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(name)
            .field("message", &self.message)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }

    fn fmt_diagnostics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visible = self
            .diagnostics
            .iter()
            .filter(|diagnostic| !diagnostic.is_hidden())
            .peekable();
        while let Some(diagnostic) = visible.next() {
            let branch = if visible.peek().is_some() { '├' } else { '╰' };
            write!(f, "\n {branch} {}: {diagnostic}", diagnostic.key_name())?;
        }
        Ok(())
    }
}

impl fmt::Write for Exception {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.message.push_str(s);
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        write_or_rollback(&mut self.message, args)
    }
}

/// Appends `args` to `message`. On a formatting error `message` is left as
/// it was.
pub(crate) fn write_or_rollback(message: &mut String, args: fmt::Arguments<'_>) -> fmt::Result {
    let len = message.len();
    fmt::write(message, args).inspect_err(|_| message.truncate(len))
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if f.alternate() {
            self.fmt_diagnostics(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug_named("Exception", f)
    }
}

impl core::error::Error for Exception {}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString};
    use core::fmt::Write;

    use super::*;
    use crate::{diagnostic_key, handlers};

    diagnostic_key! {
        pub enum Offset: usize;
        pub enum Section: &'static str;
        pub enum Secret: u64 => handlers::Hidden;
    }

    struct Failing;

    impl fmt::Display for Failing {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("partial")?;
            Err(fmt::Error)
        }
    }

    fn exception(message: &str) -> Exception {
        let mut exception = Exception::new(message.to_string());
        exception.diagnostics_mut().clear();
        exception
    }

    #[test]
    fn test_exception_send_sync() {
        static_assertions::assert_impl_all!(Exception: Send, Sync, Clone, core::error::Error);
        static_assertions::assert_not_impl_any!(Exception: Default, Copy);
    }

    #[test]
    fn test_describe_returns_construction_message() {
        assert_eq!(exception("bad header").describe(), "bad header");
        assert_eq!(exception("").describe(), "");
    }

    #[test]
    fn test_push_message_concatenates_in_order() {
        let mut error = exception("bad header");
        error
            .push_message(" at offset ")
            .push_message(40)
            .push_message(format_args!(" ({}/{})", 1, 2));

        assert_eq!(error.describe(), "bad header at offset 40 (1/2)");
    }

    #[test]
    fn test_failed_append_is_rolled_back() {
        let mut error = exception("stable");
        error.push_message(Failing).push_message(" message");

        assert_eq!(error.describe(), "stable message");
    }

    #[test]
    fn test_failed_format_during_construction_does_not_panic() {
        use crate::kinds::{DataError, RuntimeError};

        let error = DataError::from_args(format_args!("{}", Failing));
        assert_eq!(error.describe(), "");

        let error = DataError::from_args(format_args!("header {}", 3));
        assert_eq!(error.describe(), "header 3");

        fn checked(value: u8) -> Result<(), DataError> {
            check!(DataError, value > 1, "value {} is {}", value, Failing);
            Ok(())
        }
        assert_eq!(checked(0).unwrap_err().describe(), "Assert failed: value > 1");

        fn raised() -> Result<(), RuntimeError> {
            raise!(RuntimeError, "lost {}", Failing)
        }
        assert_eq!(raised().unwrap_err().describe(), "");
    }

    #[test]
    fn test_write_macro_appends() {
        let mut error = exception("connection refused");
        write!(error, " after {} retries", 3).unwrap();

        assert_eq!(error.describe(), "connection refused after 3 retries");
        assert!(write!(error, "{}", Failing).is_err());
        assert_eq!(error.describe(), "connection refused after 3 retries");
    }

    #[test]
    fn test_clone_preserves_message_and_diagnostics() {
        let original = exception("bad header")
            .attach::<Offset>(40)
            .append(" in section")
            .attach::<Section>("meta");
        let copy = original.clone();
        let moved = original;

        for error in [&copy, &moved] {
            assert_eq!(error.describe(), "bad header in section");
            assert_eq!(error.diagnostic::<Offset>(), Some(&40));
            assert_eq!(error.diagnostic::<Section>(), Some(&"meta"));
        }
    }

    #[test]
    fn test_alternate_display_lists_visible_diagnostics() {
        let error = exception("bad header")
            .attach::<Offset>(40)
            .attach::<Secret>(1234)
            .attach::<Section>("meta");

        assert_eq!(format!("{error}"), "bad header");
        assert_eq!(
            format!("{error:#}"),
            "bad header\n ├ Offset: 40\n ╰ Section: meta"
        );
    }

    #[test]
    fn test_debug_output() {
        let error = exception("bad header").attach::<Offset>(40);

        assert_eq!(
            format!("{error:?}"),
            "Exception { message: \"bad header\", diagnostics: {\"Offset\": 40} }"
        );
    }

    #[test]
    fn test_creation_records_location() {
        use crate::hooks::builtin_hooks::location::CreatedAt;

        let line = line!() + 1;
        let error = Exception::new("located".to_string());

        // Location collection can be switched off through the environment.
        if let Some(location) = error.diagnostic::<CreatedAt>() {
            assert_eq!(location.file, file!());
            assert_eq!(location.line, line);
        }
    }
}
