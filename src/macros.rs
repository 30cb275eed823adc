/// Returns early with an exception of the given kind if a condition is false.
///
/// The message is `Assert failed: ` followed by the source text of the
/// condition. Extra arguments are formatted as with [`format!()`] and
/// appended after a `": "` separator.
///
/// The condition is evaluated exactly once. The enclosing function must
/// return a `Result` whose error type implements `From<Kind>`, such as the
/// kind itself, one of its bases, [`Raised`] or `Box<dyn Error>`.
///
/// [`format!()`]: std::format
/// [`Raised`]: crate::Raised
///
/// # Examples
///
/// ```
/// use spire_error::prelude::*;
///
/// fn parse_header(bytes: &[u8]) -> Result<u8, DataError> {
///     check!(DataError, bytes.len() >= 4);
///     check!(DataError, bytes[0] == 0x7f, "bad magic byte {:#x}", bytes[0]);
///     Ok(bytes[3])
/// }
///
/// assert_eq!(
///     parse_header(&[1, 2]).unwrap_err().describe(),
///     "Assert failed: bytes.len() >= 4"
/// );
/// assert_eq!(
///     parse_header(&[0, 0, 0, 0]).unwrap_err().describe(),
///     "Assert failed: bytes[0] == 0x7f: bad magic byte 0x0"
/// );
/// assert_eq!(parse_header(&[0x7f, 0, 0, 9]).unwrap(), 9);
/// ```
#[macro_export]
macro_rules! check {
    ($kind:ty, $cond:expr $(,)?) => {
        if !$cond {
            return $crate::__private::Err($crate::__private::From::from(
                $crate::__private::check_failed::<$kind>($crate::__private::concat!(
                    "Assert failed: ",
                    $crate::__private::stringify!($cond)
                )),
            ));
        }
    };
    ($kind:ty, $cond:expr, $($arg:tt)+) => {
        if !$cond {
            return $crate::__private::Err($crate::__private::From::from(
                $crate::__private::check_failed_with::<$kind>(
                    $crate::__private::concat!(
                        "Assert failed: ",
                        $crate::__private::stringify!($cond)
                    ),
                    $crate::__private::format_args!($($arg)+),
                ),
            ));
        }
    };
}

/// Returns early with a [`PlatformError`] if a platform call reported failure.
///
/// When the condition is false, the calling thread's last OS error code
/// (`GetLastError` on Windows, `errno` elsewhere) is read before anything
/// else runs, and attached under [`PlatformErrorInfo`]. The message is the
/// same as for [`check!`].
///
/// [`PlatformError`]: crate::kinds::PlatformError
/// [`PlatformErrorInfo`]: crate::platform::PlatformErrorInfo
///
/// # Examples
///
/// ```
/// use spire_error::prelude::*;
///
/// fn open_config() -> Result<std::fs::File, PlatformError> {
///     let file = std::fs::File::open("/nonexistent/app.toml");
///     win_check!(file.is_ok());
///     Ok(file.unwrap())
/// }
///
/// let error = open_config().unwrap_err();
/// assert_eq!(error.describe(), "Assert failed: file.is_ok()");
/// assert!(error.diagnostic::<PlatformErrorInfo>().is_some());
/// ```
#[cfg(feature = "std")]
#[macro_export]
macro_rules! win_check {
    ($cond:expr $(,)?) => {
        if !$cond {
            let code = $crate::platform::PlatformErrorCode::last();
            return $crate::__private::Err($crate::__private::From::from(
                $crate::__private::platform_check_failed(
                    code,
                    $crate::__private::concat!(
                        "Assert failed: ",
                        $crate::__private::stringify!($cond)
                    ),
                ),
            ));
        }
    };
}

/// Returns early with an exception of the given kind and a formatted message.
///
/// This is equivalent to writing
/// `return Err(Kind::from_args(format_args!(...)).into());`
///
/// # Examples
///
/// ```
/// use spire_error::prelude::*;
///
/// fn lookup(id: u32) -> Result<&'static str, Raised> {
///     match id {
///         1 => Ok("root"),
///         _ => raise!(RuntimeError, "no user with id {}", id),
///     }
/// }
///
/// let error = lookup(7).unwrap_err();
/// assert!(error.is::<RuntimeError>());
/// assert_eq!(error.describe(), "no user with id 7");
/// ```
#[macro_export]
macro_rules! raise {
    ($kind:ty, $($arg:tt)+) => {
        return $crate::__private::Err($crate::__private::From::from(
            $crate::__private::raise::<$kind>($crate::__private::format_args!($($arg)+)),
        ))
    };
}

/// Declares exception kinds.
///
/// Each declaration has the form `type Name = Error<NameTag>;` or, to
/// derive from another kind, `type Name = Error<NameTag, Base>;`. The tag
/// type is generated alongside the alias, and the kind's
/// [`NAME`](crate::ErrorKind::NAME) is the alias name.
///
/// # Examples
///
/// ```
/// use spire_error::prelude::*;
///
/// error_kind! {
///     /// Failures while talking to the storage backend.
///     pub type StorageError = Error<StorageErrorTag, SystemError>;
///
///     /// A storage object that does not exist.
///     pub type NotFoundError = Error<NotFoundErrorTag, StorageError>;
/// }
///
/// let error = NotFoundError::new("bucket `logs` not found");
/// assert!(format!("{error:?}").starts_with(r#"NotFoundError { message: "bucket `logs` not found""#));
///
/// let raised = Raised::from(error);
/// assert!(raised.is::<StorageError>());
/// assert!(raised.is::<SystemError>());
/// assert!(!raised.is::<DataError>());
/// ```
#[macro_export]
macro_rules! error_kind {
    ($(
        $(#[$meta:meta])*
        $vis:vis type $name:ident = Error<$tag:ident $(, $base:ty)?>;
    )*) => {$(
        #[doc = $crate::__private::concat!("Tag of [`", $crate::__private::stringify!($name), "`].")]
        #[derive(Copy, Clone, Debug)]
        $vis enum $tag {}

        impl $crate::markers::Tag for $tag {
            const NAME: &'static str = $crate::__private::stringify!($name);
        }

        $(#[$meta])*
        $vis type $name = $crate::Error<$tag $(, $base)?>;
    )*};
}

/// Declares diagnostic keys.
///
/// Each declaration has the form `enum Key: Value;`, or
/// `enum Key: Value => Handler;` to pick a formatting handler other than
/// [`handlers::Display`](crate::handlers::Display).
///
/// # Examples
///
/// ```
/// use spire_error::prelude::*;
///
/// diagnostic_key! {
///     /// Byte offset into the input.
///     pub enum Offset: usize;
///
///     /// Raw bytes around the failure.
///     pub enum Window: Vec<u8> => handlers::Debug;
/// }
///
/// let error = DataError::new("unexpected token")
///     .attach::<Offset>(112)
///     .attach::<Window>(vec![0x22, 0x7b]);
/// assert_eq!(error.diagnostic::<Offset>(), Some(&112));
/// assert!(format!("{error:#}").ends_with("\n ├ Offset: 112\n ╰ Window: [34, 123]"));
/// ```
#[macro_export]
macro_rules! diagnostic_key {
    ($(
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $value:ty $(=> $handler:ty)?;
    )*) => {$(
        $(#[$meta])*
        #[derive(Copy, Clone, Debug)]
        $vis enum $name {}

        impl $crate::markers::DiagnosticKey for $name {
            type Value = $value;
            type Handler = $crate::__diagnostic_key_handler!($($handler)?);
            const NAME: &'static str = $crate::__private::stringify!($name);
        }
    )*};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __diagnostic_key_handler {
    () => {
        $crate::handlers::Display
    };
    ($handler:ty) => {
        $handler
    };
}
