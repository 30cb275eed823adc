//! The built-in exception kinds.
//!
//! | kind | base | raised for |
//! |---|---|---|
//! | [`SystemError`] | [`Exception`] | unexpected failures in third-party or OS APIs |
//! | [`DataError`] | [`Exception`] | parsing, loading or otherwise handling a data source |
//! | [`RuntimeError`] | [`Exception`] | program logic failures not covered by the other two |
//! | [`PlatformError`] | [`SystemError`] | a failing platform API call |
//!
//! A [`PlatformError`] raised by [`win_check!`](crate::win_check) always
//! carries the OS error code under
//! [`PlatformErrorInfo`](crate::platform::PlatformErrorInfo).
//!
//! [`Exception`]: crate::Exception

error_kind! {
    /// Base type for system errors.
    ///
    /// System errors are generated by unexpected failures within third-party
    /// APIs.
    pub type SystemError = Error<SystemErrorTag>;

    /// Base type for data errors.
    ///
    /// Data errors are generated by failures during parsing, loading, or
    /// otherwise handling some data source.
    pub type DataError = Error<DataErrorTag>;

    /// Base type for runtime errors.
    ///
    /// Runtime errors are generated by errors in program logic which do not
    /// fall under [`SystemError`] or [`DataError`].
    pub type RuntimeError = Error<RuntimeErrorTag>;

    /// A failing platform API call.
    ///
    /// This is a [`SystemError`]: it converts into one with
    /// [`into_base`](crate::Error::into_base) or [`From`], and
    /// [`Raised::catch`](crate::Raised::catch) accepts it as one.
    pub type PlatformError = Error<PlatformErrorTag, SystemError>;
}

impl From<PlatformError> for SystemError {
    #[inline]
    fn from(error: PlatformError) -> Self {
        error.into_base()
    }
}
