//! Platform error codes.
//!
//! Platform APIs commonly report failure through a return value and leave
//! the reason in a thread-local slot: `GetLastError` on Windows, `errno`
//! elsewhere. [`PlatformErrorCode::last`] reads that slot, and
//! [`win_check!`](crate::win_check) attaches the code to the
//! [`PlatformError`](crate::kinds::PlatformError) it raises under the
//! [`PlatformErrorInfo`] key.

use core::fmt;

/// A numeric OS error code.
///
/// The value is the raw code as reported by the platform, i.e. what
/// [`std::io::Error::raw_os_error`] would return.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct PlatformErrorCode(pub i32);

impl PlatformErrorCode {
    /// Reads the calling thread's last OS error code.
    ///
    /// This must be called immediately after the failing platform call:
    /// almost any other call, including allocation, may overwrite the slot.
    #[cfg(feature = "std")]
    #[inline]
    #[must_use]
    pub fn last() -> Self {
        Self(
            std::io::Error::last_os_error()
                .raw_os_error()
                .unwrap_or_default(),
        )
    }

    /// The raw code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PlatformErrorCode {
    #[cfg(feature = "std")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&std::io::Error::from_raw_os_error(self.0), f)
    }

    #[cfg(not(feature = "std"))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "os error {}", self.0)
    }
}

impl From<i32> for PlatformErrorCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

#[cfg(feature = "std")]
impl From<PlatformErrorCode> for std::io::Error {
    fn from(code: PlatformErrorCode) -> Self {
        std::io::Error::from_raw_os_error(code.0)
    }
}

diagnostic_key! {
    /// Key for the OS error code attached to a
    /// [`PlatformError`](crate::kinds::PlatformError).
    pub enum PlatformErrorInfo: PlatformErrorCode;
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn test_display_mentions_code() {
        let rendered = format!("{}", PlatformErrorCode(2));
        assert!(rendered.contains("os error 2"), "{rendered}");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(PlatformErrorCode::from(5).code(), 5);

        #[cfg(feature = "std")]
        {
            let io: std::io::Error = PlatformErrorCode(5).into();
            assert_eq!(io.raw_os_error(), Some(5));
        }
    }
}
