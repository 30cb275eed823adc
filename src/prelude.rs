//! Commonly used items for convenient importing.
//!
//! ```rust
//! use spire_error::prelude::*;
//!
//! fn divide(a: i32, b: i32) -> Result<i32, RuntimeError> {
//!     check!(RuntimeError, b != 0, "cannot divide {} by zero", a);
//!     Ok(a / b)
//! }
//!
//! assert_eq!(divide(10, 2).unwrap(), 5);
//! assert_eq!(
//!     divide(1, 0).unwrap_err().describe(),
//!     "Assert failed: b != 0: cannot divide 1 by zero"
//! );
//! ```
//!
//! This includes the [`Exception`], [`Error`] and [`Raised`] types, the
//! built-in [kinds](crate::kinds), the platform error code types, the
//! [`handlers`] and [`markers`] modules, and all macros.

#[cfg(feature = "std")]
pub use crate::win_check;
pub use crate::{
    Error, ErrorKind, Exception, Raised, check, diagnostic_key, error_kind, handlers,
    kinds::{DataError, PlatformError, RuntimeError, SystemError},
    markers::{self, DiagnosticKey, Tag},
    platform::{PlatformErrorCode, PlatformErrorInfo},
    raise,
};
