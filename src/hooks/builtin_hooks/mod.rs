//! Built-in hooks provided by spire-error.
//!
//! - **[`location`]**: records the source location ([`Location`]) where each
//!   exception was created. Active by default, even without installing any
//!   hooks. Use [`Hooks::new_without_locations()`] to build hooks without it.
//!
//! [`Location`]: location::Location
//! [`Hooks::new_without_locations()`]: crate::hooks::Hooks::new_without_locations

pub mod location;
