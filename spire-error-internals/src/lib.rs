#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_docs_in_private_items,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`spire-error`].
//!
//! # Overview
//!
//! This crate contains the type-erased storage used for diagnostic
//! attachments. An exception can carry any number of typed values, each
//! stored behind a [`RawDiagnostic`] which remembers the concrete value type
//! and the [`DiagnosticHandler`] used to format it.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`spire-error`] crate,
//! not this one.
//!
//! # Architecture
//!
//! - **[`RawDiagnostic`]**: Reference-counted, type-erased payload. Cloning a
//!   diagnostic shares the payload, which keeps copying an exception cheap.
//! - **[`handlers`]**: The [`DiagnosticHandler`] trait controlling how a
//!   payload is rendered.
//!
//! Type erasure goes through a private object-safe trait implemented for
//! every `(value, handler)` pair.
//!
//! [`spire-error`]: https://docs.rs/spire-error
//! [`DiagnosticHandler`]: handlers::DiagnosticHandler

extern crate alloc;

mod diagnostic;
pub mod handlers;

pub use diagnostic::RawDiagnostic;
