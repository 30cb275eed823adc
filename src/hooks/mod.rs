//! Hooks run whenever an exception is created.
//!
//! # Quick Start
//!
//! ```rust
//! use spire_error::{diagnostic_key, hooks::Hooks};
//!
//! diagnostic_key! {
//!     /// Identifier of the request being served.
//!     pub enum RequestId: u64;
//! }
//!
//! // Attach the current request ID to every exception
//! Hooks::new()
//!     .diagnostic_collector::<RequestId, _>(current_request_id)
//!     .install()
//!     .expect("failed to install hooks");
//!
//! fn current_request_id() -> u64 {
//!     42
//! } // Your implementation here
//! ```
//!
//! # Hook Types
//!
//! - [`DiagnosticCollector`]: produces one diagnostic value, attached under
//!   its key to every new exception. Implemented for closures.
//! - [`CreationHook`]: gets mutable access to the [`Diagnostics`] of every
//!   new exception, e.g. to attach several values at once.
//!
//! Hooks run in registration order, synchronously, on the thread creating
//! the exception. They run for exceptions raised through the macros too, so
//! they should be cheap.
//!
//! Hooks only ever see diagnostics. The message of a new exception is
//! exactly the text it was constructed with, whatever hooks are installed.
//!
//! # Defaults
//!
//! When no hooks are installed, the source location of every new exception
//! is recorded under [`CreatedAt`]. Setting the `SPIRE_ERROR_LOCATION`
//! environment variable to `0`, `off` or `false` turns this off. Installed
//! hooks replace the defaults entirely; [`Hooks::new`] starts from location
//! collection and [`Hooks::new_without_locations`] starts empty.
//!
//! [`CreatedAt`]: builtin_hooks::location::CreatedAt

pub mod builtin_hooks;
mod hook_lock;

use alloc::vec::Vec;
use core::{fmt, marker::PhantomData, panic::Location};

use triomphe::Arc;
use unsize::CoerceUnsize;

use self::{
    builtin_hooks::location::{CreatedAt, LocationCollector, LocationOptions},
    hook_lock::HookLock,
};
use crate::{diagnostics::Diagnostics, markers::DiagnosticKey};

static HOOKS: HookLock<Hooks> = HookLock::new();

trait UntypedCreationHook: 'static + Send + Sync + fmt::Display {
    #[track_caller]
    fn run(&self, diagnostics: &mut Diagnostics);
}

/// A hook that is called with the diagnostics of every new exception.
///
/// If you only need to attach a single value, a [`DiagnosticCollector`] is
/// simpler.
///
/// # Examples
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use spire_error::{
///     diagnostic_key,
///     diagnostics::Diagnostics,
///     hooks::{CreationHook, Hooks},
/// };
///
/// diagnostic_key! {
///     /// Sequence number of the exception within this process.
///     pub enum Sequence: usize;
/// }
///
/// struct CountingHook {
///     created: AtomicUsize,
/// }
///
/// impl CreationHook for CountingHook {
///     fn on_creation(&self, diagnostics: &mut Diagnostics) {
///         let count = self.created.fetch_add(1, Ordering::Relaxed);
///         diagnostics.insert::<Sequence>(count);
///     }
/// }
///
/// Hooks::new_without_locations()
///     .creation_hook(CountingHook {
///         created: AtomicUsize::new(0),
///     })
///     .install()
///     .expect("failed to install hooks");
/// ```
pub trait CreationHook: 'static + Send + Sync {
    /// Called with the diagnostics of every newly created exception, before
    /// the exception is returned to the code creating it.
    #[track_caller]
    fn on_creation(&self, diagnostics: &mut Diagnostics);
}

/// Collects a value to be attached under the key `K` to every new exception.
///
/// Implemented for every closure returning `K::Value`.
pub trait DiagnosticCollector<K: DiagnosticKey>: 'static + Send + Sync {
    /// Produces the value to attach.
    #[track_caller]
    fn collect(&self) -> K::Value;
}

impl<K, F> DiagnosticCollector<K> for F
where
    K: DiagnosticKey,
    F: 'static + Send + Sync + Fn() -> K::Value,
{
    fn collect(&self) -> K::Value {
        self()
    }
}

#[track_caller]
fn creation_hook_to_untyped<H>(hook: H) -> Arc<dyn UntypedCreationHook>
where
    H: CreationHook,
{
    struct Hook<H> {
        hook: H,
        added_at: &'static Location<'static>,
    }

    impl<H> fmt::Display for Hook<H> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "Creation hook {} registered at {}:{}",
                core::any::type_name::<H>(),
                self.added_at.file(),
                self.added_at.line()
            )
        }
    }

    impl<H> UntypedCreationHook for Hook<H>
    where
        H: CreationHook,
    {
        #[track_caller]
        fn run(&self, diagnostics: &mut Diagnostics) {
            self.hook.on_creation(diagnostics);
        }
    }

    let hook: Hook<H> = Hook {
        hook,
        added_at: Location::caller(),
    };
    Arc::new(hook).unsize(unsize::Coercion!(to dyn UntypedCreationHook))
}

#[track_caller]
fn collector_to_untyped<K, C>(collector: C) -> Arc<dyn UntypedCreationHook>
where
    K: DiagnosticKey,
    C: DiagnosticCollector<K>,
{
    struct Hook<K, C> {
        collector: C,
        added_at: &'static Location<'static>,
        _key: PhantomData<fn(K) -> K>,
    }

    impl<K, C> fmt::Display for Hook<K, C>
    where
        K: DiagnosticKey,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "Diagnostic collector {} for key {} registered at {}:{}",
                core::any::type_name::<C>(),
                K::NAME,
                self.added_at.file(),
                self.added_at.line()
            )
        }
    }

    impl<K, C> UntypedCreationHook for Hook<K, C>
    where
        K: DiagnosticKey,
        C: DiagnosticCollector<K>,
    {
        #[track_caller]
        fn run(&self, diagnostics: &mut Diagnostics) {
            let value = self.collector.collect();
            diagnostics.insert::<K>(value);
        }
    }

    let hook: Hook<K, C> = Hook {
        collector,
        added_at: Location::caller(),
        _key: PhantomData,
    };
    Arc::new(hook).unsize(unsize::Coercion!(to dyn UntypedCreationHook))
}

/// Builder for the set of hooks run on exception creation.
///
/// Only one set of hooks is active at a time. Build it, then call
/// [`install`](Self::install) or [`replace`](Self::replace).
///
/// # Examples
///
/// ```rust
/// use spire_error::{diagnostic_key, hooks::Hooks};
///
/// diagnostic_key! {
///     /// Name of the deployment environment.
///     pub enum Environment: &'static str;
/// }
///
/// Hooks::new()
///     .diagnostic_collector::<Environment, _>(|| "production")
///     .install()
///     .expect("failed to install hooks");
///
/// // A second installation is rejected
/// assert!(Hooks::new().install().is_err());
/// ```
#[derive(Clone)]
pub struct Hooks {
    creation: Vec<Arc<dyn UntypedCreationHook>>,
    created_at: &'static Location<'static>,
}

impl Default for Hooks {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Entry<'a>(&'a dyn UntypedCreationHook);

        impl fmt::Debug for Entry<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self.0, f)
            }
        }

        f.debug_struct("Hooks")
            .field(
                "creation",
                &self
                    .creation
                    .iter()
                    .map(|hook| Entry(&**hook))
                    .collect::<Vec<_>>(),
            )
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Error returned when attempting to install hooks while hooks are already
/// installed.
///
/// Contains the hooks that were rejected, so they can be recovered.
pub struct HooksAlreadyInstalledError(pub Hooks);

impl fmt::Debug for HooksAlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HooksAlreadyInstalledError").finish()
    }
}

impl fmt::Display for HooksAlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hooks are already installed globally")
    }
}

impl core::error::Error for HooksAlreadyInstalledError {}

impl Hooks {
    /// Creates a builder that records the creation location of every
    /// exception.
    ///
    /// See also [`new_without_locations`](Self::new_without_locations).
    #[track_caller]
    #[must_use]
    pub fn new() -> Self {
        Self::new_without_locations().diagnostic_collector::<CreatedAt, _>(LocationCollector)
    }

    /// Creates an empty builder.
    #[track_caller]
    #[must_use]
    pub fn new_without_locations() -> Self {
        Self {
            creation: Vec::new(),
            created_at: Location::caller(),
        }
    }

    /// Registers a collector whose value is attached under `K` to every new
    /// exception.
    #[track_caller]
    #[must_use]
    pub fn diagnostic_collector<K, C>(mut self, collector: C) -> Self
    where
        K: DiagnosticKey,
        C: DiagnosticCollector<K>,
    {
        self.creation.push(collector_to_untyped::<K, C>(collector));
        self
    }

    /// Registers a general creation hook.
    #[track_caller]
    #[must_use]
    pub fn creation_hook<H>(mut self, hook: H) -> Self
    where
        H: CreationHook,
    {
        self.creation.push(creation_hook_to_untyped(hook));
        self
    }

    /// The number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creation.len()
    }

    /// Whether no hooks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creation.is_empty()
    }

    /// Installs the hooks globally.
    ///
    /// If hooks are already installed, returns a
    /// [`HooksAlreadyInstalledError`] holding `self`. See also
    /// [`replace`](Self::replace).
    pub fn install(self) -> Result<(), HooksAlreadyInstalledError> {
        HOOKS.with_mut(|slot| {
            if slot.is_some() {
                return Err(HooksAlreadyInstalledError(self));
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(target: "spire_error", hooks = self.len(), "installing exception hooks");

            *slot = Some(self);
            Ok(())
        })
    }

    /// Installs the hooks globally, returning the previously installed
    /// hooks, if any.
    pub fn replace(self) -> Option<Hooks> {
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "spire_error", hooks = self.len(), "replacing exception hooks");

        HOOKS.with_mut(|slot| slot.replace(self))
    }

    /// Removes the installed hooks, restoring the default behavior.
    pub fn uninstall() -> Option<Hooks> {
        HOOKS.with_mut(Option::take)
    }
}

#[track_caller]
pub(crate) fn run_creation_hooks(diagnostics: &mut Diagnostics) {
    let hooks = HOOKS.read();
    match &*hooks {
        Some(hooks) => {
            for hook in &hooks.creation {
                hook.run(diagnostics);
            }
        }
        None => {
            if LocationOptions::get().enabled {
                let location = DiagnosticCollector::<CreatedAt>::collect(&LocationCollector);
                diagnostics.insert::<CreatedAt>(location);
            }
        }
    }
}
