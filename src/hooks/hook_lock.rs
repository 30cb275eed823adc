#[cfg(feature = "std")]
use std::sync::{RwLock, RwLockReadGuard as ReadGuard};

#[cfg(not(feature = "std"))]
use spin::{RwLock, RwLockReadGuard as ReadGuard};

/// A global slot holding at most one value, guarded by `std::sync::RwLock`
/// with `std`, or by `spin::RwLock` without it.
///
/// Writes are scoped to a closure. Reads hand out a guard, so hooks run
/// under it keep their `#[track_caller]` location.
pub(crate) struct HookLock<T: 'static + Send + Sync> {
    slot: RwLock<Option<T>>,
}

impl<T: 'static + Send + Sync> HookLock<T> {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Shared access to the slot.
    pub(crate) fn read(&self) -> ReadGuard<'_, Option<T>> {
        #[cfg(feature = "std")]
        let guard = self
            .slot
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        #[cfg(not(feature = "std"))]
        let guard = self.slot.read();

        guard
    }

    /// Runs `f` with exclusive access to the slot.
    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(&mut Option<T>) -> R) -> R {
        // Poisoning is ignored: the slot is only ever assigned whole values.
        #[cfg(feature = "std")]
        let mut guard = self
            .slot
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        #[cfg(not(feature = "std"))]
        let mut guard = self.slot.write();

        f(&mut guard)
    }
}
