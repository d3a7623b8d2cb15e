//! Accessor seam shared by the slot variants.

use super::eager::EagerSlot;
use super::lazy::LazySlot;

/// Shared access to a single instance.
///
/// Every call returns a reference to the same instance (identity, not just
/// equality). Whether construction already happened (`EagerSlot`) or is
/// forced by the call (`LazySlot`) is the implementor's business; calling
/// code observes the same guarantee either way.
pub trait SharedInstance {
    /// The instance type held by the implementor.
    type Instance;

    /// Returns the shared instance, constructing it first if needed.
    fn instance(&self) -> &Self::Instance;
}

impl<T> SharedInstance for EagerSlot<T> {
    type Instance = T;

    #[inline]
    fn instance(&self) -> &T {
        self.get()
    }
}

impl<T, F: FnOnce() -> T> SharedInstance for LazySlot<T, F> {
    type Instance = T;

    #[inline]
    fn instance(&self) -> &T {
        LazySlot::force(self)
    }
}
