//! `LazySlot` - a slot packaged with its one-shot initializer.
//!
//! The initializer is the sole path to construction: holding a `LazySlot` is
//! holding the factory, so no other code can reach the constructor.

use core::fmt;
use core::ops::Deref;
use std::cell::UnsafeCell;

use super::once::OnceSlot;

/// A single instance constructed on first access by a stored initializer.
///
/// Dereferencing forces construction. The initializer runs at most once; every
/// dereference afterwards returns the same instance.
///
/// Methods are associated functions, `LazySlot::force(&slot)` style, so they
/// never shadow methods of the instance reached through `Deref`.
pub struct LazySlot<T, F = fn() -> T> {
    slot: OnceSlot<T>,
    init: UnsafeCell<Option<F>>,
}

// SAFETY: the initializer is only taken inside the slot's critical section,
// so at most one thread ever touches it; `T` is shared across threads.
unsafe impl<T: Send + Sync, F: Send> Sync for LazySlot<T, F> {}

impl<T, F: FnOnce() -> T> LazySlot<T, F> {
    /// Creates a slot that will construct its instance with `init`.
    #[inline]
    pub const fn new(init: F) -> Self {
        Self {
            slot: OnceSlot::new(),
            init: UnsafeCell::new(Some(init)),
        }
    }

    /// Forces construction and returns the instance.
    ///
    /// # Panics
    ///
    /// Panics if the initializer panicked on a previous call: the one-shot
    /// initializer was consumed by that attempt, so there is nothing left to
    /// retry with. Failing loudly here rules out any silent placeholder state.
    pub fn force(this: &Self) -> &T {
        this.slot.get_or_init(|| {
            // SAFETY: `get_or_init` runs this closure inside the slot's
            // critical section, at most one thread at a time and never after
            // publication, so no other thread touches `init` concurrently.
            let init = unsafe { (*this.init.get()).take() };
            match init {
                Some(f) => f(),
                None => panic!("LazySlot initializer panicked on a previous call"),
            }
        })
    }

    /// Gets the instance if already constructed, without forcing.
    #[inline(always)]
    pub fn get(this: &Self) -> Option<&T> {
        this.slot.get()
    }

    /// Returns `true` if the instance has been constructed.
    #[inline]
    pub fn is_initialized(this: &Self) -> bool {
        this.slot.is_initialized()
    }

    /// Consumes the slot, returning the instance or the unused initializer.
    ///
    /// # Errors
    ///
    /// Returns `Err(init)` if the instance was never constructed.
    ///
    /// # Panics
    ///
    /// Panics if the initializer panicked on a previous call, as with
    /// [`LazySlot::force`].
    pub fn into_inner(this: Self) -> Result<T, F> {
        let Self { slot, init } = this;
        match slot.into_inner() {
            Some(value) => Ok(value),
            // The instance was never constructed, so the initializer is
            // still in place.
            None => match init.into_inner() {
                Some(f) => Err(f),
                None => panic!("LazySlot initializer panicked on a previous call"),
            },
        }
    }
}

impl<T, F: FnOnce() -> T> Deref for LazySlot<T, F> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        Self::force(self)
    }
}

impl<T: Default> Default for LazySlot<T, fn() -> T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for LazySlot<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LazySlot").field(&self.slot.get()).finish()
    }
}
