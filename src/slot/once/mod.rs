//! `OnceSlot` - a thread-safe slot holding at most one instance.
//!
//! The accessor is check-lock-check: an acquire load on the fast path, then a
//! bounded spin, then the slot lock with a re-check before construction. The
//! value write is published with a release store, so construction
//! happens-before any observation on any thread.

mod inner;

use core::convert::Infallible;
use core::fmt;
use std::sync::atomic::Ordering;
use std::sync::{Mutex, PoisonError};

use crossbeam_utils::Backoff;

use inner::Inner;

/// A thread-safe slot holding at most one instance of `T`.
///
/// The slot is an ordinary value: construct fresh ones per test, embed one in
/// an owner struct, or place one in a `static` for the process-wide idiom.
/// Exactly one construction occurs per slot, even when many threads race on
/// the accessor; every caller sees the same instance afterwards.
///
/// A failed construction (error or panic) publishes nothing: the slot stays
/// empty and a later caller may retry.
pub struct OnceSlot<T> {
    inner: Inner<T>,
    lock: Mutex<()>,
}

// SAFETY: the value is only written once, under the slot lock, and only read
// after the release-published `ready` flag is observed with acquire ordering.
unsafe impl<T: Send> Send for OnceSlot<T> {}
unsafe impl<T: Send + Sync> Sync for OnceSlot<T> {}

impl<T> OnceSlot<T> {
    /// Creates a new empty slot.
    #[inline]
    pub const fn new() -> Self {
        Self {
            inner: Inner::empty(),
            lock: Mutex::new(()),
        }
    }

    /// Creates a slot that is already initialized with `value`.
    ///
    /// Equivalent to eager initialization at construction time: no accessor
    /// call can ever race with construction.
    #[inline]
    pub const fn with_value(value: T) -> Self {
        Self {
            inner: Inner::with_value(value),
            lock: Mutex::new(()),
        }
    }

    /// Returns `true` if the slot has been initialized.
    #[inline(always)]
    pub fn is_initialized(&self) -> bool {
        self.inner.ready.load(Ordering::Acquire)
    }

    /// Gets a reference to the instance if initialized.
    ///
    /// Fast path only: one atomic load, never blocks, never locks.
    #[inline(always)]
    pub fn get(&self) -> Option<&T> {
        if self.inner.ready.load(Ordering::Acquire) {
            // SAFETY: `ready` was observed `true` with acquire ordering, which
            // pairs with the release store after the value write.
            Some(unsafe { self.inner.value_ref() })
        } else {
            None
        }
    }

    /// Gets the instance, constructing it with `init` if the slot is empty.
    ///
    /// If several threads call this concurrently on an empty slot, exactly one
    /// runs `init`; the rest block until the instance is published and then
    /// return it. All returned references have the same identity.
    #[inline]
    pub fn get_or_init<F>(&self, init: F) -> &T
    where
        F: FnOnce() -> T,
    {
        match self.get_or_try_init(|| Ok::<T, Infallible>(init())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Gets the instance, constructing it with a fallible `init` if empty.
    ///
    /// # Errors
    ///
    /// Propagates the constructor's error to the caller that ran it. The slot
    /// remains empty, so a subsequent call retries construction.
    #[inline]
    pub fn get_or_try_init<F, E>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.get() {
            return Ok(value);
        }
        self.try_init_slow(init)
    }

    /// Sets the instance if the slot is empty.
    ///
    /// First write wins.
    ///
    /// # Errors
    ///
    /// Returns `Err(value)` if the slot was already initialized.
    pub fn set(&self, value: T) -> Result<(), T> {
        if self.inner.ready.load(Ordering::Acquire) {
            return Err(value);
        }

        let guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.inner.ready.load(Ordering::Acquire) {
            drop(guard);
            return Err(value);
        }
        // SAFETY: `ready` is false and we hold the slot lock.
        unsafe { self.inner.write(value) };
        self.inner.ready.store(true, Ordering::Release);
        drop(guard);
        Ok(())
    }

    /// Gets an exclusive reference to the instance if initialized.
    ///
    /// Needs no synchronization because `&mut self` guarantees exclusivity.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if *self.inner.ready.get_mut() {
            // SAFETY: exclusive access; the slot is initialized.
            Some(unsafe { self.inner.value_mut() })
        } else {
            None
        }
    }

    /// Takes the instance out, leaving the slot empty.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        if core::mem::replace(self.inner.ready.get_mut(), false) {
            // SAFETY: the slot was initialized; `ready` is now cleared, so the
            // value will not be dropped again.
            Some(unsafe { self.inner.read_value() })
        } else {
            None
        }
    }

    /// Consumes the slot, returning the instance if it was initialized.
    #[inline]
    pub fn into_inner(mut self) -> Option<T> {
        self.take()
    }

    #[cold]
    fn try_init_slow<F, E>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        // Another caller may be mid-construction; a winner that is already
        // past its constructor will publish soon, so spin briefly before
        // blocking on the lock.
        let backoff = Backoff::new();
        while !backoff.is_completed() {
            if let Some(value) = self.get() {
                return Ok(value);
            }
            backoff.snooze();
        }

        // A panicked constructor poisons the mutex but publishes nothing, so
        // the protected state is still consistent. Clear the poison and let
        // this caller attempt construction.
        let guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Re-check under the lock: the previous holder may have initialized
        // the slot while this thread was waiting.
        if !self.inner.ready.load(Ordering::Acquire) {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "solo::slot", "slow path: running constructor");

            let value = init()?;

            // SAFETY: `ready` is false and we hold the slot lock, so no other
            // thread touches the value concurrently.
            unsafe { self.inner.write(value) };
            // Publish. Pairs with the acquire load on the fast path: the value
            // write above happens-before any observation of `ready == true`.
            self.inner.ready.store(true, Ordering::Release);

            #[cfg(feature = "tracing")]
            tracing::trace!(target: "solo::slot", "slow path: instance published");
        }
        drop(guard);

        // SAFETY: `ready` is true; either this thread just published or the
        // re-check observed another thread's publication.
        Ok(unsafe { self.inner.value_ref() })
    }
}

impl<T> Default for OnceSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<T> for OnceSlot<T> {
    fn from(value: T) -> Self {
        Self::with_value(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for OnceSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OnceSlot").field(&self.get()).finish()
    }
}

impl<T> Drop for OnceSlot<T> {
    fn drop(&mut self) {
        if *self.inner.ready.get_mut() {
            // SAFETY: exclusive access in drop; the slot is initialized.
            unsafe { self.inner.drop_value() };
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::OnceSlot;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<T: Serialize> Serialize for OnceSlot<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.get().serialize(serializer)
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for OnceSlot<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(match Option::<T>::deserialize(deserializer)? {
                Some(value) => OnceSlot::with_value(value),
                None => OnceSlot::new(),
            })
        }
    }
}

#[cfg(feature = "proptest")]
pub mod strategies {
    //! Proptest strategies for slots.

    use super::OnceSlot;
    use proptest::prelude::*;

    /// Strategy producing an empty or pre-initialized slot from a value
    /// strategy.
    pub fn once_slot<T, S>(value: S) -> impl Strategy<Value = OnceSlot<T>>
    where
        T: core::fmt::Debug,
        S: Strategy<Value = T>,
    {
        proptest::option::of(value).prop_map(|opt| match opt {
            Some(v) => OnceSlot::with_value(v),
            None => OnceSlot::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::OnceSlot;

    #[test]
    fn test_empty_slot_reads_nothing() {
        let slot: OnceSlot<u32> = OnceSlot::new();
        assert!(!slot.is_initialized());
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn test_with_value_is_initialized() {
        let slot = OnceSlot::with_value(7u32);
        assert!(slot.is_initialized());
        assert_eq!(slot.get(), Some(&7));
        assert_eq!(slot.get_or_init(|| 9), &7);
    }

    #[test]
    fn test_first_set_wins() {
        let slot = OnceSlot::new();
        assert_eq!(slot.set(1), Ok(()));
        assert_eq!(slot.set(2), Err(2));
        assert_eq!(slot.get(), Some(&1));
    }

    #[test]
    fn test_drop_runs_destructor_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static DROPS: AtomicUsize = AtomicUsize::new(0);
        struct Counted;
        impl Drop for Counted {
            fn drop(&mut self) {
                DROPS.fetch_add(1, Ordering::SeqCst);
            }
        }

        let slot = OnceSlot::new();
        slot.get_or_init(|| Counted);
        drop(slot);
        assert_eq!(DROPS.load(Ordering::SeqCst), 1);
    }
}
