use core::mem::MaybeUninit;
use core::ptr;
use std::cell::UnsafeCell;
use std::sync::atomic::AtomicBool;

/// Raw storage for a `OnceSlot`.
///
/// Layout note: store `value` first; keep `ready` in tail padding.
pub(super) struct Inner<T> {
    pub(super) value: UnsafeCell<MaybeUninit<T>>,
    pub(super) ready: AtomicBool,
}

impl<T> Inner<T> {
    pub(super) const fn empty() -> Self {
        Self {
            value: UnsafeCell::new(MaybeUninit::uninit()),
            ready: AtomicBool::new(false),
        }
    }

    pub(super) const fn with_value(value: T) -> Self {
        Self {
            value: UnsafeCell::new(MaybeUninit::new(value)),
            ready: AtomicBool::new(true),
        }
    }

    /// # Safety
    ///
    /// The caller must have observed `ready == true` with acquire ordering
    /// (or hold exclusive access to a slot known to be initialized).
    #[inline(always)]
    pub(super) unsafe fn value_ref(&self) -> &T {
        (*self.value.get()).assume_init_ref()
    }

    /// # Safety
    ///
    /// The slot must be initialized. `&mut self` provides exclusivity.
    #[inline]
    pub(super) unsafe fn value_mut(&mut self) -> &mut T {
        self.value.get_mut().assume_init_mut()
    }

    /// # Safety
    ///
    /// `ready` must be `false` and the caller must hold the slot lock, so no
    /// other thread reads or writes the value concurrently.
    #[inline]
    pub(super) unsafe fn write(&self, value: T) {
        (*self.value.get()).write(value);
    }

    /// Moves the value out without updating `ready`.
    ///
    /// # Safety
    ///
    /// The slot must be initialized, and the caller must clear `ready` (or
    /// forget the slot) so the value is not dropped twice.
    #[inline]
    pub(super) unsafe fn read_value(&mut self) -> T {
        ptr::read(self.value.get_mut().as_ptr())
    }

    /// # Safety
    ///
    /// The slot must be initialized; the value must not be used afterwards.
    #[inline]
    pub(super) unsafe fn drop_value(&mut self) {
        ptr::drop_in_place(self.value.get_mut().as_mut_ptr());
    }
}
