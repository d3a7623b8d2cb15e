//! `EagerSlot` - construct-at-start single instance.

use core::ops::{Deref, DerefMut};

/// A single instance constructed up front.
///
/// The trivially safe strategy: the instance exists before any accessor call
/// can race, so no lock or atomic is ever needed. The trade-off is paying
/// construction cost even if the instance goes unused.
#[derive(Debug, Default, Clone)]
pub struct EagerSlot<T> {
    value: T,
}

impl<T> EagerSlot<T> {
    /// Creates a slot holding `value`.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Gets a reference to the instance.
    #[inline(always)]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Gets an exclusive reference to the instance.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Consumes the slot, returning the instance.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for EagerSlot<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for EagerSlot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T> From<T> for EagerSlot<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::EagerSlot;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<T: Serialize> Serialize for EagerSlot<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.value.serialize(serializer)
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for EagerSlot<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            T::deserialize(deserializer).map(EagerSlot::new)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EagerSlot;

    #[test]
    fn test_eager_slot_identity() {
        let slot = EagerSlot::new(vec![1, 2, 3]);
        assert!(core::ptr::eq(slot.get(), slot.get()));
        assert_eq!(slot.into_inner(), vec![1, 2, 3]);
    }
}
