//! Lock primitives used by the registry.
//!
//! With the `parking-lot` feature the registry runs on `parking_lot::RwLock`.
//! Otherwise it falls back to `std::sync::RwLock`, recovering from poisoning:
//! no lock is ever held while user code runs, so a poisoned lock still guards
//! consistent data.

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(feature = "parking-lot")]
#[inline]
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read()
}

#[cfg(not(feature = "parking-lot"))]
#[inline]
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(feature = "parking-lot")]
#[inline]
pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write()
}

#[cfg(not(feature = "parking-lot"))]
#[inline]
pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Hasher used for the slot map.
#[cfg(feature = "ahash")]
pub(crate) type SlotHasher = ahash::RandomState;

#[cfg(not(feature = "ahash"))]
pub(crate) type SlotHasher = std::collections::hash_map::RandomState;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_after_write() {
        let lock = RwLock::new(1u32);
        *write(&lock) += 1;
        assert_eq!(*read(&lock), 2);
    }

    #[cfg(not(feature = "parking-lot"))]
    #[test]
    fn test_poisoned_lock_is_recovered() {
        use std::sync::Arc;

        let lock = Arc::new(RwLock::new(7u32));
        let poisoner = Arc::clone(&lock);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(lock.is_poisoned());
        assert_eq!(*read(&lock), 7);
        *write(&lock) = 8;
        assert_eq!(*read(&lock), 8);
    }
}
