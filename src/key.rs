//! Type keys identifying binding slots.

use std::any::TypeId;
use std::fmt;

/// Stable identifier of a bound type.
///
/// Each distinct type owns at most one binding slot, looked up by its
/// `TypeId`. The type name is kept alongside for diagnostics and error
/// messages only; equality and hashing use the `TypeId` alone.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Key, key_of};
///
/// trait Greeter: Send + Sync {}
///
/// let a = key_of::<String>();
/// let b = key_of::<String>();
/// assert_eq!(a, b);
/// assert!(a.display_name().ends_with("String"));
///
/// // Trait objects have their own key
/// assert_ne!(key_of::<dyn Greeter>(), a);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Key {
    id: TypeId,
    name: &'static str,
}

impl Key {
    /// Human-readable name of the keyed type.
    pub fn display_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Key {}

impl std::hash::Hash for Key {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Builds the key of `T`.
#[inline(always)]
pub fn key_of<T: ?Sized + 'static>() -> Key {
    Key {
        id: TypeId::of::<T>(),
        name: std::any::type_name::<T>(),
    }
}
