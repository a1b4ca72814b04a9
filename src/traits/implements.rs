//! Upcasting from a concrete type to the type it is bound as.

/// Marks `Self` as a concrete implementation of the bound type `I`.
///
/// Used by the `*_to` binders of [`InjectionManager`](crate::InjectionManager)
/// to turn a default-constructed `Self` into the uniquely-owned `Box<I>` the
/// registry stores. Every type implements `Implements<Self>`; for trait
/// objects use the [`implements!`](crate::implements) macro.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{implements, Implements};
///
/// trait Storage: Send + Sync {
///     fn kind(&self) -> &'static str;
/// }
///
/// #[derive(Default)]
/// struct MemoryStorage;
///
/// impl Storage for MemoryStorage {
///     fn kind(&self) -> &'static str {
///         "memory"
///     }
/// }
///
/// implements!(MemoryStorage => dyn Storage);
///
/// let storage: Box<dyn Storage> = Box::new(MemoryStorage).upcast();
/// assert_eq!(storage.kind(), "memory");
/// ```
pub trait Implements<I: ?Sized> {
    /// Converts the boxed implementation into the bound type.
    fn upcast(self: Box<Self>) -> Box<I>;
}

impl<T> Implements<T> for T {
    #[inline]
    fn upcast(self: Box<Self>) -> Box<T> {
        self
    }
}

/// Declares that concrete types implement a bound trait object.
///
/// `implements!(Concrete => dyn Trait)` expands to an [`Implements`] impl
/// whose upcast is a plain unsizing coercion. Several types can be listed at
/// once: `implements!(A, B => dyn Trait)`.
#[macro_export]
macro_rules! implements {
    ($($concrete:ty),+ => $bound:ty) => {
        $(
            impl $crate::Implements<$bound> for $concrete {
                #[inline]
                fn upcast(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<$bound> {
                    self
                }
            }
        )+
    };
}
