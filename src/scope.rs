//! Injection scope definitions.

use std::fmt;

/// Scope controlling how many instances a binding produces.
///
/// Every bound type has exactly one scope at a time, stored in its binding
/// slot next to the factory. Rebinding a type replaces both.
///
/// # Scope Characteristics
///
/// - **Transient**: the factory runs for every fresh [`Injected`](crate::Injected) handle
/// - **Singleton**: the factory runs once, on the first resolution after binding
/// - **SingletonEager**: the factory runs once, during the bind call itself
/// - **Invalid**: nothing is bound; resolution yields no instance
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{InjectionManager, InjectionScope, Registry};
///
/// struct Clock { ticks: u64 }
///
/// assert_eq!(Registry::global().scope_of::<Clock>(), InjectionScope::Invalid);
///
/// InjectionManager::bind(|| Box::new(Clock { ticks: 0 }), InjectionScope::Transient);
/// assert_eq!(Registry::global().scope_of::<Clock>(), InjectionScope::Transient);
///
/// InjectionManager::bind_singleton(|| Box::new(Clock { ticks: 1 }));
/// assert_eq!(Registry::global().scope_of::<Clock>(), InjectionScope::Singleton);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InjectionScope {
    /// No binding configured
    ///
    /// The state of every slot before its first bind call. Resolution
    /// returns no instance.
    #[default]
    Invalid,
    /// New instance per resolution, never cached
    ///
    /// The factory runs every time the registry resolves the type. A single
    /// [`Injected`](crate::Injected) handle still resolves only once, so each
    /// handle observes exactly one transient instance for its whole lifetime.
    Transient,
    /// Single instance created on first resolution, cached in the slot
    ///
    /// Concurrent first resolutions run the factory at most once; the other
    /// callers receive the winner's instance.
    Singleton,
    /// Single instance created at bind time, cached in the slot
    ///
    /// Resolution never runs the factory; it only hands out the cached
    /// instance.
    SingletonEager,
}

impl InjectionScope {
    /// Returns true for the two scopes that cache their instance in the slot.
    pub fn is_singleton(self) -> bool {
        matches!(self, InjectionScope::Singleton | InjectionScope::SingletonEager)
    }
}

impl fmt::Display for InjectionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InjectionScope::Invalid => "invalid",
            InjectionScope::Transient => "transient",
            InjectionScope::Singleton => "singleton",
            InjectionScope::SingletonEager => "singleton-eager",
        };
        f.write_str(name)
    }
}
