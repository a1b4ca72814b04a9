//! Binding slots and the registry that owns them.
//!
//! Every bound type has exactly one slot for the lifetime of the registry,
//! created on the first bind call for that type. The slot holds the current
//! binding: factory, scope and singleton cache cell. Rebinding swaps the whole
//! binding under the slot's write lock, so a resolution observes either the
//! old binding or the new one, never a mix.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::{Lazy, OnceCell};

use crate::error::{InjectError, InjectResult};
use crate::internal::sync::{self, RwLock, SlotHasher};
use crate::key::{key_of, Key};
use crate::observer::{InjectionObserver, Observers};
use crate::scope::InjectionScope;

/// Type-erased factory stored in a binding slot.
///
/// Returns a shared instance; user-facing binders wrap their `Box<I>` into
/// an `Arc<I>` before it reaches the registry.
pub type Factory<I> = Arc<dyn Fn() -> InjectResult<Arc<I>> + Send + Sync>;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Current binding of one type.
struct Binding<I: ?Sized> {
    factory: Option<Factory<I>>,
    scope: InjectionScope,
    /// Fresh cell per binding; a stale in-flight init never reaches a rebind.
    cached: Arc<OnceCell<Arc<I>>>,
}

impl<I: ?Sized> Default for Binding<I> {
    fn default() -> Self {
        Self {
            factory: None,
            scope: InjectionScope::Invalid,
            cached: Arc::new(OnceCell::new()),
        }
    }
}

impl<I: ?Sized> Clone for Binding<I> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
            scope: self.scope,
            cached: Arc::clone(&self.cached),
        }
    }
}

/// Binding slot of type `I`.
pub(crate) struct Slot<I: ?Sized> {
    binding: RwLock<Binding<I>>,
}

impl<I: ?Sized> Slot<I> {
    fn new() -> Self {
        Self {
            binding: RwLock::new(Binding::default()),
        }
    }

    fn snapshot(&self) -> Binding<I> {
        sync::read(&self.binding).clone()
    }
}

/// Object-safe view of a slot, used by the slot map.
trait AnySlot: Send + Sync {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    #[cfg_attr(not(feature = "diagnostics"), allow(dead_code))]
    fn scope(&self) -> InjectionScope;

    #[cfg_attr(not(feature = "diagnostics"), allow(dead_code))]
    fn has_cached(&self) -> bool;
}

impl<I: ?Sized + Send + Sync + 'static> AnySlot for Slot<I> {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn scope(&self) -> InjectionScope {
        sync::read(&self.binding).scope
    }

    fn has_cached(&self) -> bool {
        let binding = sync::read(&self.binding);
        binding.scope.is_singleton() && binding.cached.get().is_some()
    }
}

fn downcast_slot<I: ?Sized + Send + Sync + 'static>(slot: Arc<dyn AnySlot>) -> Arc<Slot<I>> {
    match slot.into_any().downcast::<Slot<I>>() {
        Ok(slot) => slot,
        Err(_) => unreachable!(
            "slot keyed by {} holds another type",
            std::any::type_name::<I>()
        ),
    }
}

/// Snapshot of one slot, for debug dumps.
#[cfg(feature = "diagnostics")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingInfo {
    /// Name of the bound type
    pub type_name: &'static str,
    /// Scope at the time of the snapshot
    pub scope: InjectionScope,
    /// Whether the slot currently caches a singleton instance
    pub cached: bool,
}

/// The binding registry.
///
/// Maps each type to its binding slot and applies scope policy on
/// resolution. Client code normally goes through [`InjectionManager`] to bind
/// and [`Injected`] to resolve, both of which use [`Registry::global`].
/// Standalone registries from [`Registry::new`] are fully independent.
///
/// # Thread Safety
///
/// All operations take `&self` and may be called from any thread. No lock is
/// held while a factory runs, so factories may resolve other types. For the
/// `Singleton` scope, concurrent first resolutions run the factory at most
/// once; the losing threads wait for and receive the winner's instance.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{InjectionScope, Registry};
/// use std::sync::Arc;
///
/// let registry = Registry::new();
/// assert!(registry.resolve::<String>().unwrap().is_none());
///
/// registry
///     .configure::<String>(Arc::new(|| Ok(Arc::new("db".to_string()))), InjectionScope::Singleton)
///     .unwrap();
///
/// let first = registry.resolve::<String>().unwrap().unwrap();
/// let second = registry.resolve::<String>().unwrap().unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
///
/// [`InjectionManager`]: crate::InjectionManager
/// [`Injected`]: crate::Injected
pub struct Registry {
    slots: RwLock<HashMap<Key, Arc<dyn AnySlot>, SlotHasher>>,
    observers: RwLock<Arc<Observers>>,
}

impl Registry {
    /// Creates an empty registry with no bindings and no observers.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::with_hasher(SlotHasher::default())),
            observers: RwLock::new(Arc::new(Observers::default())),
        }
    }

    /// The process-wide registry.
    ///
    /// Initialised on first access. Bindings made here are visible to every
    /// [`Injected`](crate::Injected) handle in the process.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Attaches an observer that receives every subsequent event.
    pub fn add_observer(&self, observer: Arc<dyn InjectionObserver>) {
        let mut observers = sync::write(&self.observers);
        Arc::make_mut(&mut observers).add(observer);
    }

    /// Stores `factory` and `scope` in the slot of `I`, replacing any previous
    /// binding.
    ///
    /// For [`InjectionScope::SingletonEager`] the factory runs now and its
    /// instance becomes the cached singleton. If it fails, the error is
    /// returned and the slot keeps its previous binding. For every other
    /// scope the previous cached instance is discarded; a `Singleton` binding
    /// builds its instance on the next resolution.
    pub fn configure<I>(&self, factory: Factory<I>, scope: InjectionScope) -> InjectResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let key = key_of::<I>();
        let observers = self.observers();

        let cached = if scope == InjectionScope::SingletonEager {
            let instance = Self::invoke(&key, &factory, &observers)?;
            OnceCell::with_value(instance)
        } else {
            OnceCell::new()
        };

        let slot = self.slot::<I>();
        *sync::write(&slot.binding) = Binding {
            factory: Some(factory),
            scope,
            cached: Arc::new(cached),
        };

        observers.bound(&key, scope);
        Ok(())
    }

    /// Resolves an instance of `I` according to its slot's scope.
    ///
    /// - `SingletonEager`: the cached instance, without running the factory
    /// - `Singleton`: the cached instance, building it on first use
    /// - `Transient`: a fresh instance from the factory
    /// - `Invalid` or never bound: `Ok(None)`
    ///
    /// Factory failures are returned as errors; unbound types are not.
    pub fn resolve<I>(&self) -> InjectResult<Option<Arc<I>>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let key = key_of::<I>();
        let observers = self.observers();

        if !observers.has_observers() {
            return self
                .resolve_slot::<I>(&key, &observers)
                .map(|(instance, _)| instance);
        }

        observers.resolving(&key);
        let started = Instant::now();
        let (instance, scope) = self.resolve_slot::<I>(&key, &observers)?;
        observers.resolved(&key, scope, started.elapsed());
        Ok(instance)
    }

    /// Like [`resolve`](Self::resolve), but an empty result becomes
    /// [`InjectError::NotBound`].
    pub fn resolve_required<I>(&self) -> InjectResult<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<I>()?
            .ok_or_else(|| InjectError::NotBound(std::any::type_name::<I>()))
    }

    /// Current scope of `I`; `Invalid` if `I` was never bound.
    pub fn scope_of<I>(&self) -> InjectionScope
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.find_slot::<I>()
            .map(|slot| slot.snapshot().scope)
            .unwrap_or_default()
    }

    /// Returns true if `I` has a factory and a scope other than `Invalid`.
    ///
    /// Does not resolve anything.
    pub fn is_bound<I>(&self) -> bool
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.find_slot::<I>().map_or(false, |slot| {
            let binding = slot.snapshot();
            binding.factory.is_some() && binding.scope != InjectionScope::Invalid
        })
    }

    /// Snapshot of every slot, sorted by type name.
    #[cfg(feature = "diagnostics")]
    pub fn bindings(&self) -> Vec<BindingInfo> {
        let mut infos: Vec<BindingInfo> = sync::read(&self.slots)
            .iter()
            .map(|(key, slot)| BindingInfo {
                type_name: key.display_name(),
                scope: slot.scope(),
                cached: slot.has_cached(),
            })
            .collect();
        infos.sort_by(|a, b| a.type_name.cmp(b.type_name));
        infos
    }

    fn resolve_slot<I>(
        &self,
        key: &Key,
        observers: &Observers,
    ) -> InjectResult<(Option<Arc<I>>, InjectionScope)>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let binding = match self.find_slot::<I>() {
            Some(slot) => slot.snapshot(),
            None => return Ok((None, InjectionScope::Invalid)),
        };

        let instance = match (binding.scope, &binding.factory) {
            (InjectionScope::SingletonEager, _) => binding.cached.get().cloned(),
            (InjectionScope::Singleton, Some(factory)) => Some(
                binding
                    .cached
                    .get_or_try_init(|| Self::invoke(key, factory, observers))?
                    .clone(),
            ),
            (InjectionScope::Transient, Some(factory)) => {
                Some(Self::invoke(key, factory, observers)?)
            }
            _ => None,
        };

        Ok((instance, binding.scope))
    }

    fn invoke<I: ?Sized>(
        key: &Key,
        factory: &Factory<I>,
        observers: &Observers,
    ) -> InjectResult<Arc<I>> {
        factory().map_err(|error| {
            observers.factory_failed(key, &error);
            error
        })
    }

    fn observers(&self) -> Arc<Observers> {
        Arc::clone(&*sync::read(&self.observers))
    }

    fn find_slot<I>(&self) -> Option<Arc<Slot<I>>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let slot = sync::read(&self.slots).get(&key_of::<I>()).cloned()?;
        Some(downcast_slot::<I>(slot))
    }

    fn slot<I>(&self) -> Arc<Slot<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        if let Some(slot) = self.find_slot::<I>() {
            return slot;
        }

        let slot = sync::write(&self.slots)
            .entry(key_of::<I>())
            .or_insert_with(|| Arc::new(Slot::<I>::new()) as Arc<dyn AnySlot>)
            .clone();
        downcast_slot::<I>(slot)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("slots", &format!("{} slots", sync::read(&self.slots).len()))
            .finish()
    }
}
