//! Lazily-resolving handles.

use std::any::type_name;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{InjectError, InjectResult};
use crate::registry::Registry;

/// Handle to an instance of `I` resolved from the global registry on first
/// use.
///
/// Declaring a handle does nothing. The first access (`get`, `try_get`,
/// `instance` or dereference) asks the registry for `I` exactly once and keeps
/// whatever comes back for the handle's whole lifetime, including "nothing
/// bound". Later bind calls for `I` are only seen by handles that have not
/// resolved yet.
///
/// This holds for every scope: a handle over a transient binding observes one
/// transient instance, and only a fresh handle builds a new one.
///
/// Cloning a handle copies its current state. A resolved handle's clone
/// shares the same instance; an unresolved handle's clone is unresolved too
/// and resolves on its own. Cloning never calls the registry.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{Injected, InjectionManager};
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// struct Ticket(u32);
///
/// static NEXT: AtomicU32 = AtomicU32::new(1);
/// InjectionManager::bind_transient(|| Box::new(Ticket(NEXT.fetch_add(1, Ordering::SeqCst))));
///
/// let first: Injected<Ticket> = Injected::new();
/// let second: Injected<Ticket> = Injected::new();
///
/// assert_eq!(first.0, 1);
/// assert_eq!(second.0, 2);
/// // Same handle, same instance
/// assert_eq!(first.0, 1);
///
/// let copy = first.clone();
/// assert_eq!(copy.0, 1);
/// ```
///
/// Unbound types resolve to nothing:
///
/// ```rust
/// use ferrous_inject::Injected;
///
/// struct NeverBound;
///
/// let handle: Injected<NeverBound> = Injected::new();
/// assert!(!handle.is_bound());
/// assert!(handle.get().is_none());
/// assert!(!handle.is_bound());
/// ```
pub struct Injected<I: ?Sized> {
    resolved: OnceCell<Option<Arc<I>>>,
}

impl<I> Injected<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    /// Creates an unresolved handle.
    pub fn new() -> Self {
        Self {
            resolved: OnceCell::new(),
        }
    }

    /// Creates a handle already resolved to `instance`.
    ///
    /// The registry is never consulted for this handle.
    pub fn from_instance(instance: Arc<I>) -> Self {
        Self {
            resolved: OnceCell::with_value(Some(instance)),
        }
    }

    /// Resolves the handle if needed and returns its instance.
    ///
    /// Returns `Ok(None)` when `I` has no usable binding. A factory failure is
    /// returned as an error and leaves the handle unresolved, so a later
    /// access tries again.
    pub fn try_get(&self) -> InjectResult<Option<&I>> {
        let resolved = self
            .resolved
            .get_or_try_init(|| Registry::global().resolve::<I>())?;
        Ok(resolved.as_deref())
    }

    /// Like [`try_get`](Self::try_get), but an empty handle becomes
    /// [`InjectError::NotBound`].
    pub fn try_get_required(&self) -> InjectResult<&I> {
        self.try_get()?
            .ok_or_else(|| InjectError::NotBound(type_name::<I>()))
    }

    /// Resolves the handle if needed and returns its instance, or `None`
    /// when `I` has no usable binding.
    ///
    /// # Panics
    ///
    /// Panics if the factory of `I` fails.
    pub fn get(&self) -> Option<&I> {
        match self.try_get() {
            Ok(instance) => instance,
            Err(error) => panic!("failed to resolve {}: {}", type_name::<I>(), error),
        }
    }

    /// Resolves the handle if needed and returns a shared reference to its
    /// instance that can outlive the handle.
    ///
    /// # Panics
    ///
    /// Panics if the factory of `I` fails.
    pub fn instance(&self) -> Option<Arc<I>> {
        self.get()?;
        self.resolved.get().cloned().flatten()
    }

    /// Returns true if the handle resolved to an instance.
    ///
    /// Does not resolve: an untouched handle reports false.
    pub fn is_bound(&self) -> bool {
        matches!(self.resolved.get(), Some(Some(_)))
    }

    /// Returns true once resolution has run, whatever its outcome.
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl<I> Default for Injected<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized> Clone for Injected<I> {
    fn clone(&self) -> Self {
        Self {
            resolved: self.resolved.clone(),
        }
    }
}

impl<I> Deref for Injected<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    type Target = I;

    /// # Panics
    ///
    /// Panics if `I` has no usable binding or its factory fails. Use
    /// [`Injected::get`] to handle the unbound case.
    fn deref(&self) -> &I {
        match self.get() {
            Some(instance) => instance,
            None => panic!(
                "no binding configured for {}; use Injected::get to handle unbound types",
                type_name::<I>()
            ),
        }
    }
}

impl<I: ?Sized> fmt::Debug for Injected<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.resolved.get() {
            None => "unresolved",
            Some(None) => "empty",
            Some(Some(_)) => "bound",
        };
        f.debug_struct("Injected")
            .field("type", &type_name::<I>())
            .field("state", &state)
            .finish()
    }
}
