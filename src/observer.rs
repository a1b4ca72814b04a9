//! Diagnostic observers for binding and resolution events.
//!
//! Observers are the crate's logging hook: the registry reports every bind,
//! every resolution and every factory failure to the observers attached to it.
//! Calls are synchronous and never made while a slot lock is held.

use std::sync::Arc;
use std::time::Duration;

use crate::error::InjectError;
use crate::key::Key;
use crate::scope::InjectionScope;

/// Observer of registry events.
///
/// Keep implementations lightweight: they run inline on the thread that binds
/// or resolves.
///
/// # Examples
///
/// ```
/// use ferrous_inject::{InjectionObserver, InjectionScope, Key, Registry};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct CountingObserver {
///     resolutions: AtomicUsize,
/// }
///
/// impl InjectionObserver for CountingObserver {
///     fn bound(&self, _key: &Key, _scope: InjectionScope) {}
///
///     fn resolved(&self, _key: &Key, _scope: InjectionScope, _duration: Duration) {
///         self.resolutions.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let registry = Registry::new();
/// let observer = Arc::new(CountingObserver::default());
/// registry.add_observer(observer.clone());
///
/// registry.configure::<u32>(Arc::new(|| Ok(Arc::new(7))), InjectionScope::Transient).unwrap();
/// registry.resolve::<u32>().unwrap();
/// assert_eq!(observer.resolutions.load(Ordering::SeqCst), 1);
/// ```
pub trait InjectionObserver: Send + Sync {
    /// Called after a binding was stored in its slot.
    fn bound(&self, key: &Key, scope: InjectionScope);

    /// Called before the registry reads the slot of `key`.
    fn resolving(&self, key: &Key) {
        let _ = key;
    }

    /// Called after a resolution completed without error.
    ///
    /// `scope` is the scope the slot had when it was read; `Invalid` means
    /// the resolution yielded no instance.
    fn resolved(&self, key: &Key, scope: InjectionScope, duration: Duration);

    /// Called when a factory reported a failure.
    ///
    /// The error still propagates to the caller after this call.
    fn factory_failed(&self, key: &Key, error: &InjectError) {
        let _ = (key, error);
    }
}

/// Observers attached to a registry.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn InjectionObserver>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn InjectionObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn bound(&self, key: &Key, scope: InjectionScope) {
        for observer in &self.observers {
            observer.bound(key, scope);
        }
    }

    pub(crate) fn resolving(&self, key: &Key) {
        for observer in &self.observers {
            observer.resolving(key);
        }
    }

    pub(crate) fn resolved(&self, key: &Key, scope: InjectionScope, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, scope, duration);
        }
    }

    pub(crate) fn factory_failed(&self, key: &Key, error: &InjectError) {
        for observer in &self.observers {
            observer.factory_failed(key, error);
        }
    }
}

/// Built-in observer that logs events to stdout.
///
/// Factory failures go to stderr. Useful during development; production code
/// usually forwards events to its own logging infrastructure instead.
///
/// # Examples
///
/// ```
/// use ferrous_inject::{LoggingObserver, Registry};
/// use std::sync::Arc;
///
/// Registry::global().add_observer(Arc::new(LoggingObserver::with_prefix("[app-di]")));
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a logging observer with the default `[ferrous-inject]` prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[ferrous-inject]".to_string(),
        }
    }

    /// Creates a logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The prefix written in front of every line.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl InjectionObserver for LoggingObserver {
    fn bound(&self, key: &Key, scope: InjectionScope) {
        println!("{} Bound: {} as {}", self.prefix, key.display_name(), scope);
    }

    fn resolving(&self, key: &Key) {
        println!("{} Resolving: {}", self.prefix, key.display_name());
    }

    fn resolved(&self, key: &Key, scope: InjectionScope, duration: Duration) {
        println!(
            "{} Resolved: {} ({}) in {:?}",
            self.prefix,
            key.display_name(),
            scope,
            duration
        );
    }

    fn factory_failed(&self, key: &Key, error: &InjectError) {
        eprintln!(
            "{} FACTORY FAILED for {}: {}",
            self.prefix,
            key.display_name(),
            error
        );
    }
}
