//! Convenience binders over the global registry.

use std::any::type_name;
use std::sync::Arc;

use crate::error::{BoxError, InjectError, InjectResult};
use crate::registry::{Factory, Registry};
use crate::scope::InjectionScope;
use crate::traits::Implements;

/// Binds types in the global [`Registry`].
///
/// Every bind call is process-wide: it affects every later resolution of the
/// type from any [`Injected`](crate::Injected) handle on any thread, until the
/// next bind call for the same type. Handles that already resolved keep the
/// instance they hold.
///
/// Factories return a uniquely-owned `Box<I>`; the registry takes it over and
/// shares it from then on. Trait objects are bound by naming the trait object
/// type explicitly.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::{implements, Injected, InjectionManager};
///
/// trait Mailer: Send + Sync {
///     fn send(&self, to: &str) -> String;
/// }
///
/// #[derive(Default)]
/// struct SmtpMailer;
///
/// impl Mailer for SmtpMailer {
///     fn send(&self, to: &str) -> String {
///         format!("smtp -> {}", to)
///     }
/// }
///
/// implements!(SmtpMailer => dyn Mailer);
///
/// InjectionManager::bind_singleton_to::<dyn Mailer, SmtpMailer>();
///
/// let mailer: Injected<dyn Mailer> = Injected::new();
/// assert_eq!(mailer.send("ops"), "smtp -> ops");
/// ```
pub struct InjectionManager;

impl InjectionManager {
    /// Binds `I` to `factory` with an explicit scope.
    ///
    /// With [`InjectionScope::SingletonEager`] the factory runs before this
    /// call returns.
    pub fn bind<I>(factory: impl Fn() -> Box<I> + Send + Sync + 'static, scope: InjectionScope)
    where
        I: ?Sized + Send + Sync + 'static,
    {
        Self::configure(owned(factory), scope);
    }

    /// Binds `I` to a fallible factory with an explicit scope.
    ///
    /// Factory errors become [`InjectError::FactoryFailed`]. With
    /// [`InjectionScope::SingletonEager`] a failure is returned here and the
    /// previous binding of `I` stays in place; with the other scopes failures
    /// surface on resolution.
    pub fn try_bind<I, E>(
        factory: impl Fn() -> Result<Box<I>, E> + Send + Sync + 'static,
        scope: InjectionScope,
    ) -> InjectResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Registry::global().configure(fallible(factory), scope)
    }

    /// Binds `I` as a singleton built by `factory` on first resolution.
    pub fn bind_singleton<I>(factory: impl Fn() -> Box<I> + Send + Sync + 'static)
    where
        I: ?Sized + Send + Sync + 'static,
    {
        Self::bind(factory, InjectionScope::Singleton);
    }

    /// Binds `I` as a singleton of the default value of `C`, built on first
    /// resolution.
    pub fn bind_singleton_to<I, C>()
    where
        I: ?Sized + Send + Sync + 'static,
        C: Default + Implements<I> + 'static,
    {
        Self::configure(default_of::<I, C>(), InjectionScope::Singleton);
    }

    /// Binds `I` to an already built instance.
    ///
    /// The registry takes ownership and caches the instance right away
    /// ([`InjectionScope::SingletonEager`]); every later resolution returns
    /// this exact instance.
    pub fn bind_singleton_instance<I>(instance: Box<I>)
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let instance: Arc<I> = Arc::from(instance);
        let factory: Factory<I> =
            Arc::new(move || -> InjectResult<Arc<I>> { Ok(Arc::clone(&instance)) });
        Self::configure(factory, InjectionScope::SingletonEager);
    }

    /// Binds `I` as an eager singleton built by a fallible factory, now.
    ///
    /// On failure the error is returned and the previous binding of `I`
    /// stays in place.
    pub fn try_bind_singleton_eager<I, E>(
        factory: impl Fn() -> Result<Box<I>, E> + Send + Sync + 'static,
    ) -> InjectResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::try_bind(factory, InjectionScope::SingletonEager)
    }

    /// Binds `I` as transient: every fresh handle gets a new instance from
    /// `factory`.
    pub fn bind_transient<I>(factory: impl Fn() -> Box<I> + Send + Sync + 'static)
    where
        I: ?Sized + Send + Sync + 'static,
    {
        Self::bind(factory, InjectionScope::Transient);
    }

    /// Binds `I` as transient over the default value of `C`.
    pub fn bind_transient_to<I, C>()
    where
        I: ?Sized + Send + Sync + 'static,
        C: Default + Implements<I> + 'static,
    {
        Self::configure(default_of::<I, C>(), InjectionScope::Transient);
    }

    fn configure<I>(factory: Factory<I>, scope: InjectionScope)
    where
        I: ?Sized + Send + Sync + 'static,
    {
        // Factories built by `owned` and `default_of` never return an error.
        if let Err(error) = Registry::global().configure(factory, scope) {
            unreachable!("infallible factory for {} failed: {}", type_name::<I>(), error);
        }
    }
}

fn owned<I>(factory: impl Fn() -> Box<I> + Send + Sync + 'static) -> Factory<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    Arc::new(move || -> InjectResult<Arc<I>> { Ok(Arc::from(factory())) })
}

fn fallible<I, E>(factory: impl Fn() -> Result<Box<I>, E> + Send + Sync + 'static) -> Factory<I>
where
    I: ?Sized + Send + Sync + 'static,
    E: Into<BoxError>,
{
    Arc::new(move || -> InjectResult<Arc<I>> {
        factory()
            .map(Arc::from)
            .map_err(|error| InjectError::factory_failed(type_name::<I>(), error.into()))
    })
}

fn default_of<I, C>() -> Factory<I>
where
    I: ?Sized + Send + Sync + 'static,
    C: Default + Implements<I> + 'static,
{
    owned(|| <C as Implements<I>>::upcast(Box::new(C::default())))
}
