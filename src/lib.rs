//! # ferrous-inject
//!
//! Minimal, process-wide dependency injection: bind a type to a factory and a
//! scope once, then declare lazily-resolving [`Injected`] handles anywhere.
//!
//! ## Features
//!
//! - **One slot per type**: rebinding a type replaces its factory and scope wholesale
//! - **Three scopes**: transient, lazy singleton and eager singleton
//! - **Lazy handles**: an [`Injected<T>`] resolves at most once and keeps its instance
//! - **Trait objects**: bind `dyn Trait` to a concrete default-constructible type
//! - **Thread-safe**: concurrent first resolutions of a singleton build it once
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_inject::{Injected, InjectionManager};
//!
//! struct Config {
//!     url: String,
//! }
//!
//! struct Repository {
//!     config: Injected<Config>,
//! }
//!
//! impl Repository {
//!     fn describe(&self) -> String {
//!         format!("repo@{}", self.config.url)
//!     }
//! }
//!
//! InjectionManager::bind_singleton(|| {
//!     Box::new(Config {
//!         url: "postgres://localhost".to_string(),
//!     })
//! });
//!
//! let repo = Repository { config: Injected::new() };
//! assert_eq!(repo.describe(), "repo@postgres://localhost");
//! ```
//!
//! ## Scopes
//!
//! - **Singleton**: built on first resolution, then shared
//! - **SingletonEager**: built while binding, then shared
//! - **Transient**: built for every fresh handle
//!
//! ## Rebinding
//!
//! ```rust
//! use ferrous_inject::{Injected, InjectionManager};
//!
//! struct Endpoint(&'static str);
//!
//! InjectionManager::bind_singleton(|| Box::new(Endpoint("primary")));
//! let before: Injected<Endpoint> = Injected::new();
//! assert_eq!(before.0, "primary");
//!
//! InjectionManager::bind_singleton(|| Box::new(Endpoint("fallback")));
//! let after: Injected<Endpoint> = Injected::new();
//! assert_eq!(after.0, "fallback");
//!
//! // Resolved handles keep their instance
//! assert_eq!(before.0, "primary");
//! ```
//!
//! ## Cargo Features
//!
//! - `parking-lot`: `parking_lot` locks instead of `std::sync`
//! - `ahash`: `ahash` hashing for the slot map
//! - `performance`: both of the above
//! - `diagnostics`: `Registry::bindings` debug dumps

pub mod error;
pub mod injected;
pub mod key;
pub mod manager;
pub mod observer;
pub mod registry;
pub mod scope;
pub mod traits;

// Internal modules
mod internal;

pub use error::{BoxError, InjectError, InjectResult};
pub use injected::Injected;
pub use key::{key_of, Key};
pub use manager::InjectionManager;
pub use observer::{InjectionObserver, LoggingObserver};
pub use registry::{Factory, Registry};
pub use scope::InjectionScope;
pub use traits::Implements;

#[cfg(feature = "diagnostics")]
pub use registry::BindingInfo;
