//! Error types for the injection registry.

use std::fmt;

/// Boxed error produced by a fallible factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Injection errors
///
/// Unbound types are not an error on the plain resolution path: resolving a
/// type that was never bound yields an empty result. Errors are reserved for
/// factories that fail and for the strict `*_required` accessors.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::InjectError;
///
/// let not_bound = InjectError::NotBound("app::Database");
/// assert_eq!(not_bound.to_string(), "No binding configured for: app::Database");
///
/// let failed = InjectError::FactoryFailed {
///     type_name: "app::Database",
///     message: "connection refused".to_string(),
/// };
/// assert_eq!(failed.type_name(), "app::Database");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectError {
    /// A factory reported a failure while building an instance
    FactoryFailed {
        /// Name of the bound type
        type_name: &'static str,
        /// Message of the factory's error
        message: String,
    },
    /// Strict resolution of a type with no usable binding
    NotBound(&'static str),
}

impl InjectError {
    pub(crate) fn factory_failed(type_name: &'static str, error: BoxError) -> Self {
        InjectError::FactoryFailed {
            type_name,
            message: error.to_string(),
        }
    }

    /// Name of the type the error refers to.
    pub fn type_name(&self) -> &'static str {
        match self {
            InjectError::FactoryFailed { type_name, .. } => type_name,
            InjectError::NotBound(type_name) => type_name,
        }
    }
}

impl fmt::Display for InjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectError::FactoryFailed { type_name, message } => {
                write!(f, "Factory failed for {}: {}", type_name, message)
            }
            InjectError::NotBound(name) => write!(f, "No binding configured for: {}", name),
        }
    }
}

impl std::error::Error for InjectError {}

/// Result type for injection operations
///
/// A convenience alias for `Result<T, InjectError>`.
pub type InjectResult<T> = Result<T, InjectError>;
