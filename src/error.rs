//! Error types for the service locator.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// Boxed error accepted from user factories and constructors.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors raised while registering, resolving, invoking or injecting.
///
/// The enum is `Clone` because a failing static registration memoizes its
/// error and hands the same value to every later caller.
///
/// # Examples
///
/// ```rust
/// use ferrous_locator::{Container, DiError, Resolver};
///
/// let container = Container::new();
/// match container.get::<String>() {
///     Err(DiError::NotExist(type_name)) => {
///         assert_eq!(type_name, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum DiError {
    /// No registration group exists for the requested type.
    #[error("item does not exist in the container: '{0}'")]
    NotExist(&'static str),

    /// The type is registered but not under the requested name.
    #[error("item with the given name does not exist in the container: '{name}' ({type_name})")]
    NameNotExist {
        type_name: &'static str,
        name: String,
    },

    /// A callable or signature has a shape the engine cannot work with.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A registered factory or constructor reported a failure.
    #[error("factory failed: {0}")]
    Factory(#[source] Arc<dyn StdError + Send + Sync + 'static>),

    /// An erased instance did not hold the requested type.
    #[error("unable to cast instance of '{found}' to '{expected}'")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl DiError {
    /// Wraps a user error as [`DiError::Factory`].
    pub fn factory(error: impl Into<BoxError>) -> Self {
        DiError::Factory(Arc::from(error.into()))
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        DiError::Validation(message.into())
    }

    /// True for the two "nothing registered" variants.
    pub fn is_missing(&self) -> bool {
        matches!(self, DiError::NotExist(_) | DiError::NameNotExist { .. })
    }
}

/// Result type for locator operations.
pub type DiResult<T> = Result<T, DiError>;
