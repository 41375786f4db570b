//! Resolver traits for service resolution.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{DiError, DiResult};
use crate::instance::Instance;
use crate::key::{key_of, TypeKey};

/// Object-safe read side of a container.
///
/// This is the capability the invocation engine and the field injector
/// consume, so anything implementing it (not only [`Container`]) can drive
/// [`invoke`] and [`inject`]. All methods work on erased [`Instance`]s; the
/// generic, downcasting wrappers live on [`Resolver`].
///
/// [`Container`]: crate::Container
/// [`invoke`]: crate::invoke
/// [`inject`]: crate::inject
pub trait ResolverCore: Send + Sync {
    /// Resolves the single registration selected for `key`.
    ///
    /// When several anonymous registrations exist the last one wins. When only
    /// named registrations exist one of them is returned.
    fn resolve(&self, key: &TypeKey) -> DiResult<Instance>;

    /// Resolves every registration for `key`: named ones first, then the
    /// anonymous ones in registration order.
    fn resolve_all(&self, key: &TypeKey) -> DiResult<Vec<Instance>>;

    /// Resolves the registration stored under `name`.
    fn resolve_by_name(&self, key: &TypeKey, name: &str) -> DiResult<Instance>;

    /// Resolves only the named registrations, keyed by name.
    fn resolve_map(&self, key: &TypeKey) -> DiResult<IndexMap<String, Instance>>;
}

/// Typed resolution helpers over [`ResolverCore`].
///
/// Implemented for every resolver, including `dyn ResolverCore`, so factories
/// can use the same calls as top-level code.
///
/// # Examples
///
/// ```
/// use ferrous_locator::{Container, Resolver, with_name};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn name(&self) -> String;
/// }
///
/// struct Named(&'static str);
/// impl Greeter for Named {
///     fn name(&self) -> String { self.0.to_string() }
/// }
///
/// let mut container = Container::new();
/// container.register_instance::<dyn Greeter>(Arc::new(Named("a")), &[with_name("a")]);
/// container.register_instance::<dyn Greeter>(Arc::new(Named("b")), &[with_name("b")]);
///
/// let a = container.get_named::<dyn Greeter>("a").unwrap();
/// assert_eq!(a.name(), "a");
/// assert_eq!(container.get_all::<dyn Greeter>().unwrap().len(), 2);
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves `T`.
    fn get<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.resolve(&key_of::<T>())?.downcast::<T>()
    }

    /// Resolves `T`, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics when `T` cannot be resolved.
    fn get_required<T: ?Sized + Send + Sync + 'static>(&self) -> Arc<T> {
        match self.get::<T>() {
            Ok(value) => value,
            Err(err) => panic!("failed to resolve {}: {}", std::any::type_name::<T>(), err),
        }
    }

    /// Resolves the registration of `T` named `name`.
    fn get_named<T: ?Sized + Send + Sync + 'static>(&self, name: &str) -> DiResult<Arc<T>> {
        self.resolve_by_name(&key_of::<T>(), name)?.downcast::<T>()
    }

    /// Resolves every registration of `T`.
    fn get_all<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Vec<Arc<T>>> {
        self.resolve_all(&key_of::<T>())?
            .iter()
            .map(Instance::downcast::<T>)
            .collect()
    }

    /// Resolves the named registrations of `T`.
    fn get_map<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<IndexMap<String, Arc<T>>> {
        self.resolve_map(&key_of::<T>())?
            .into_iter()
            .map(|(name, instance)| Ok((name, instance.downcast::<T>()?)))
            .collect()
    }

    /// Resolves `T`, mapping "not registered" to `None` and keeping every
    /// other failure.
    fn try_get<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Option<Arc<T>>> {
        match self.get::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(DiError::NotExist(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}
