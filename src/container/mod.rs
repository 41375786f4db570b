//! The container: registration store and resolution engine.
//!
//! A [`Container`] maps each [`TypeKey`] to a group of registrations. The
//! typed methods (`register_instance::<T>`, ...) capture the key at the call
//! site; the `_by_key` methods take an explicit key and erased values for
//! callers that only have descriptors at hand.

mod builder;
mod resolve;

use std::sync::Arc;

use crate::error::DiResult;
use crate::instance::Instance;
use crate::invoke::{self, Callable};
use crate::key::{key_of, TypeKey};
use crate::observer::Observers;
use crate::options::{RegistrationOption, RegistrationOptions};
use crate::registration::{Factory, RegistrationGroup, RegistrationItem};
use crate::traits::ResolverCore;

pub use builder::ContainerBuilder;

#[cfg(feature = "ahash")]
type GroupMap = std::collections::HashMap<TypeKey, RegistrationGroup, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
type GroupMap = std::collections::HashMap<TypeKey, RegistrationGroup>;

/// Runtime service locator.
///
/// Registration needs `&mut self`; resolution works through `&self` and is
/// safe to share across threads once registration is done.
///
/// # Examples
///
/// ```
/// use ferrous_locator::{Container, Lifetime, Resolver, with_lifetime};
/// use std::sync::Arc;
///
/// struct Config {
///     url: String,
/// }
///
/// struct Repository {
///     config: Arc<Config>,
/// }
///
/// let mut container = Container::new();
/// container.register_instance(Arc::new(Config { url: "db://local".into() }), &[]);
/// container.register_dynamic(
///     |resolver| Ok(Arc::new(Repository { config: resolver.get::<Config>()? })),
///     &[with_lifetime(Lifetime::Static)],
/// );
///
/// let first = container.get::<Repository>().unwrap();
/// let second = container.get::<Repository>().unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(first.config.url, "db://local");
/// ```
pub struct Container {
    groups: GroupMap,
    defaults: Vec<RegistrationOption>,
    observers: Observers,
}

impl Container {
    /// Creates an empty container with no default options.
    pub fn new() -> Self {
        Self::with_defaults(Vec::new())
    }

    /// Creates an empty container whose registrations start from `defaults`.
    pub fn with_defaults(defaults: Vec<RegistrationOption>) -> Self {
        Self {
            groups: GroupMap::default(),
            defaults,
            observers: Observers::new(),
        }
    }

    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// The options applied before every registration's own options.
    pub fn default_options(&self) -> &[RegistrationOption] {
        &self.defaults
    }

    // ----- Typed registrations -----

    /// Registers a fixed value. Every resolution returns a clone of the same
    /// `Arc`, whatever the lifetime.
    ///
    /// ```
    /// use ferrous_locator::{Container, Resolver};
    /// use std::sync::Arc;
    ///
    /// let value = Arc::new(String::from("shared"));
    /// let mut container = Container::new();
    /// container.register_instance(value.clone(), &[]);
    ///
    /// assert!(Arc::ptr_eq(&container.get::<String>().unwrap(), &value));
    /// ```
    pub fn register_instance<T>(&mut self, value: Arc<T>, options: &[RegistrationOption]) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.register_instance_by_key(key_of::<T>(), Instance::new(value), options)
    }

    /// Registers a factory producing `T`. The factory receives the container
    /// so it can resolve its own dependencies.
    pub fn register_dynamic<T, F>(&mut self, factory: F, options: &[RegistrationOption]) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn ResolverCore) -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        self.register_dynamic_by_key(key_of::<T>(), erase_factory(factory), options)
    }

    /// Registers a function whose parameters are resolved at each call, under
    /// the type it returns.
    ///
    /// The function must return `Arc<T>` or `Result<Arc<T>, E>`. Any other
    /// return shape fails with [`DiError::Validation`](crate::DiError::Validation)
    /// and leaves the container unchanged.
    ///
    /// ```
    /// use ferrous_locator::{Container, Resolver};
    /// use std::sync::Arc;
    ///
    /// struct Port(u16);
    /// struct Address(String);
    ///
    /// let mut container = Container::new();
    /// container.register_instance(Arc::new(Port(8080)), &[]);
    /// container
    ///     .register_constructor(|port: Arc<Port>| Arc::new(Address(format!("0.0.0.0:{}", port.0))), &[])
    ///     .unwrap();
    ///
    /// assert_eq!(container.get::<Address>().unwrap().0, "0.0.0.0:8080");
    /// ```
    pub fn register_constructor<Args, F>(
        &mut self,
        constructor: F,
        options: &[RegistrationOption],
    ) -> DiResult<&mut Self>
    where
        Args: 'static,
        F: Callable<Args> + Send + Sync + 'static,
    {
        let (key, factory) = invoke::constructor_factory::<Args, F>(constructor)?;
        Ok(self.register_dynamic_by_key(key, factory, options))
    }

    /// Removes every registration of `T`, then registers `value`.
    pub fn replace_instance<T>(&mut self, value: Arc<T>, options: &[RegistrationOption]) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.replace_instance_by_key(key_of::<T>(), Instance::new(value), options)
    }

    /// Removes every registration of `T`, then registers `factory`.
    pub fn replace_dynamic<T, F>(&mut self, factory: F, options: &[RegistrationOption]) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn ResolverCore) -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        self.replace_dynamic_by_key(key_of::<T>(), erase_factory(factory), options)
    }

    /// Removes every registration of `T`. Returns whether anything was removed.
    pub fn remove_all<T: ?Sized + 'static>(&mut self) -> bool {
        self.remove_all_by_key(&key_of::<T>())
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.contains_key(&key_of::<T>())
    }

    // ----- Registrations by key -----

    pub fn register_instance_by_key(
        &mut self,
        key: TypeKey,
        instance: Instance,
        options: &[RegistrationOption],
    ) -> &mut Self {
        let factory: Factory = Arc::new(move |_: &dyn ResolverCore| Ok(instance.clone()));
        self.register_dynamic_by_key(key, factory, options)
    }

    /// Stores `factory` under `key` with the container defaults followed by
    /// `options`. Named registrations overwrite an existing entry of the same
    /// name; anonymous ones are appended.
    pub fn register_dynamic_by_key(
        &mut self,
        key: TypeKey,
        factory: Factory,
        options: &[RegistrationOption],
    ) -> &mut Self {
        let options = RegistrationOptions::resolve(&self.defaults, options);
        tracing::debug!(
            type_name = key.type_name(),
            name = %options.name,
            lifetime = ?options.lifetime,
            "registering"
        );
        self.observers.registered(&key, &options);
        self.groups
            .entry(key)
            .or_default()
            .insert(RegistrationItem::new(factory, options));
        self
    }

    pub fn replace_instance_by_key(
        &mut self,
        key: TypeKey,
        instance: Instance,
        options: &[RegistrationOption],
    ) -> &mut Self {
        self.remove_all_by_key(&key);
        self.register_instance_by_key(key, instance, options)
    }

    pub fn replace_dynamic_by_key(
        &mut self,
        key: TypeKey,
        factory: Factory,
        options: &[RegistrationOption],
    ) -> &mut Self {
        self.remove_all_by_key(&key);
        self.register_dynamic_by_key(key, factory, options)
    }

    pub fn remove_all_by_key(&mut self, key: &TypeKey) -> bool {
        let removed = self.groups.remove(key).is_some();
        if removed {
            tracing::debug!(type_name = key.type_name(), "removed all registrations");
            self.observers.removed(key);
        }
        removed
    }

    pub fn contains_key(&self, key: &TypeKey) -> bool {
        self.groups.contains_key(key)
    }

    /// Number of registrations stored for `key`, named and anonymous.
    pub fn registration_count(&self, key: &TypeKey) -> usize {
        self.groups.get(key).map_or(0, RegistrationGroup::len)
    }

    /// Number of types with at least one registration.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("types", &self.groups.len())
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

fn erase_factory<T, F>(factory: F) -> Factory
where
    T: ?Sized + Send + Sync + 'static,
    F: Fn(&dyn ResolverCore) -> DiResult<Arc<T>> + Send + Sync + 'static,
{
    Arc::new(move |resolver: &dyn ResolverCore| factory(resolver).map(Instance::new))
}
