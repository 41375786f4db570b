use std::sync::Arc;

use crate::lifetime::Lifetime;
use crate::observer::{DiObserver, Observers};
use crate::options::{with_lifetime, RegistrationOption};

use super::Container;

/// Configures default options and observers before creating a [`Container`].
///
/// ```
/// use ferrous_locator::{Container, Lifetime, LoggingObserver};
/// use std::sync::Arc;
///
/// let container = Container::builder()
///     .default_lifetime(Lifetime::Static)
///     .observer(Arc::new(LoggingObserver::new()))
///     .build();
/// assert_eq!(container.default_options().len(), 1);
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
    defaults: Vec<RegistrationOption>,
    observers: Observers,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_lifetime(self, lifetime: Lifetime) -> Self {
        self.default_option(with_lifetime(lifetime))
    }

    /// Appends a default option. Later defaults win over earlier ones.
    pub fn default_option(mut self, option: RegistrationOption) -> Self {
        self.defaults.push(option);
        self
    }

    pub fn default_options(mut self, options: impl IntoIterator<Item = RegistrationOption>) -> Self {
        self.defaults.extend(options);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn DiObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    pub fn build(self) -> Container {
        let mut container = Container::with_defaults(self.defaults);
        container.observers = self.observers;
        container
    }
}
