//! Diagnostic observers for registration and resolution events.
//!
//! Observers are called synchronously on the resolving thread, so keep them
//! cheap. [`LoggingObserver`] forwards every event to `tracing`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{DiError, DiResult};
use crate::key::TypeKey;
use crate::options::RegistrationOptions;

/// Hooks invoked by a [`Container`](crate::Container).
///
/// Every method has an empty default so implementations only override what
/// they care about.
///
/// # Examples
///
/// ```
/// use ferrous_locator::{Container, DiObserver, Resolver, TypeKey};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct CountingObserver {
///     resolved: AtomicUsize,
/// }
///
/// impl DiObserver for CountingObserver {
///     fn resolved(&self, _key: &TypeKey, _duration: Duration) {
///         self.resolved.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let observer = Arc::new(CountingObserver::default());
/// let mut container = Container::builder().observer(observer.clone()).build();
/// container.register_instance(Arc::new(5u8), &[]);
///
/// container.get::<u8>().unwrap();
/// assert_eq!(observer.resolved.load(Ordering::SeqCst), 1);
/// ```
pub trait DiObserver: Send + Sync {
    /// A registration was added under `key`.
    fn registered(&self, _key: &TypeKey, _options: &RegistrationOptions) {}

    /// All registrations of `key` were removed.
    fn removed(&self, _key: &TypeKey) {}

    /// A registration of `key` is about to be resolved.
    fn resolving(&self, _key: &TypeKey) {}

    /// A registration of `key` resolved successfully.
    fn resolved(&self, _key: &TypeKey, _duration: Duration) {}

    /// Resolving a registration of `key` failed.
    fn failed(&self, _key: &TypeKey, _error: &DiError) {}
}

/// Observer that emits `tracing` events.
///
/// Successful resolutions are logged at `TRACE`, registrations and removals
/// at `DEBUG`, failures at `WARN`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl LoggingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl DiObserver for LoggingObserver {
    fn registered(&self, key: &TypeKey, options: &RegistrationOptions) {
        tracing::debug!(
            type_name = key.type_name(),
            name = %options.name,
            lifetime = ?options.lifetime,
            "registered"
        );
    }

    fn removed(&self, key: &TypeKey) {
        tracing::debug!(type_name = key.type_name(), "removed all registrations");
    }

    fn resolving(&self, key: &TypeKey) {
        tracing::trace!(type_name = key.type_name(), "resolving");
    }

    fn resolved(&self, key: &TypeKey, duration: Duration) {
        tracing::trace!(type_name = key.type_name(), ?duration, "resolved");
    }

    fn failed(&self, key: &TypeKey, error: &DiError) {
        tracing::warn!(type_name = key.type_name(), %error, "resolution failed");
    }
}

/// The observers attached to one container.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    inner: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.inner.push(observer);
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub(crate) fn registered(&self, key: &TypeKey, options: &RegistrationOptions) {
        for observer in &self.inner {
            observer.registered(key, options);
        }
    }

    pub(crate) fn removed(&self, key: &TypeKey) {
        for observer in &self.inner {
            observer.removed(key);
        }
    }

    /// Runs `resolve`, reporting start, duration and failure.
    pub(crate) fn observe<T>(&self, key: &TypeKey, resolve: impl FnOnce() -> DiResult<T>) -> DiResult<T> {
        if self.is_empty() {
            return resolve();
        }

        for observer in &self.inner {
            observer.resolving(key);
        }
        let started = Instant::now();
        let result = resolve();
        match &result {
            Ok(_) => {
                let elapsed = started.elapsed();
                for observer in &self.inner {
                    observer.resolved(key, elapsed);
                }
            }
            Err(err) => {
                for observer in &self.inner {
                    observer.failed(key, err);
                }
            }
        }
        result
    }
}
