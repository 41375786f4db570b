//! Registration lifetimes.

/// Lifetime controlling whether a registration's value is memoized.
///
/// # Examples
///
/// ```rust
/// use ferrous_locator::{Container, Lifetime, Resolver, with_lifetime};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let mut container = Container::new();
///
/// let counter = calls.clone();
/// container.register_dynamic::<usize, _>(
///     move |_| Ok(Arc::new(counter.fetch_add(1, Ordering::SeqCst))),
///     &[with_lifetime(Lifetime::Static)],
/// );
///
/// let first = container.get::<usize>().unwrap();
/// let second = container.get::<usize>().unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Lifetime {
    /// Factory runs once; its outcome, value or error, is reused for the
    /// life of the container.
    Static,
    /// Factory runs on every resolution. Nothing is cached.
    #[default]
    PerRequest,
}

impl Lifetime {
    /// Whether resolutions under this lifetime are memoized.
    pub fn is_memoized(self) -> bool {
        matches!(self, Lifetime::Static)
    }
}
