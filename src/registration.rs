//! Registration items and the per-type groups that hold them.

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;

use crate::error::DiResult;
use crate::instance::Instance;
use crate::options::RegistrationOptions;
use crate::traits::ResolverCore;

/// Erased factory stored for every registration.
pub type Factory = Arc<dyn Fn(&dyn ResolverCore) -> DiResult<Instance> + Send + Sync>;

/// One factory binding with its effective options.
pub(crate) struct RegistrationItem {
    pub(crate) options: RegistrationOptions,
    factory: Factory,
    /// First outcome of a static registration, error included
    memo: OnceCell<DiResult<Instance>>,
}

impl RegistrationItem {
    pub(crate) fn new(factory: Factory, options: RegistrationOptions) -> Self {
        Self {
            options,
            factory,
            memo: OnceCell::new(),
        }
    }

    /// Runs the factory, or returns the memoized outcome for static items.
    pub(crate) fn resolve(&self, resolver: &dyn ResolverCore) -> DiResult<Instance> {
        if self.options.lifetime.is_memoized() {
            self.memo.get_or_init(|| (self.factory)(resolver)).clone()
        } else {
            (self.factory)(resolver)
        }
    }

    #[cfg(test)]
    pub(crate) fn is_memoized(&self) -> bool {
        self.memo.get().is_some()
    }
}

/// Anonymous items in registration order plus the named items of one type.
///
/// An item lives in exactly one of the two collections, chosen by whether its
/// name is empty.
#[derive(Default)]
pub(crate) struct RegistrationGroup {
    pub(crate) items: Vec<RegistrationItem>,
    pub(crate) named: IndexMap<String, RegistrationItem>,
}

impl RegistrationGroup {
    pub(crate) fn insert(&mut self, item: RegistrationItem) {
        if item.options.is_anonymous() {
            self.items.push(item);
        } else {
            self.named.insert(item.options.name.clone(), item);
        }
    }

    /// The item `resolve` picks: the last anonymous one, else the most
    /// recently added name.
    pub(crate) fn primary(&self) -> Option<&RegistrationItem> {
        self.items.last().or_else(|| self.named.values().last())
    }

    /// Named items first, then anonymous ones in insertion order.
    pub(crate) fn all(&self) -> impl Iterator<Item = &RegistrationItem> {
        self.named.values().chain(self.items.iter())
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len() + self.named.len()
    }
}
