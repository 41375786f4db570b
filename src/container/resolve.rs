use indexmap::IndexMap;

use crate::error::{DiError, DiResult};
use crate::instance::Instance;
use crate::key::TypeKey;
use crate::registration::{RegistrationGroup, RegistrationItem};
use crate::traits::ResolverCore;

use super::Container;

impl Container {
    fn group(&self, key: &TypeKey) -> DiResult<&RegistrationGroup> {
        self.groups
            .get(key)
            .ok_or(DiError::NotExist(key.type_name()))
    }

    fn resolve_item(&self, key: &TypeKey, item: &RegistrationItem) -> DiResult<Instance> {
        self.observers.observe(key, || item.resolve(self))
    }
}

impl ResolverCore for Container {
    fn resolve(&self, key: &TypeKey) -> DiResult<Instance> {
        let item = self
            .group(key)?
            .primary()
            .ok_or(DiError::NotExist(key.type_name()))?;
        self.resolve_item(key, item)
    }

    fn resolve_all(&self, key: &TypeKey) -> DiResult<Vec<Instance>> {
        self.group(key)?
            .all()
            .map(|item| self.resolve_item(key, item))
            .collect()
    }

    fn resolve_by_name(&self, key: &TypeKey, name: &str) -> DiResult<Instance> {
        let item = self
            .group(key)?
            .named
            .get(name)
            .ok_or_else(|| DiError::NameNotExist {
                type_name: key.type_name(),
                name: name.to_string(),
            })?;
        self.resolve_item(key, item)
    }

    fn resolve_map(&self, key: &TypeKey) -> DiResult<IndexMap<String, Instance>> {
        self.group(key)?
            .named
            .iter()
            .map(|(name, item)| Ok((name.clone(), self.resolve_item(key, item)?)))
            .collect()
    }
}
