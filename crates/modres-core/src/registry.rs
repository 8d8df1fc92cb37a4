//! Caller-owned lookup table of discovered modules.
//!
//! The registry keeps descriptors in registration order and maintains two
//! secondary indexes, by implemented interface and by free-form tag. The
//! indexes are for lookups only and never influence load ordering.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::descriptor::ModuleDescriptor;
use crate::key::ModuleKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("module `{0}` is already registered")]
    Duplicate(ModuleKey),
}

/// Descriptors by key, in registration order.
#[derive(Debug, Default, Clone)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
    index: HashMap<ModuleKey, usize>,
    by_interface: BTreeMap<String, Vec<usize>>,
    by_tag: BTreeMap<String, Vec<usize>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from descriptors, rejecting duplicate keys.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = ModuleDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, descriptor: ModuleDescriptor) -> Result<(), RegistryError> {
        if self.index.contains_key(descriptor.key()) {
            return Err(RegistryError::Duplicate(descriptor.key().clone()));
        }
        let slot = self.modules.len();
        for interface in descriptor.interfaces() {
            let slots = self.by_interface.entry(interface.clone()).or_default();
            if !slots.contains(&slot) {
                slots.push(slot);
            }
        }
        for tag in descriptor.tags() {
            let slots = self.by_tag.entry(tag.clone()).or_default();
            if !slots.contains(&slot) {
                slots.push(slot);
            }
        }
        tracing::trace!("registered module {descriptor}");
        self.index.insert(descriptor.key().clone(), slot);
        self.modules.push(descriptor);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ModuleDescriptor> {
        self.index.get(key).map(|&slot| &self.modules[slot])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// All descriptors in registration order.
    pub fn descriptors(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    /// Modules implementing `interface`, in registration order.
    pub fn by_interface(&self, interface: &str) -> Vec<&ModuleDescriptor> {
        self.lookup(&self.by_interface, interface)
    }

    /// Modules carrying `tag`, in registration order.
    pub fn by_tag(&self, tag: &str) -> Vec<&ModuleDescriptor> {
        self.lookup(&self.by_tag, tag)
    }

    /// Every known interface name, sorted.
    pub fn interfaces(&self) -> impl Iterator<Item = &str> {
        self.by_interface.keys().map(String::as_str)
    }

    /// Every known tag, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn lookup(&self, index: &BTreeMap<String, Vec<usize>>, name: &str) -> Vec<&ModuleDescriptor> {
        index
            .get(name)
            .map(|slots| slots.iter().map(|&slot| &self.modules[slot]).collect())
            .unwrap_or_default()
    }
}
