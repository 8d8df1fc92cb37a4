use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use modres_util::errors::ModresError;

use crate::descriptor::{DependencyKind, ModuleDescriptor};
use crate::registry::ModuleRegistry;

/// The parsed representation of a `Modules.toml` file.
///
/// Modules are listed as `[[module]]` tables; their order in the file is the
/// discovery order the resolver uses for tie-breaking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleManifest {
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleEntry>,
}

/// One `[[module]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub key: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requires: BTreeMap<String, String>,
    #[serde(default)]
    pub optional: BTreeMap<String, String>,
    #[serde(default)]
    pub conflicts: BTreeMap<String, String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ModuleEntry {
    /// Parse this entry into an immutable descriptor.
    pub fn to_descriptor(&self) -> miette::Result<ModuleDescriptor> {
        let mut builder = ModuleDescriptor::builder(self.key.as_str(), self.version.as_str());
        for (kind, map) in [
            (DependencyKind::Required, &self.requires),
            (DependencyKind::Optional, &self.optional),
            (DependencyKind::Conflict, &self.conflicts),
        ] {
            for (dependency, constraint) in map {
                builder = builder.entry(kind, dependency, constraint);
            }
        }
        for interface in &self.interfaces {
            builder = builder.interface(interface.as_str());
        }
        for tag in &self.tags {
            builder = builder.tag(tag.as_str());
        }
        builder.build().map_err(|e| {
            ModresError::Manifest {
                message: e.to_string(),
            }
            .into()
        })
    }
}

impl ModuleManifest {
    /// Load and parse a `Modules.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ModresError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse a `Modules.toml` from a string.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            ModresError::Manifest {
                message: format!("Failed to parse Modules.toml: {e}"),
            }
            .into()
        })
    }

    /// Convert every entry into a descriptor, in file order.
    pub fn to_descriptors(&self) -> miette::Result<Vec<ModuleDescriptor>> {
        self.modules.iter().map(ModuleEntry::to_descriptor).collect()
    }

    /// Convert every entry and register it, rejecting duplicate keys.
    pub fn to_registry(&self) -> miette::Result<ModuleRegistry> {
        let descriptors = self.to_descriptors()?;
        ModuleRegistry::from_descriptors(descriptors).map_err(|e| {
            ModresError::Manifest {
                message: e.to_string(),
            }
            .into()
        })
    }
}
