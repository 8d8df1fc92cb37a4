//! Immutable module descriptors.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::key::{KeyError, ModuleKey};
use crate::version::{ConstraintParseError, Version, VersionConstraint};

/// Dependency declarations keyed by target module, iterated in key order.
pub type DependencyMap = BTreeMap<ModuleKey, VersionConstraint>;

/// Which of a descriptor's three dependency maps an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Required,
    Optional,
    Conflict,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Optional => f.write_str("optional"),
            Self::Conflict => f.write_str("conflict"),
        }
    }
}

/// One module's identity, version and dependency declarations.
///
/// Descriptors are produced by discovery and never change afterwards; all
/// fields are private and exposed read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDescriptor {
    key: ModuleKey,
    version: String,
    parsed_version: Version,
    required: DependencyMap,
    optional: DependencyMap,
    conflicts: DependencyMap,
    interfaces: Vec<String>,
    tags: Vec<String>,
}

/// A descriptor could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error("module `{module}`: {kind} entry `{dependency}`: {source}")]
    Constraint {
        module: String,
        dependency: String,
        kind: DependencyKind,
        #[source]
        source: ConstraintParseError,
    },

    #[error("module `{module}` declares {kind} entry `{dependency}` twice")]
    DuplicateEntry {
        module: String,
        dependency: String,
        kind: DependencyKind,
    },
}

impl ModuleDescriptor {
    /// Construct a descriptor from already-parsed dependency maps.
    pub fn new(
        key: ModuleKey,
        version: impl Into<String>,
        required: DependencyMap,
        optional: DependencyMap,
        conflicts: DependencyMap,
    ) -> Self {
        let version = version.into();
        Self {
            key,
            parsed_version: Version::parse(&version),
            version,
            required,
            optional,
            conflicts,
            interfaces: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Start building a descriptor from raw strings.
    pub fn builder(key: impl Into<String>, version: impl Into<String>) -> ModuleDescriptorBuilder {
        ModuleDescriptorBuilder::new(key, version)
    }

    pub fn key(&self) -> &ModuleKey {
        &self.key
    }

    /// The version exactly as declared.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn parsed_version(&self) -> &Version {
        &self.parsed_version
    }

    pub fn required(&self) -> &DependencyMap {
        &self.required
    }

    pub fn optional(&self) -> &DependencyMap {
        &self.optional
    }

    pub fn conflicts(&self) -> &DependencyMap {
        &self.conflicts
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces.iter().any(|i| i == interface)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Entries of one dependency map.
    pub fn entries(&self, kind: DependencyKind) -> &DependencyMap {
        match kind {
            DependencyKind::Required => &self.required,
            DependencyKind::Optional => &self.optional,
            DependencyKind::Conflict => &self.conflicts,
        }
    }
}

impl fmt::Display for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.key, self.version)
    }
}

/// Builder for [`ModuleDescriptor`] that parses keys and constraints eagerly.
///
/// The first invalid key or constraint is remembered and returned from
/// [`build`](Self::build); later calls are ignored once an error is recorded.
#[derive(Debug)]
pub struct ModuleDescriptorBuilder {
    key: String,
    version: String,
    required: DependencyMap,
    optional: DependencyMap,
    conflicts: DependencyMap,
    interfaces: Vec<String>,
    tags: Vec<String>,
    error: Option<DescriptorError>,
}

impl ModuleDescriptorBuilder {
    fn new(key: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version: version.into(),
            required: DependencyMap::new(),
            optional: DependencyMap::new(),
            conflicts: DependencyMap::new(),
            interfaces: Vec::new(),
            tags: Vec::new(),
            error: None,
        }
    }

    pub fn requires(self, dependency: &str, constraint: &str) -> Self {
        self.entry(DependencyKind::Required, dependency, constraint)
    }

    pub fn optional(self, dependency: &str, constraint: &str) -> Self {
        self.entry(DependencyKind::Optional, dependency, constraint)
    }

    pub fn conflicts(self, module: &str, constraint: &str) -> Self {
        self.entry(DependencyKind::Conflict, module, constraint)
    }

    pub fn interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add an entry of the given kind.
    pub fn entry(mut self, kind: DependencyKind, dependency: &str, constraint: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        let key = match ModuleKey::new(dependency) {
            Ok(key) => key,
            Err(e) => {
                self.error = Some(e.into());
                return self;
            }
        };
        let constraint = match VersionConstraint::parse(constraint) {
            Ok(c) => c,
            Err(source) => {
                self.error = Some(DescriptorError::Constraint {
                    module: self.key.clone(),
                    dependency: dependency.to_string(),
                    kind,
                    source,
                });
                return self;
            }
        };
        let map = match kind {
            DependencyKind::Required => &mut self.required,
            DependencyKind::Optional => &mut self.optional,
            DependencyKind::Conflict => &mut self.conflicts,
        };
        if map.insert(key, constraint).is_some() {
            self.error = Some(DescriptorError::DuplicateEntry {
                module: self.key.clone(),
                dependency: dependency.to_string(),
                kind,
            });
        }
        self
    }

    pub fn build(self) -> Result<ModuleDescriptor, DescriptorError> {
        let key = ModuleKey::new(self.key)?;
        if let Some(error) = self.error {
            return Err(error);
        }
        let mut descriptor =
            ModuleDescriptor::new(key, self.version, self.required, self.optional, self.conflicts);
        descriptor.interfaces = self.interfaces;
        descriptor.tags = self.tags;
        Ok(descriptor)
    }
}
