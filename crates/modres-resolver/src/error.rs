use miette::Diagnostic;
use thiserror::Error;

use modres_core::descriptor::DescriptorError;
use modres_core::key::ModuleKey;
use modres_core::version::VersionConstraint;

use crate::conflict::{ConstraintViolation, ModuleConflict};
use crate::graph::MissingEdge;

/// Why a descriptor set could not be ordered. Every variant is fatal.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    /// A constraint expression or module key was malformed.
    #[error(transparent)]
    #[diagnostic(
        code(modres::resolve::parse),
        help("constraints are `*`, `^X.Y.Z`, or space-separated `<op>X.Y.Z` terms with op one of =, >, >=, <, <=")
    )]
    Parse(#[from] DescriptorError),

    /// A required dependency is absent. `missing` holds every absent edge;
    /// `module` and `dependency` name the first.
    #[error("module `{module}` requires `{dependency}`, which is not present{}", more(.missing.len()))]
    #[diagnostic(
        code(modres::resolve::missing_dependency),
        help("add the missing module or move it to optional dependencies")
    )]
    MissingDependency {
        module: ModuleKey,
        dependency: ModuleKey,
        missing: Vec<MissingEdge>,
    },

    /// The same module key was supplied twice.
    #[error("module `{0}` was supplied more than once")]
    #[diagnostic(code(modres::resolve::duplicate_module))]
    DuplicateModule(ModuleKey),

    /// Present dependencies fail their declared constraints.
    #[error("{} version constraint violation(s):{}", .violations.len(), bullets(.violations))]
    #[diagnostic(
        code(modres::resolve::version_constraint),
        help("upgrade or downgrade the listed modules, or relax the constraints")
    )]
    VersionConstraint { violations: Vec<ConstraintViolation> },

    /// Two present modules are declared mutually exclusive. `module`,
    /// `conflicts_with` and `constraint` describe the first conflict.
    #[error("module `{module}` conflicts with `{conflicts_with}` {constraint}{}", more(.conflicts.len()))]
    #[diagnostic(
        code(modres::resolve::conflict),
        help("remove one of the conflicting modules")
    )]
    ConflictDetected {
        module: ModuleKey,
        conflicts_with: ModuleKey,
        constraint: VersionConstraint,
        conflicts: Vec<ModuleConflict>,
    },

    /// The dependency graph contains a cycle. `module` is where the cycle
    /// was re-entered; `cycle` runs from it back to itself.
    #[error("circular dependency detected at `{module}`: {}", path(.cycle))]
    #[diagnostic(
        code(modres::resolve::circular_dependency),
        help("break the cycle by making one of the edges optional or removing it")
    )]
    CircularDependency {
        module: ModuleKey,
        cycle: Vec<ModuleKey>,
    },
}

impl ResolveError {
    /// Every individual problem carried by this error, one per line.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::MissingDependency { missing, .. } => {
                missing.iter().map(ToString::to_string).collect()
            }
            Self::VersionConstraint { violations } => {
                violations.iter().map(ToString::to_string).collect()
            }
            Self::ConflictDetected { conflicts, .. } => {
                conflicts.iter().map(ToString::to_string).collect()
            }
            other => vec![other.to_string()],
        }
    }
}

fn more(total: usize) -> String {
    match total {
        0 | 1 => String::new(),
        n => format!(" (and {} more)", n - 1),
    }
}

fn bullets<T: std::fmt::Display>(items: &[T]) -> String {
    items.iter().map(|item| format!("\n  - {item}")).collect()
}

fn path(cycle: &[ModuleKey]) -> String {
    cycle
        .iter()
        .map(ModuleKey::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
