//! Version constraint violations and module conflicts.

use std::fmt;

use modres_core::descriptor::DependencyKind;
use modres_core::key::ModuleKey;
use modres_core::version::VersionConstraint;

/// A present dependency whose version fails the declared constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub module: ModuleKey,
    pub dependency: ModuleKey,
    pub kind: DependencyKind,
    pub constraint: VersionConstraint,
    pub actual: String,
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requires {} {}, but {} is present",
            self.module, self.dependency, self.constraint, self.actual
        )
    }
}

/// Two present modules declared mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConflict {
    pub module: ModuleKey,
    pub conflicts_with: ModuleKey,
    pub constraint: VersionConstraint,
    pub actual: String,
}

impl fmt::Display for ModuleConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} conflicts with {} {}, but {} is present",
            self.module, self.conflicts_with, self.constraint, self.actual
        )
    }
}

/// Everything wrong with the versions in a graph, gathered in one pass.
#[derive(Debug, Default, Clone)]
pub struct ValidationReport {
    pub violations: Vec<ConstraintViolation>,
    pub conflicts: Vec<ModuleConflict>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only when there are no violations and no conflicts.
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty() && self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len() + self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_ok()
    }

    /// Every problem as a message, violations first.
    pub fn messages(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(ToString::to_string)
            .chain(self.conflicts.iter().map(ToString::to_string))
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return write!(f, "No version problems.");
        }
        if !self.violations.is_empty() {
            writeln!(f, "Version constraint violations ({}):", self.violations.len())?;
            for v in &self.violations {
                let kind = match v.kind {
                    DependencyKind::Optional => " (optional)",
                    _ => "",
                };
                writeln!(f, "  {v}{kind}")?;
            }
        }
        if !self.conflicts.is_empty() {
            writeln!(f, "Module conflicts ({}):", self.conflicts.len())?;
            for c in &self.conflicts {
                writeln!(f, "  {c}")?;
            }
        }
        Ok(())
    }
}
