//! Operation: report every problem in a module set at once.
//!
//! Resolution stops at the first failing stage. `check` keeps going: it
//! collects malformed entries, duplicates, missing dependencies, version
//! violations, conflicts and cycles in a single pass.

use std::fmt;
use std::path::{Path, PathBuf};

use modres_core::descriptor::ModuleDescriptor;
use modres_core::key::ModuleKey;
use modres_resolver::conflict::ValidationReport;
use modres_resolver::graph::{BuildError, MissingEdge};
use modres_resolver::{GraphBuilder, VersionValidator};
use modres_util::errors::ModresError;

use crate::ops_setup;

/// Options for `modres check`.
#[derive(Debug, Default)]
pub struct CheckOptions {
    pub manifest: Option<PathBuf>,
}

/// Everything wrong with a module set.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub modules: usize,
    /// Manifest entries that could not be turned into descriptors.
    pub invalid: Vec<String>,
    pub duplicates: Vec<ModuleKey>,
    pub missing: Vec<MissingEdge>,
    pub validation: ValidationReport,
    /// Groups of modules that depend on each other in a loop.
    pub cycles: Vec<Vec<ModuleKey>>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.problem_count() == 0
    }

    pub fn problem_count(&self) -> usize {
        self.invalid.len()
            + self.duplicates.len()
            + self.missing.len()
            + self.validation.len()
            + self.cycles.len()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return writeln!(f, "No problems found in {} modules.", self.modules);
        }
        section(f, "Invalid entries", &self.invalid)?;
        section(f, "Duplicate modules", &self.duplicates)?;
        section(f, "Missing dependencies", &self.missing)?;
        if !self.validation.is_ok() {
            write!(f, "{}", self.validation)?;
        }
        let cycles: Vec<String> = self
            .cycles
            .iter()
            .map(|group| match group.as_slice() {
                [single] => format!("{single} depends on itself"),
                _ => group
                    .iter()
                    .map(ModuleKey::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();
        section(f, "Circular dependencies", &cycles)
    }
}

fn section<T: fmt::Display>(f: &mut fmt::Formatter<'_>, title: &str, items: &[T]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "{title} ({}):", items.len())?;
    for item in items {
        writeln!(f, "  {item}")?;
    }
    Ok(())
}

/// Check the manifest and print every problem. Fails if any were found.
pub fn check(cwd: &Path, opts: &CheckOptions) -> miette::Result<()> {
    let loaded = ops_setup::load(cwd, opts.manifest.as_deref())?;
    modres_util::progress::status("Checking", &loaded.path.display().to_string());

    let mut invalid = Vec::new();
    let mut descriptors = Vec::with_capacity(loaded.manifest.modules.len());
    for entry in &loaded.manifest.modules {
        match entry.to_descriptor() {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(e) => invalid.push(e.to_string()),
        }
    }

    let mut report = check_descriptors(&descriptors);
    report.modules = loaded.manifest.modules.len();
    report.invalid = invalid;

    print!("{report}");
    if report.is_ok() {
        modres_util::progress::status("Finished", "check passed");
        return Ok(());
    }
    Err(ModresError::Resolution {
        message: format!("{} problem(s) found", report.problem_count()),
    }
    .into())
}

/// Run every stage of resolution over `descriptors` without stopping early.
pub fn check_descriptors(descriptors: &[ModuleDescriptor]) -> CheckReport {
    let outcome = GraphBuilder::build(descriptors);

    let mut report = CheckReport {
        modules: descriptors.len(),
        ..CheckReport::default()
    };
    for error in &outcome.errors {
        match error {
            BuildError::DuplicateModule(key) => report.duplicates.push(key.clone()),
            BuildError::MissingDependency(edge) => report.missing.push(edge.clone()),
        }
    }

    report.validation = VersionValidator::validate_constraints(&outcome.graph);
    report.cycles = outcome
        .graph
        .cycles()
        .into_iter()
        .map(|group| group.into_iter().cloned().collect())
        .collect();

    tracing::debug!("check found {} problem(s)", report.problem_count());
    report
}
