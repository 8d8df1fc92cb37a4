//! Checks declared constraints against the versions actually present.

use modres_core::descriptor::DependencyKind;

use crate::conflict::{ConstraintViolation, ModuleConflict, ValidationReport};
use crate::graph::Graph;

/// Walks a built [`Graph`] and evaluates every declared constraint.
pub struct VersionValidator;

impl VersionValidator {
    /// Evaluate every required and optional edge present in the graph, and
    /// every conflict entry whose target is present.
    ///
    /// Absent optional targets were already dropped by the builder and are
    /// never checked. The report holds every problem, not just the first.
    pub fn validate_constraints(graph: &Graph<'_>) -> ValidationReport {
        let mut report = ValidationReport::new();

        for descriptor in graph.descriptors() {
            for kind in [DependencyKind::Required, DependencyKind::Optional] {
                for (dep, constraint) in descriptor.entries(kind) {
                    let Some(target) = graph.descriptor(dep.as_str()) else {
                        continue;
                    };
                    if !constraint.matches(target.parsed_version()) {
                        tracing::debug!(
                            "{} needs {dep} {constraint}, found {}",
                            descriptor.key(),
                            target.version()
                        );
                        report.violations.push(ConstraintViolation {
                            module: descriptor.key().clone(),
                            dependency: dep.clone(),
                            kind,
                            constraint: constraint.clone(),
                            actual: target.version().to_string(),
                        });
                    }
                }
            }

            for (other, constraint) in descriptor.conflicts() {
                let Some(target) = graph.descriptor(other.as_str()) else {
                    continue;
                };
                if constraint.matches(target.parsed_version()) {
                    tracing::debug!(
                        "{} conflicts with present {}",
                        descriptor.key(),
                        target
                    );
                    report.conflicts.push(ModuleConflict {
                        module: descriptor.key().clone(),
                        conflicts_with: other.clone(),
                        constraint: constraint.clone(),
                        actual: target.version().to_string(),
                    });
                }
            }
        }

        report
    }
}
