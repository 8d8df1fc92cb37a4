//! Load ordering: build, validate, then depth-first topological sort with
//! cycle detection.

use std::fmt;

use modres_core::descriptor::ModuleDescriptor;
use modres_core::key::ModuleKey;
use modres_core::registry::ModuleRegistry;
use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::error::ResolveError;
use crate::graph::{BuildError, Graph, GraphBuilder, VisitState};
use crate::validator::VersionValidator;

/// Module keys in boot order: every module appears after all of its
/// dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LoadOrder {
    keys: Vec<ModuleKey>,
}

impl LoadOrder {
    pub fn keys(&self) -> &[ModuleKey] {
        &self.keys
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModuleKey> {
        self.keys.iter()
    }

    /// Position of `key` in the order, if present.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.as_str() == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn into_vec(self) -> Vec<ModuleKey> {
        self.keys
    }
}

impl<'a> IntoIterator for &'a LoadOrder {
    type Item = &'a ModuleKey;
    type IntoIter = std::slice::Iter<'a, ModuleKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl fmt::Display for LoadOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

/// Orders modules so dependencies load before their dependents.
///
/// The resolver holds no state; every call builds and discards its own graph,
/// so one instance may be shared freely between threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyResolver;

impl DependencyResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a load order for `descriptors`.
    ///
    /// Steps, each fatal on failure: build the graph (missing required
    /// dependencies), validate versions (violations, then conflicts), then
    /// visit modules depth-first in discovery order (cycles). Modules with no
    /// ordering relation keep their discovery order.
    pub fn resolve(&self, descriptors: &[ModuleDescriptor]) -> Result<LoadOrder, ResolveError> {
        tracing::debug!("resolving {} modules", descriptors.len());

        let outcome = GraphBuilder::build(descriptors);
        if let Some(err) = build_failure(&outcome.errors) {
            return Err(err);
        }
        let mut graph = outcome.graph;

        let report = VersionValidator::validate_constraints(&graph);
        if !report.violations.is_empty() {
            return Err(ResolveError::VersionConstraint {
                violations: report.violations,
            });
        }
        if let Some(first) = report.conflicts.first() {
            return Err(ResolveError::ConflictDetected {
                module: first.module.clone(),
                conflicts_with: first.conflicts_with.clone(),
                constraint: first.constraint.clone(),
                conflicts: report.conflicts,
            });
        }

        let order = Traversal::new(&mut graph).run()?;
        tracing::debug!("load order: {order}");
        Ok(order)
    }

    /// Resolve every module in `registry`, in registration order.
    pub fn resolve_registry(&self, registry: &ModuleRegistry) -> Result<LoadOrder, ResolveError> {
        self.resolve(registry.descriptors())
    }
}

/// Resolve a load order with a default [`DependencyResolver`].
pub fn resolve(descriptors: &[ModuleDescriptor]) -> Result<LoadOrder, ResolveError> {
    DependencyResolver::new().resolve(descriptors)
}

fn build_failure(errors: &[BuildError]) -> Option<ResolveError> {
    if let Some(key) = errors.iter().find_map(|e| match e {
        BuildError::DuplicateModule(key) => Some(key),
        BuildError::MissingDependency(_) => None,
    }) {
        return Some(ResolveError::DuplicateModule(key.clone()));
    }

    let missing: Vec<_> = errors
        .iter()
        .filter_map(|e| match e {
            BuildError::MissingDependency(edge) => Some(edge.clone()),
            BuildError::DuplicateModule(_) => None,
        })
        .collect();
    let first = missing.first()?;
    Some(ResolveError::MissingDependency {
        module: first.module.clone(),
        dependency: first.dependency.clone(),
        missing,
    })
}

/// Depth-first post-order walk over a freshly built graph.
///
/// The walk keeps its own stack of open modules so arbitrarily deep
/// dependency chains never grow the call stack.
struct Traversal<'g, 'a> {
    graph: &'g mut Graph<'a>,
    stack: Vec<Frame>,
    order: Vec<ModuleKey>,
}

/// A module being visited and the next dependency to descend into.
struct Frame {
    node: NodeIndex,
    deps: Vec<NodeIndex>,
    next: usize,
}

impl<'g, 'a> Traversal<'g, 'a> {
    fn new(graph: &'g mut Graph<'a>) -> Self {
        let capacity = graph.len();
        Self {
            graph,
            stack: Vec::new(),
            order: Vec::with_capacity(capacity),
        }
    }

    fn run(mut self) -> Result<LoadOrder, ResolveError> {
        let roots: Vec<NodeIndex> = self.graph.indices().collect();
        for idx in roots {
            if self.graph.node_at(idx).state == VisitState::Unvisited {
                self.visit(idx)?;
            }
        }
        Ok(LoadOrder { keys: self.order })
    }

    fn visit(&mut self, root: NodeIndex) -> Result<(), ResolveError> {
        self.enter(root);

        while let Some(frame) = self.stack.last_mut() {
            let node = frame.node;
            let Some(dep) = frame.deps.get(frame.next).copied() else {
                self.stack.pop();
                self.graph.set_state(node, VisitState::Resolved);
                self.order.push(self.graph.node_at(node).key().clone());
                continue;
            };
            frame.next += 1;

            match self.graph.node_at(dep).state {
                VisitState::Resolved => {}
                VisitState::Visiting => return Err(self.cycle_at(dep)),
                VisitState::Unvisited => self.enter(dep),
            }
        }
        Ok(())
    }

    fn enter(&mut self, idx: NodeIndex) {
        tracing::trace!("visiting {}", self.graph.node_at(idx).key());
        self.graph.set_state(idx, VisitState::Visiting);
        let deps = self.graph.dependency_indices(idx);
        self.stack.push(Frame {
            node: idx,
            deps,
            next: 0,
        });
    }

    fn cycle_at(&self, idx: NodeIndex) -> ResolveError {
        let start = self
            .stack
            .iter()
            .position(|frame| frame.node == idx)
            .unwrap_or(0);
        let cycle: Vec<ModuleKey> = self.stack[start..]
            .iter()
            .map(|frame| frame.node)
            .chain(std::iter::once(idx))
            .map(|i| self.graph.node_at(i).key().clone())
            .collect();
        let module = self.graph.node_at(idx).key().clone();
        tracing::debug!("cycle re-entered at {module}");
        ResolveError::CircularDependency { module, cycle }
    }
}
