//! Dependency graph construction and traversal.

use std::collections::{HashMap, HashSet};
use std::fmt;

use modres_core::descriptor::{DependencyKind, DependencyMap, ModuleDescriptor};
use modres_core::key::ModuleKey;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// Traversal state of a node during ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    #[default]
    Unvisited,
    Visiting,
    Resolved,
}

/// A node in the module graph.
#[derive(Debug, Clone)]
pub struct ModuleNode<'a> {
    pub descriptor: &'a ModuleDescriptor,
    pub state: VisitState,
}

impl ModuleNode<'_> {
    pub fn key(&self) -> &ModuleKey {
        self.descriptor.key()
    }
}

impl fmt::Display for ModuleNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor)
    }
}

/// Edge label: whether the dependency was declared required or optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepEdge {
    pub kind: DependencyKind,
}

/// A required dependency whose target is not in the descriptor set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingEdge {
    pub module: ModuleKey,
    pub dependency: ModuleKey,
}

impl fmt::Display for MissingEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requires missing dependency {}",
            self.module, self.dependency
        )
    }
}

/// A problem found while building the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    MissingDependency(MissingEdge),
    /// The same key was supplied twice; the later descriptor was ignored.
    DuplicateModule(ModuleKey),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDependency(edge) => edge.fmt(f),
            Self::DuplicateModule(key) => write!(f, "module {key} was supplied more than once"),
        }
    }
}

/// The graph together with every problem found while building it.
pub struct BuildOutcome<'a> {
    pub graph: Graph<'a>,
    pub errors: Vec<BuildError>,
}

impl BuildOutcome<'_> {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn missing(&self) -> impl Iterator<Item = &MissingEdge> {
        self.errors.iter().filter_map(|e| match e {
            BuildError::MissingDependency(edge) => Some(edge),
            BuildError::DuplicateModule(_) => None,
        })
    }
}

/// Turns a descriptor collection into a [`Graph`].
pub struct GraphBuilder;

impl GraphBuilder {
    /// Build the graph, collecting rather than failing on missing required
    /// dependencies. Optional dependencies that are absent are skipped.
    pub fn build(descriptors: &[ModuleDescriptor]) -> BuildOutcome<'_> {
        let mut graph = Graph::new();
        let mut errors = Vec::new();
        let mut accepted = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if graph.contains(descriptor.key().as_str()) {
                tracing::warn!("ignoring duplicate module {}", descriptor.key());
                errors.push(BuildError::DuplicateModule(descriptor.key().clone()));
                continue;
            }
            accepted.push(graph.add_node(descriptor));
        }

        for from in accepted {
            let descriptor = graph.graph[from].descriptor;
            for dep in descriptor.required().keys() {
                match graph.find(dep.as_str()) {
                    Some(to) => graph.add_edge(from, to, DependencyKind::Required),
                    None => errors.push(BuildError::MissingDependency(MissingEdge {
                        module: descriptor.key().clone(),
                        dependency: dep.clone(),
                    })),
                }
            }
            for dep in descriptor.optional().keys() {
                if let Some(to) = graph.find(dep.as_str()) {
                    graph.add_edge(from, to, DependencyKind::Optional);
                } else {
                    tracing::trace!("{} skips absent optional dependency {dep}", descriptor.key());
                }
            }
        }

        tracing::debug!(
            modules = graph.len(),
            edges = graph.graph.edge_count(),
            errors = errors.len(),
            "built module graph"
        );
        BuildOutcome { graph, errors }
    }
}

/// A module dependency graph backed by petgraph.
///
/// Node indices follow discovery order. Edges point from a module to the
/// modules it depends on.
pub struct Graph<'a> {
    graph: DiGraph<ModuleNode<'a>, DepEdge>,
    index: HashMap<&'a str, NodeIndex>,
}

impl<'a> Graph<'a> {
    fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    fn add_node(&mut self, descriptor: &'a ModuleDescriptor) -> NodeIndex {
        let idx = self.graph.add_node(ModuleNode {
            descriptor,
            state: VisitState::Unvisited,
        });
        self.index.insert(descriptor.key().as_str(), idx);
        idx
    }

    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, kind: DependencyKind) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, DepEdge { kind });
        }
    }

    pub(crate) fn find(&self, key: &str) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &ModuleNode<'a> {
        &self.graph[idx]
    }

    pub(crate) fn set_state(&mut self, idx: NodeIndex, state: VisitState) {
        self.graph[idx].state = state;
    }

    pub(crate) fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Present dependencies of `idx`: required first, then optional, each
    /// group in discovery order.
    pub(crate) fn dependency_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let descriptor = self.graph[idx].descriptor;
        let present = |map: &DependencyMap| {
            let mut found: Vec<NodeIndex> =
                map.keys().filter_map(|key| self.find(key.as_str())).collect();
            found.sort();
            found
        };
        let mut deps = present(descriptor.required());
        for dep in present(descriptor.optional()) {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
        deps
    }

    fn dependent_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut sources: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.source())
            .collect();
        sources.sort();
        sources
    }

    fn is_optional_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.graph
            .find_edge(from, to)
            .is_some_and(|e| self.graph[e].kind == DependencyKind::Optional)
    }

    fn key_at(&self, idx: NodeIndex) -> &'a ModuleKey {
        self.graph[idx].descriptor.key()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&ModuleNode<'a>> {
        self.find(key).map(|idx| &self.graph[idx])
    }

    pub fn descriptor(&self, key: &str) -> Option<&'a ModuleDescriptor> {
        self.find(key).map(|idx| self.graph[idx].descriptor)
    }

    /// All descriptors in discovery order.
    pub fn descriptors(&self) -> impl Iterator<Item = &'a ModuleDescriptor> + '_ {
        self.graph.node_indices().map(|idx| self.graph[idx].descriptor)
    }

    /// All module keys in discovery order.
    pub fn keys(&self) -> impl Iterator<Item = &'a ModuleKey> + '_ {
        self.descriptors().map(|d| d.key())
    }

    /// Direct dependencies present in the graph (required, then optional).
    pub fn dependencies_of(&self, key: &str) -> Vec<&'a ModuleKey> {
        self.find(key)
            .map(|idx| {
                self.dependency_indices(idx)
                    .into_iter()
                    .map(|d| self.key_at(d))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Reverse dependencies (who depends on `key`), in discovery order.
    pub fn dependents_of(&self, key: &str) -> Vec<&'a ModuleKey> {
        self.find(key)
            .map(|idx| {
                self.dependent_indices(idx)
                    .into_iter()
                    .map(|d| self.key_at(d))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every group of modules that depend on each other in a loop.
    ///
    /// Members of each group and the groups themselves are listed in
    /// discovery order. Self-dependencies count as a one-module cycle.
    pub fn cycles(&self) -> Vec<Vec<&'a ModuleKey>> {
        let mut cycles: Vec<Vec<NodeIndex>> = kosaraju_scc(&self.graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || self.graph.find_edge(scc[0], scc[0]).is_some()
            })
            .map(|mut scc| {
                scc.sort();
                scc
            })
            .collect();
        cycles.sort_by_key(|scc| scc[0]);
        cycles
            .into_iter()
            .map(|scc| scc.into_iter().map(|idx| self.key_at(idx)).collect())
            .collect()
    }

    /// Modules nothing else depends on, in discovery order.
    pub fn roots(&self) -> Vec<&'a ModuleKey> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| self.key_at(idx))
            .collect()
    }

    /// Render the graph as a tree starting from every root module.
    ///
    /// A module whose dependencies were already shown is printed once more
    /// with `(*)` and not expanded again. Modules only reachable through a
    /// cycle are rendered as extra top-level entries so nothing is omitted.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = String::new();
        let mut tops: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&idx| self.dependent_indices(idx).is_empty())
            .collect();

        // Nodes unreachable from any root sit on a cycle.
        let mut reachable = HashSet::new();
        for &top in &tops {
            self.mark_reachable(top, &mut reachable);
        }
        for idx in self.graph.node_indices() {
            if !reachable.contains(&idx) {
                tops.push(idx);
                self.mark_reachable(idx, &mut reachable);
            }
        }

        let mut expanded = HashSet::new();
        for top in tops {
            output.push_str(&format!("{}\n", self.graph[top]));
            expanded.insert(top);
            self.render_branches(&mut output, top, Direction::Outgoing, max_depth, &mut expanded);
        }

        output
    }

    fn mark_reachable(&self, start: NodeIndex, reachable: &mut HashSet<NodeIndex>) {
        let mut pending = vec![start];
        while let Some(idx) = pending.pop() {
            if reachable.insert(idx) {
                pending.extend(self.dependency_indices(idx));
            }
        }
    }

    /// Render everything below `top`, following dependencies
    /// (`Outgoing`) or dependents (`Incoming`).
    ///
    /// A module already on the current branch is marked `(cycle)`; one
    /// already expanded elsewhere is marked `(*)`.
    fn render_branches(
        &self,
        output: &mut String,
        top: NodeIndex,
        direction: Direction,
        max_depth: Option<usize>,
        expanded: &mut HashSet<NodeIndex>,
    ) {
        let children_of = |idx: NodeIndex| match direction {
            Direction::Outgoing => self.dependency_indices(idx),
            Direction::Incoming => self.dependent_indices(idx),
        };

        let mut on_branch = HashSet::from([top]);
        let mut stack = vec![Branch {
            idx: top,
            children: children_of(top),
            next: 0,
            prefix: String::new(),
        }];

        while let Some(branch) = stack.last_mut() {
            let Some(child) = branch.children.get(branch.next).copied() else {
                on_branch.remove(&branch.idx);
                stack.pop();
                continue;
            };
            branch.next += 1;
            let is_last = branch.next == branch.children.len();
            let parent = branch.idx;
            let line_prefix = branch.prefix.clone();
            let child_prefix = format!(
                "{}{}",
                branch.prefix,
                if is_last { "    " } else { "│   " }
            );
            let depth = stack.len();

            let connector = if is_last { "└── " } else { "├── " };
            let optional = match direction {
                Direction::Outgoing => self.is_optional_edge(parent, child),
                Direction::Incoming => self.is_optional_edge(child, parent),
            };
            let marker = if optional { " (optional)" } else { "" };
            let line = format!("{line_prefix}{connector}{}{marker}", self.graph[child]);

            if on_branch.contains(&child) {
                output.push_str(&format!("{line} (cycle)\n"));
                continue;
            }
            let children = children_of(child);
            if children.is_empty() || max_depth.is_some_and(|max| depth >= max) {
                output.push_str(&format!("{line}\n"));
                continue;
            }
            if !expanded.insert(child) {
                output.push_str(&format!("{line} (*)\n"));
                continue;
            }

            output.push_str(&format!("{line}\n"));
            on_branch.insert(child);
            stack.push(Branch {
                idx: child,
                children,
                next: 0,
                prefix: child_prefix,
            });
        }
    }

    /// Render every module that (transitively) depends on `key`.
    pub fn print_inverted_tree(&self, key: &str) -> String {
        let mut output = String::new();
        let Some(idx) = self.find(key) else {
            return output;
        };

        output.push_str(&format!("{}\n", self.graph[idx]));
        let mut expanded = HashSet::from([idx]);
        self.render_branches(&mut output, idx, Direction::Incoming, None, &mut expanded);
        output
    }

    /// Find a dependency path from `from` to `to`, both inclusive.
    ///
    /// Dependencies are tried in the same order the resolver visits them, so
    /// the first path found is the one resolution follows.
    pub fn find_path(&self, from: &str, to: &str) -> Option<Vec<&'a ModuleKey>> {
        let start = self.find(from)?;
        let target = self.find(to)?;
        if start == target {
            return Some(vec![self.key_at(start)]);
        }

        let mut visited = HashSet::from([start]);
        let mut stack = vec![(start, self.dependency_indices(start), 0usize)];
        while let Some((_, deps, next)) = stack.last_mut() {
            let Some(dep) = deps.get(*next).copied() else {
                stack.pop();
                continue;
            };
            *next += 1;

            if dep == target {
                let mut path: Vec<&'a ModuleKey> =
                    stack.iter().map(|(idx, _, _)| self.key_at(*idx)).collect();
                path.push(self.key_at(target));
                return Some(path);
            }
            if visited.insert(dep) {
                stack.push((dep, self.dependency_indices(dep), 0));
            }
        }
        None
    }

    /// Number of modules in the graph.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One open level of a tree rendering.
struct Branch {
    idx: NodeIndex,
    children: Vec<NodeIndex>,
    next: usize,
    prefix: String,
}
