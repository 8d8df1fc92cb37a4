//! Operation: display the module dependency tree.

use std::path::{Path, PathBuf};

use modres_resolver::{Graph, GraphBuilder};
use modres_util::errors::ModresError;

use crate::ops_setup;

/// Options for `modres tree`.
#[derive(Debug, Default)]
pub struct TreeOptions {
    pub manifest: Option<PathBuf>,
    /// Maximum tree depth to display.
    pub depth: Option<usize>,
    /// Show dependents instead of dependencies, starting from leaf modules.
    pub inverted: bool,
    /// Show how each root module reaches this module.
    pub why: Option<String>,
}

/// Display the dependency tree for the manifest's modules.
///
/// Missing dependencies are reported as warnings; the rest of the graph is
/// still rendered.
pub fn tree(cwd: &Path, opts: &TreeOptions) -> miette::Result<()> {
    let loaded = ops_setup::load(cwd, opts.manifest.as_deref())?;
    let descriptors = loaded.descriptors()?;
    let outcome = GraphBuilder::build(&descriptors);
    for error in &outcome.errors {
        modres_util::progress::status_warn("Warning", &error.to_string());
    }

    print!("{}", render(&outcome.graph, opts)?);
    Ok(())
}

/// Render the view selected by `opts`: `--why` first, then `--inverted`,
/// else the regular tree.
pub fn render(graph: &Graph<'_>, opts: &TreeOptions) -> miette::Result<String> {
    if graph.is_empty() {
        return Ok("No modules.\n".to_string());
    }

    if let Some(ref target) = opts.why {
        return why(graph, target);
    }

    if opts.inverted {
        let mut output = String::new();
        for key in graph.keys() {
            if graph.dependencies_of(key.as_str()).is_empty() {
                output.push_str(&graph.print_inverted_tree(key.as_str()));
            }
        }
        if output.is_empty() {
            output.push_str("Every module has dependencies; nothing to invert from.\n");
        }
        return Ok(output);
    }

    Ok(graph.print_tree(opts.depth))
}

fn why(graph: &Graph<'_>, target: &str) -> miette::Result<String> {
    if !graph.contains(target) {
        return Err(ModresError::Generic {
            message: format!("Module '{target}' not found in the graph"),
        }
        .into());
    }

    let mut output = String::new();
    for root in graph.roots() {
        if root.as_str() == target {
            continue;
        }
        if let Some(path) = graph.find_path(root.as_str(), target) {
            let path: Vec<&str> = path.iter().map(|k| k.as_str()).collect();
            output.push_str(&format!("{}\n", path.join(" -> ")));
        }
    }

    if output.is_empty() {
        output = format!("{target} is not required by any other module.\n");
    } else {
        output.insert_str(0, &format!("Paths to {target}:\n"));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modres_core::descriptor::ModuleDescriptor;

    fn modules() -> Vec<ModuleDescriptor> {
        vec![
            ModuleDescriptor::builder("Core", "1.0.0").build().unwrap(),
            ModuleDescriptor::builder("Auth", "1.0.0")
                .requires("Core", "^1.0")
                .build()
                .unwrap(),
            ModuleDescriptor::builder("Admin", "1.0.0")
                .requires("Auth", "^1.0")
                .build()
                .unwrap(),
            ModuleDescriptor::builder("Pages", "1.0.0")
                .requires("Core", "^1.0")
                .build()
                .unwrap(),
        ]
    }

    #[test]
    fn regular_tree_starts_at_roots() {
        let descriptors = modules();
        let graph = GraphBuilder::build(&descriptors).graph;
        let out = render(&graph, &TreeOptions::default()).unwrap();
        assert!(out.starts_with("Admin@1.0.0\n"));
        assert!(out.contains("└── Auth@1.0.0\n"));
        assert!(out.contains("Pages@1.0.0\n└── Core@1.0.0\n"));
    }

    #[test]
    fn depth_limits_output() {
        let descriptors = modules();
        let graph = GraphBuilder::build(&descriptors).graph;
        let opts = TreeOptions {
            depth: Some(1),
            ..TreeOptions::default()
        };
        let out = render(&graph, &opts).unwrap();
        assert!(out.contains("Auth@1.0.0"));
        assert!(!out.contains("    └── Core@1.0.0"));
    }

    #[test]
    fn why_lists_paths_from_roots() {
        let descriptors = modules();
        let graph = GraphBuilder::build(&descriptors).graph;
        let opts = TreeOptions {
            why: Some("Core".to_string()),
            ..TreeOptions::default()
        };
        let out = render(&graph, &opts).unwrap();
        assert_eq!(out, "Paths to Core:\nAdmin -> Auth -> Core\nPages -> Core\n");
    }

    #[test]
    fn why_unknown_module_fails() {
        let descriptors = modules();
        let graph = GraphBuilder::build(&descriptors).graph;
        let opts = TreeOptions {
            why: Some("Billing".to_string()),
            ..TreeOptions::default()
        };
        assert!(render(&graph, &opts).is_err());
    }

    #[test]
    fn inverted_starts_from_leaves() {
        let descriptors = modules();
        let graph = GraphBuilder::build(&descriptors).graph;
        let opts = TreeOptions {
            inverted: true,
            ..TreeOptions::default()
        };
        let out = render(&graph, &opts).unwrap();
        assert!(out.starts_with("Core@1.0.0\n"));
        assert!(out.contains("Admin@1.0.0"));
    }

    #[test]
    fn empty_graph() {
        let graph = GraphBuilder::build(&[]).graph;
        assert_eq!(render(&graph, &TreeOptions::default()).unwrap(), "No modules.\n");
    }
}
