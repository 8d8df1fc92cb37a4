//! Operation: print the module load order.

use std::path::{Path, PathBuf};

use modres_core::config::OutputFormat;
use modres_core::descriptor::ModuleDescriptor;
use modres_resolver::{DependencyResolver, LoadOrder};
use serde::Serialize;

use crate::ops_setup;

/// Options for `modres resolve`.
#[derive(Debug, Default)]
pub struct ResolveOptions {
    pub manifest: Option<PathBuf>,
    /// Overrides `[output] format` from the global config.
    pub format: Option<OutputFormat>,
}

#[derive(Serialize)]
struct ResolveReport<'a> {
    order: &'a LoadOrder,
    modules: Vec<ResolvedModule<'a>>,
}

#[derive(Serialize)]
struct ResolvedModule<'a> {
    key: &'a str,
    version: &'a str,
}

/// Resolve the manifest's modules and print them in load order.
pub fn resolve(cwd: &Path, opts: &ResolveOptions) -> miette::Result<()> {
    let loaded = ops_setup::load(cwd, opts.manifest.as_deref())?;
    let descriptors = loaded.descriptors()?;

    modres_util::progress::status(
        "Resolving",
        &format!(
            "{} modules from {}",
            descriptors.len(),
            loaded.path.display()
        ),
    );
    let order = DependencyResolver::new().resolve(&descriptors)?;

    let format = opts.format.unwrap_or(loaded.config.output.format);
    print!("{}", render(&order, &descriptors, format)?);
    modres_util::progress::status("Finished", &format!("{} modules ordered", order.len()));
    Ok(())
}

/// Format a load order as text (one `key version` line per module) or JSON.
pub fn render(
    order: &LoadOrder,
    descriptors: &[ModuleDescriptor],
    format: OutputFormat,
) -> miette::Result<String> {
    let modules: Vec<ResolvedModule<'_>> = order
        .iter()
        .filter_map(|key| descriptors.iter().find(|d| d.key() == key))
        .map(|d| ResolvedModule {
            key: d.key().as_str(),
            version: d.version(),
        })
        .collect();

    match format {
        OutputFormat::Json => crate::to_json(&ResolveReport { order, modules }),
        OutputFormat::Text => {
            let mut out = String::new();
            for module in &modules {
                out.push_str(&format!("{} {}\n", module.key, module.version));
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modules() -> Vec<ModuleDescriptor> {
        vec![
            ModuleDescriptor::builder("Auth", "1.2.0")
                .requires("Core", "^1.0")
                .build()
                .unwrap(),
            ModuleDescriptor::builder("Core", "1.0.0").build().unwrap(),
        ]
    }

    #[test]
    fn text_lists_modules_in_load_order() {
        let descriptors = modules();
        let order = modres_resolver::resolve(&descriptors).unwrap();
        let out = render(&order, &descriptors, OutputFormat::Text).unwrap();
        assert_eq!(out, "Core 1.0.0\nAuth 1.2.0\n");
    }

    #[test]
    fn json_carries_order_and_versions() {
        let descriptors = modules();
        let order = modres_resolver::resolve(&descriptors).unwrap();
        let out = render(&order, &descriptors, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["order"], serde_json::json!(["Core", "Auth"]));
        assert_eq!(value["modules"][1]["version"], "1.2.0");
    }
}
