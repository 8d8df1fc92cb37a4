//! Operation: list modules, optionally filtered by tag or interface.

use std::path::{Path, PathBuf};

use modres_core::config::OutputFormat;
use modres_core::descriptor::ModuleDescriptor;
use modres_core::registry::ModuleRegistry;
use serde::Serialize;

use crate::ops_setup;

/// Options for `modres list`.
#[derive(Debug, Default)]
pub struct ListOptions {
    pub manifest: Option<PathBuf>,
    pub tag: Option<String>,
    pub interface: Option<String>,
    pub format: Option<OutputFormat>,
}

#[derive(Serialize)]
struct ListedModule<'a> {
    key: &'a str,
    version: &'a str,
    interfaces: &'a [String],
    tags: &'a [String],
}

/// Print the manifest's modules that match every given filter.
pub fn list(cwd: &Path, opts: &ListOptions) -> miette::Result<()> {
    let loaded = ops_setup::load(cwd, opts.manifest.as_deref())?;
    let registry = loaded.registry()?;

    let selected = select(&registry, opts.tag.as_deref(), opts.interface.as_deref());
    let format = opts.format.unwrap_or(loaded.config.output.format);
    print!("{}", render(&selected, format)?);

    if selected.is_empty() && format == OutputFormat::Text {
        let tags: Vec<&str> = registry.tags().collect();
        let interfaces: Vec<&str> = registry.interfaces().collect();
        if !tags.is_empty() {
            modres_util::progress::status_info("Tags", &tags.join(", "));
        }
        if !interfaces.is_empty() {
            modres_util::progress::status_info("Interfaces", &interfaces.join(", "));
        }
    }
    Ok(())
}

/// Modules in registration order, narrowed by tag and interface.
pub fn select<'r>(
    registry: &'r ModuleRegistry,
    tag: Option<&str>,
    interface: Option<&str>,
) -> Vec<&'r ModuleDescriptor> {
    let mut selected: Vec<&ModuleDescriptor> = match tag {
        Some(tag) => registry.by_tag(tag),
        None => registry.descriptors().iter().collect(),
    };
    if let Some(interface) = interface {
        selected.retain(|d| d.implements(interface));
    }
    selected
}

pub fn render(modules: &[&ModuleDescriptor], format: OutputFormat) -> miette::Result<String> {
    match format {
        OutputFormat::Json => {
            let listed: Vec<ListedModule<'_>> = modules
                .iter()
                .map(|d| ListedModule {
                    key: d.key().as_str(),
                    version: d.version(),
                    interfaces: d.interfaces(),
                    tags: d.tags(),
                })
                .collect();
            crate::to_json(&listed)
        }
        OutputFormat::Text => {
            if modules.is_empty() {
                return Ok("No matching modules.\n".to_string());
            }
            let mut out = String::new();
            for d in modules {
                out.push_str(&format!("{} {}", d.key(), d.version()));
                if !d.interfaces().is_empty() {
                    out.push_str(&format!(" implements {}", d.interfaces().join(", ")));
                }
                if !d.tags().is_empty() {
                    out.push_str(&format!(" [{}]", d.tags().join(", ")));
                }
                out.push('\n');
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ModuleRegistry {
        ModuleRegistry::from_descriptors([
            ModuleDescriptor::builder("Auth", "1.0.0")
                .interface("AuthProvider")
                .tag("security")
                .build()
                .unwrap(),
            ModuleDescriptor::builder("Pages", "2.0.0")
                .tag("content")
                .build()
                .unwrap(),
            ModuleDescriptor::builder("OAuth", "0.4.0")
                .interface("AuthProvider")
                .tag("security")
                .tag("content")
                .build()
                .unwrap(),
        ])
        .unwrap()
    }

    fn keys(selected: &[&ModuleDescriptor]) -> Vec<String> {
        selected.iter().map(|d| d.key().to_string()).collect()
    }

    #[test]
    fn no_filter_lists_everything() {
        let registry = registry();
        assert_eq!(keys(&select(&registry, None, None)), ["Auth", "Pages", "OAuth"]);
    }

    #[test]
    fn filters_combine() {
        let registry = registry();
        assert_eq!(keys(&select(&registry, Some("content"), None)), ["Pages", "OAuth"]);
        assert_eq!(
            keys(&select(&registry, Some("content"), Some("AuthProvider"))),
            ["OAuth"]
        );
        assert!(select(&registry, Some("billing"), None).is_empty());
    }

    #[test]
    fn text_rendering() {
        let registry = registry();
        let selected = select(&registry, None, Some("AuthProvider"));
        assert_eq!(
            render(&selected, OutputFormat::Text).unwrap(),
            "Auth 1.0.0 implements AuthProvider [security]\n\
             OAuth 0.4.0 implements AuthProvider [security, content]\n"
        );
        assert_eq!(
            render(&[], OutputFormat::Text).unwrap(),
            "No matching modules.\n"
        );
    }

    #[test]
    fn json_rendering() {
        let registry = registry();
        let selected = select(&registry, Some("content"), None);
        let out = render(&selected, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["key"], "Pages");
        assert_eq!(value[1]["tags"], serde_json::json!(["security", "content"]));
    }
}
