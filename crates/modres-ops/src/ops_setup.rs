//! Manifest discovery shared by every operation.
//!
//! Loads the global config, finds `Modules.toml` (explicit path or upward
//! search from the working directory) and parses it.

use std::path::{Path, PathBuf};

use modres_core::config::GlobalConfig;
use modres_core::descriptor::ModuleDescriptor;
use modres_core::manifest::ModuleManifest;
use modres_core::registry::ModuleRegistry;
use modres_util::errors::ModresError;

/// A parsed manifest and the configuration it was found with.
#[derive(Debug)]
pub struct LoadedManifest {
    pub path: PathBuf,
    pub manifest: ModuleManifest,
    pub config: GlobalConfig,
}

impl LoadedManifest {
    /// Every module as a descriptor, in file order. Fails on the first
    /// malformed entry.
    pub fn descriptors(&self) -> miette::Result<Vec<ModuleDescriptor>> {
        self.manifest.to_descriptors()
    }

    pub fn registry(&self) -> miette::Result<ModuleRegistry> {
        self.manifest.to_registry()
    }
}

/// Locate and parse the manifest using the global configuration.
pub fn load(cwd: &Path, explicit: Option<&Path>) -> miette::Result<LoadedManifest> {
    let config = GlobalConfig::load()?;
    load_with_config(cwd, explicit, config)
}

/// Locate and parse the manifest with an already loaded configuration.
pub fn load_with_config(
    cwd: &Path,
    explicit: Option<&Path>,
    config: GlobalConfig,
) -> miette::Result<LoadedManifest> {
    let name = config.resolver.manifest.as_str();
    let path = modres_util::fs::locate_manifest(explicit, cwd, name).ok_or_else(|| {
        ModresError::Manifest {
            message: format!(
                "Could not find {name} in {} or any parent directory",
                cwd.display()
            ),
        }
    })?;
    tracing::debug!("using manifest {}", path.display());

    let manifest = ModuleManifest::from_path(&path)?;
    Ok(LoadedManifest {
        path,
        manifest,
        config,
    })
}
