//! Handler for `modres resolve`.

use std::path::{Path, PathBuf};

use miette::Result;
use modres_core::config::OutputFormat;
use modres_ops::ops_resolve::{self, ResolveOptions};

pub fn exec(cwd: &Path, manifest: Option<PathBuf>, format: Option<OutputFormat>) -> Result<()> {
    ops_resolve::resolve(cwd, &ResolveOptions { manifest, format })
}
