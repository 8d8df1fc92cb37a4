//! Handler for `modres list`.

use std::path::{Path, PathBuf};

use miette::Result;
use modres_core::config::OutputFormat;
use modres_ops::ops_list::{self, ListOptions};

pub fn exec(
    cwd: &Path,
    manifest: Option<PathBuf>,
    tag: Option<String>,
    interface: Option<String>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let opts = ListOptions {
        manifest,
        tag,
        interface,
        format,
    };
    ops_list::list(cwd, &opts)
}
