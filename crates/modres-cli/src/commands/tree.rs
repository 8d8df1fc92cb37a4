//! Handler for `modres tree`.

use std::path::{Path, PathBuf};

use miette::Result;
use modres_ops::ops_tree::{self, TreeOptions};

pub fn exec(
    cwd: &Path,
    manifest: Option<PathBuf>,
    depth: Option<usize>,
    inverted: bool,
    why: Option<String>,
) -> Result<()> {
    let opts = TreeOptions {
        manifest,
        depth,
        inverted,
        why,
    };
    ops_tree::tree(cwd, &opts)
}
