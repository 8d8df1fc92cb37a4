//! Check command implementation.

use std::path::{Path, PathBuf};

use miette::Result;
use modres_ops::ops_check::{self, CheckOptions};

pub fn exec(cwd: &Path, manifest: Option<PathBuf>) -> Result<()> {
    ops_check::check(cwd, &CheckOptions { manifest })
}
