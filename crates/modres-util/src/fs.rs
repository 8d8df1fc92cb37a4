use std::path::{Path, PathBuf};

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            tracing::trace!("found {} in {}", filename, current.display());
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Resolve the manifest to use: an explicit path wins, otherwise search
/// upwards from `cwd` for `filename`.
pub fn locate_manifest(explicit: Option<&Path>, cwd: &Path, filename: &str) -> Option<PathBuf> {
    match explicit {
        Some(path) if path.is_absolute() => Some(path.to_path_buf()),
        Some(path) => Some(cwd.join(path)),
        None => find_ancestor_with(cwd, filename).map(|dir| dir.join(filename)),
    }
}
