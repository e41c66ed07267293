//! Shell-like path expansion for user supplied asset and config paths.

use std::path::{Path, PathBuf};

/// Expands `~` and `$VAR` references in a path.
///
/// Unknown variables leave the input untouched rather than failing, so a
/// literal `$` in a directory name still works.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    let expanded = shellexpand::full(path).unwrap_or_else(|_| shellexpand::tilde(path));
    PathBuf::from(expanded.as_ref())
}

/// Expands a path and resolves it against `base_dir` when it is relative.
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);

    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }

    base_dir.join(expanded)
}
