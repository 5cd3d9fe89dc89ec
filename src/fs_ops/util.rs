//! Small path helpers shared by the resolver and composer.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` segments and fold `..` into the
/// preceding component. Purely textual, never touches the filesystem, so
/// prefix checks like `starts_with` behave predictably afterwards.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping at the root is a no-op, matching resolve() semantics.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve `path` against `root`: absolute paths win, relative ones are
/// joined onto the root, and the result is normalized.
pub fn absolutize(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&root.join(path))
    }
}

/// The portion of `path` below `base`, or `None` when no base is configured,
/// the path is not under it, or the path *is* the base.
pub fn sub_path_under(base: Option<&Path>, path: &Path) -> Option<PathBuf> {
    let rel = path.strip_prefix(base?).ok()?;
    if rel.as_os_str().is_empty() {
        None
    } else {
        Some(rel.to_path_buf())
    }
}
