//! Target path composition.
//!
//! One rule set covers three usages, disambiguated purely by the shape of
//! the resolved entry and the target's extension:
//! - move-and-keep-name (`src/file.txt` -> `target/`)
//! - move-and-rename (`src/file.txt` -> `target/renamed.txt`)
//! - move-into-directory preserving structure (directory or glob entries
//!   with a sub-path under the base)

use std::path::{Path, PathBuf};

use super::resolve::ResolvedEntry;

/// Compute the final destination for a resolved entry against the already
/// absolute `target` path. Pure; no filesystem access.
pub fn compose_target(entry: &ResolvedEntry, target: &Path) -> PathBuf {
    if entry.is_dir {
        return match &entry.sub_path {
            Some(sub) => target.join(sub),
            None => target.to_path_buf(),
        };
    }

    // Plain file: a target without an extension is a directory to move
    // into, unless the source has none either (then it is a rename).
    let source_ext = entry.path.extension();
    if target.extension().is_none() && source_ext.is_some() {
        return match (&entry.sub_path, entry.path.file_name()) {
            (Some(sub), _) => target.join(sub),
            (None, Some(name)) => target.join(name),
            (None, None) => target.to_path_buf(),
        };
    }

    target.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_entry(path: &str, sub_path: Option<&str>) -> ResolvedEntry {
        ResolvedEntry {
            path: PathBuf::from(path),
            is_dir: false,
            sub_path: sub_path.map(PathBuf::from),
        }
    }

    fn dir_entry(path: &str, sub_path: Option<&str>) -> ResolvedEntry {
        ResolvedEntry {
            path: PathBuf::from(path),
            is_dir: true,
            sub_path: sub_path.map(PathBuf::from),
        }
    }

    #[test]
    fn file_into_extensionless_target_keeps_name() {
        let entry = file_entry("/root/source/file.txt", None);
        assert_eq!(
            compose_target(&entry, Path::new("/root/dest/target")),
            PathBuf::from("/root/dest/target/file.txt")
        );
    }

    #[test]
    fn file_onto_extension_target_is_a_rename() {
        let entry = file_entry("/root/source/file.txt", None);
        assert_eq!(
            compose_target(&entry, Path::new("/root/dest/renamed.md")),
            PathBuf::from("/root/dest/renamed.md")
        );
    }

    #[test]
    fn extensionless_file_onto_extensionless_target_is_a_rename() {
        // Both sides lack an extension: nothing marks the target as a
        // directory, so it is used verbatim.
        let entry = file_entry("/root/source/LICENSE", None);
        assert_eq!(
            compose_target(&entry, Path::new("/root/dest/NOTICE")),
            PathBuf::from("/root/dest/NOTICE")
        );
    }

    #[test]
    fn file_sub_path_lands_under_target() {
        let entry = file_entry("/root/source/a/b/file.txt", Some("a/b/file.txt"));
        assert_eq!(
            compose_target(&entry, Path::new("/root/dest/target")),
            PathBuf::from("/root/dest/target/a/b/file.txt")
        );
    }

    #[test]
    fn directory_without_sub_path_uses_target_verbatim() {
        let entry = dir_entry("/root/source/pkg", None);
        assert_eq!(
            compose_target(&entry, Path::new("/root/dest/out")),
            PathBuf::from("/root/dest/out")
        );
    }

    #[test]
    fn directory_with_sub_path_is_joined() {
        let entry = dir_entry("/root/source/pkg", Some("pkg"));
        assert_eq!(
            compose_target(&entry, Path::new("/root/dest/out")),
            PathBuf::from("/root/dest/out/pkg")
        );
    }

    #[test]
    fn glob_match_without_sub_path_uses_target_verbatim() {
        // Glob matches are directory-style entries even though they are files.
        let entry = dir_entry("/root/source/file1.txt", None);
        assert_eq!(
            compose_target(&entry, Path::new("/root/dest/target")),
            PathBuf::from("/root/dest/target")
        );
    }
}
