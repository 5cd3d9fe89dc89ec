//! Source removal and bounded empty-directory collapse.

use std::io;
use std::path::Path;

use tokio::fs;

/// Remove the original entry: files directly, directories recursively.
/// A source that already disappeared is treated as removed.
pub async fn remove_entry(path: &Path) -> io::Result<()> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path).await,
        Ok(_) => fs::remove_file(path).await,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

/// Walk upward from `start`, deleting each directory that turned out empty,
/// and stop at the first non-empty one. The walk never inspects anything
/// outside `boundary` and never deletes the boundary itself.
///
/// Explicit loop instead of recursion: ancestor chains are caller-supplied
/// and can be arbitrarily deep.
pub async fn collapse_empty_dirs(start: &Path, boundary: &Path) -> io::Result<()> {
    let mut dir = start.to_path_buf();
    loop {
        if dir == boundary || !dir.starts_with(boundary) {
            return Ok(());
        }
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            // a concurrent task already collapsed this ancestor
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err),
        };
        if entries.next_entry().await?.is_some() {
            return Ok(());
        }
        match fs::remove_dir(&dir).await {
            Ok(()) => {}
            // lost a race: collapsed by a sibling, or an entry appeared
            // between the emptiness check and the removal
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::DirectoryNotEmpty
                ) =>
            {
                return Ok(());
            }
            Err(err) => return Err(err),
        }
        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[tokio::test]
    async fn remove_entry_handles_files_dirs_and_missing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("f.txt");
        file.write_str("x").unwrap();
        let dir = temp.child("d/sub");
        dir.create_dir_all().unwrap();
        temp.child("d/sub/inner.txt").write_str("y").unwrap();

        remove_entry(file.path()).await.unwrap();
        assert!(!file.path().exists());

        remove_entry(&temp.path().join("d")).await.unwrap();
        assert!(!temp.path().join("d").exists());

        // already gone: not an error
        remove_entry(&temp.path().join("ghost")).await.unwrap();
    }

    #[tokio::test]
    async fn collapse_stops_at_first_non_empty_dir() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a/b/c").create_dir_all().unwrap();
        temp.child("a/keep.txt").write_str("x").unwrap();

        collapse_empty_dirs(&temp.path().join("a/b/c"), temp.path())
            .await
            .unwrap();

        assert!(!temp.path().join("a/b").exists());
        assert!(temp.path().join("a").is_dir());
    }

    #[tokio::test]
    async fn collapse_never_deletes_the_boundary() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("only/child").create_dir_all().unwrap();

        collapse_empty_dirs(&temp.path().join("only/child"), temp.path())
            .await
            .unwrap();

        assert!(!temp.path().join("only").exists());
        assert!(temp.path().is_dir());
    }

    #[tokio::test]
    async fn collapse_ignores_paths_outside_the_boundary() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("outside/empty").create_dir_all().unwrap();
        let boundary = temp.child("inside");
        boundary.create_dir_all().unwrap();

        collapse_empty_dirs(&temp.path().join("outside/empty"), boundary.path())
            .await
            .unwrap();

        assert!(temp.path().join("outside/empty").is_dir());
    }
}
