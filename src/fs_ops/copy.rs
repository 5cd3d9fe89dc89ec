//! Copy primitives: single files and recursive directory trees.
//!
//! Default-safe behavior is "error on exist"; `force` switches to
//! overwrite. Modification and access times of the originals are restored
//! on the copies.

use std::io;
use std::path::Path;

use filetime::FileTime;
use tokio::fs;
use walkdir::WalkDir;

/// Copy a resolved source to its composed target. Dispatches on the actual
/// filesystem type, not the entry's target-rule flag: glob matches carry the
/// directory flag but are plain files on disk.
pub async fn copy_entry(source: &Path, target: &Path, force: bool) -> io::Result<()> {
    let meta = fs::metadata(source).await?;
    if meta.is_dir() {
        copy_dir(source, target, force).await
    } else {
        copy_file(source, target, force).await
    }
}

async fn copy_file(source: &Path, target: &Path, force: bool) -> io::Result<()> {
    if !force && fs::metadata(target).await.is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("target '{}' already exists", target.display()),
        ));
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::copy(source, target).await?;
    restore_timestamps(source, target)
}

/// Copy a directory tree: recreate the directory skeleton, then copy each
/// file. The enumeration itself is cheap; the per-file copies are the
/// suspension points.
async fn copy_dir(source: &Path, target: &Path, force: bool) -> io::Result<()> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?
            .to_path_buf();
        if entry.file_type().is_dir() {
            dirs.push(rel);
        } else {
            files.push(rel);
        }
    }

    for rel in dirs {
        fs::create_dir_all(target.join(rel)).await?;
    }
    for rel in files {
        copy_file(&source.join(&rel), &target.join(&rel), force).await?;
    }
    Ok(())
}

// Timestamp calls are metadata-only; not worth a blocking-pool round trip.
fn restore_timestamps(source: &Path, target: &Path) -> io::Result<()> {
    let meta = std::fs::metadata(source)?;
    let mtime = FileTime::from_last_modification_time(&meta);
    let atime = FileTime::from_last_access_time(&meta);
    filetime::set_file_times(target, atime, mtime)
}
