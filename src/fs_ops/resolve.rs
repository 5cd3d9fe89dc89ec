//! Source resolution: direct stat with a glob fallback.
//!
//! The common case (a literal path that exists) costs one metadata call.
//! Only when that reports "not found" is the specifier reinterpreted as a
//! glob pattern and expanded against the working directory.

use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};

use tokio::task;

use crate::errors::BoxedCause;
use crate::fs_ops::util::normalize;

/// One concrete filesystem entry a mapping entry resolved to.
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    /// Absolute source path.
    pub path: PathBuf,
    /// Whether the entry follows the directory target rules. Glob matches
    /// always do, even though the matcher only yields files.
    pub is_dir: bool,
    /// Portion of `path` below the configured base directory, if any.
    pub sub_path: Option<PathBuf>,
}

/// Tagged result of a status check. "Not found" is a designed outcome here
/// (it triggers the glob fallback), not an error, so it gets its own arm
/// instead of an errno comparison at the call site.
#[derive(Debug)]
pub enum StatOutcome {
    Found(Metadata),
    NotFound,
    Failed(io::Error),
}

/// Stat `path`, classifying the result.
pub async fn stat_path(path: &Path) -> StatOutcome {
    match tokio::fs::metadata(path).await {
        Ok(meta) => StatOutcome::Found(meta),
        Err(err) if err.kind() == io::ErrorKind::NotFound => StatOutcome::NotFound,
        Err(err) => StatOutcome::Failed(err),
    }
}

/// Expand `pattern` against `cwd`, returning absolute paths of matching
/// files. Directory matches are skipped; unreadable entries are ignored.
/// An empty result is not an error.
///
/// The walk is synchronous directory traversal, so it runs on the blocking
/// pool rather than stalling the batch.
pub async fn expand_glob(cwd: &Path, pattern: &str) -> Result<Vec<PathBuf>, BoxedCause> {
    let full = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        cwd.join(pattern).to_string_lossy().into_owned()
    };

    let walked = task::spawn_blocking(move || -> Result<Vec<PathBuf>, glob::PatternError> {
        let mut found = Vec::new();
        for entry in glob::glob(&full)? {
            let Ok(path) = entry else { continue };
            if path.is_file() {
                found.push(normalize(&path));
            }
        }
        Ok(found)
    })
    .await;

    match walked {
        Ok(Ok(matches)) => Ok(matches),
        Ok(Err(pattern_err)) => Err(Box::new(pattern_err)),
        Err(join_err) => Err(Box::new(join_err)),
    }
}
