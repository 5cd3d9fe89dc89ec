//! Typed error definitions for the mover.
//! One variant per failure phase so callers and logs can tell copy, cleanup
//! and resolution problems apart.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Underlying cause of a processing failure. Resolution can fail in the stat
/// phase (I/O) or the glob phase (bad pattern), so the cause is boxed.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

/// Coarse classification of a [`MoveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The copy primitive failed.
    Copy,
    /// Removing the source or collapsing empty directories failed.
    Clean,
    /// Resolution failed for a reason other than "not found".
    Process,
}

impl ErrorKind {
    /// Stable machine-readable code, used in structured logs.
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::Copy => "COPY_ERROR",
            ErrorKind::Clean => "CLEAN_ERROR",
            ErrorKind::Process => "PROCESS_ERROR",
        }
    }
}

#[derive(Debug, Error)]
pub enum MoveError {
    #[error("failed to copy '{}' -> '{}'", source.display(), target.display())]
    Copy {
        source: PathBuf,
        target: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("failed to clean '{}'", path.display())]
    Clean {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("failed to process '{}' -> '{}'", source.display(), target.display())]
    Process {
        source: PathBuf,
        target: PathBuf,
        #[source]
        cause: BoxedCause,
    },
}

impl MoveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MoveError::Copy { .. } => ErrorKind::Copy,
            MoveError::Clean { .. } => ErrorKind::Clean,
            MoveError::Process { .. } => ErrorKind::Process,
        }
    }

    /// Shorthand for `self.kind().code()`.
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// The implicated source path, when the phase has one.
    pub fn source_path(&self) -> Option<&Path> {
        match self {
            MoveError::Copy { source, .. } | MoveError::Process { source, .. } => Some(source),
            MoveError::Clean { path, .. } => Some(path),
        }
    }

    /// The implicated target path. Cleanup acts on the source side only.
    pub fn target_path(&self) -> Option<&Path> {
        match self {
            MoveError::Copy { target, .. } | MoveError::Process { target, .. } => Some(target),
            MoveError::Clean { .. } => None,
        }
    }
}
