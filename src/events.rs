//! Move progress notifications.
//!
//! The mover reports progress through explicit callback registration
//! ([`crate::Mover::on_event`]) rather than an emitter base type. Callbacks
//! run inline on the task that produced the event, so they should stay cheap.

use std::path::PathBuf;

use crate::errors::{ErrorKind, MoveError};

/// A single progress notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveEvent {
    /// A copy is about to be issued for `source` -> `target`.
    CopyStart { source: PathBuf, target: PathBuf },
    /// The copy of `source` -> `target` completed.
    CopyDone { source: PathBuf, target: PathBuf },
    /// Removal (and optional empty-dir collapse) of `path` is starting.
    CleanStart { path: PathBuf },
    /// Removal of `path` completed.
    CleanDone { path: PathBuf },
    /// The overall move failed with the given error.
    Error {
        kind: ErrorKind,
        message: String,
        source: Option<PathBuf>,
        target: Option<PathBuf>,
    },
}

impl MoveEvent {
    /// Wire-style name of the event.
    pub const fn name(&self) -> &'static str {
        match self {
            MoveEvent::CopyStart { .. } => "copy:start",
            MoveEvent::CopyDone { .. } => "copy:done",
            MoveEvent::CleanStart { .. } => "clean:start",
            MoveEvent::CleanDone { .. } => "clean:done",
            MoveEvent::Error { .. } => "error",
        }
    }

    /// Build the error notification for a failed move.
    pub fn from_error(err: &MoveError) -> Self {
        MoveEvent::Error {
            kind: err.kind(),
            message: err.to_string(),
            source: err.source_path().map(PathBuf::from),
            target: err.target_path().map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_use_done_variant() {
        let done = MoveEvent::CopyDone {
            source: PathBuf::from("a"),
            target: PathBuf::from("b"),
        };
        assert_eq!(done.name(), "copy:done");
        let clean = MoveEvent::CleanDone {
            path: PathBuf::from("a"),
        };
        assert_eq!(clean.name(), "clean:done");
    }

    #[test]
    fn error_event_keeps_kind_and_paths() {
        let err = MoveError::Copy {
            source: PathBuf::from("/s"),
            target: PathBuf::from("/t"),
            cause: std::io::Error::other("nope"),
        };
        let event = MoveEvent::from_error(&err);
        match event {
            MoveEvent::Error {
                kind,
                source,
                target,
                ..
            } => {
                assert_eq!(kind, ErrorKind::Copy);
                assert_eq!(source, Some(PathBuf::from("/s")));
                assert_eq!(target, Some(PathBuf::from("/t")));
            }
            other => panic!("expected error event, got {other:?}"),
        }
    }
}
