//! Core library for `mv-file`.
//!
//! Moves files, directories and glob matches according to a mapping from
//! source specifiers to target paths: each source is copied to its composed
//! destination, the original is removed, and now-empty ancestor directories
//! are optionally collapsed. Keep the library small and ergonomic: a
//! [`MoveOptions`] type with sensible defaults, a [`Mover`] that reports
//! progress through registered callbacks, and a one-shot [`move_file`]
//! helper.
//!
//! ```no_run
//! use mv_file::{MoveOptions, move_file};
//!
//! # async fn demo() -> Result<(), mv_file::MoveError> {
//! let mapping = vec![("source/file.txt".into(), "target/file.txt".into())];
//! move_file(&mapping, MoveOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod events;
pub mod fs_ops;
pub mod mover;
pub mod output;

pub use config::{CleanupFailure, DEFAULT_CONCURRENCY, LogLevel, MoveOptions};
pub use errors::{ErrorKind, MoveError};
pub use events::MoveEvent;
pub use mover::{Mover, PathMapping, move_file};
