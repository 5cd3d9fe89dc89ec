//! Filesystem operations: modularized.
//!
//! `resolve` turns a source specifier into concrete entries, `target`
//! computes where each entry lands, `copy` and `clean` perform the actual
//! transfer and removal. All I/O goes through tokio so concurrent tasks
//! interleave at these boundaries.

mod clean;
mod copy;
mod resolve;
mod target;
mod util;

pub use clean::{collapse_empty_dirs, remove_entry};
pub use copy::copy_entry;
pub use resolve::{ResolvedEntry, StatOutcome, expand_glob, stat_path};
pub use target::compose_target;
pub use util::{absolutize, normalize, sub_path_under};
