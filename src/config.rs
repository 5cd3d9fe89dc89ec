//! Core configuration types.
//! - `MoveOptions` holds the mover settings with sensible defaults.
//! - `LogLevel` represents CLI verbosity with simple parsing helpers.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, bail};

/// Default number of mapping entries driven concurrently per batch.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Program-defined verbosity levels exposed to users.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// What to do when removing a source (or collapsing its empty ancestors)
/// fails after a successful copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupFailure {
    /// Wrap the failure into a clean error and abort the move (default).
    #[default]
    Abort,
    /// Log a warning and keep going; the copy already succeeded.
    Warn,
}

/// Runtime configuration for a [`crate::Mover`].
///
/// The working directory is captured here explicitly; nothing later in the
/// pipeline consults the ambient process directory.
#[derive(Debug, Clone)]
pub struct MoveOptions {
    /// Directory that relative source specifiers resolve against.
    pub cwd: PathBuf,
    /// Optional base directory; the portion of a resolved source below it is
    /// preserved under the target (the sub-path).
    pub base: Option<PathBuf>,
    /// Optional prefix joined between `cwd` and every target specifier.
    pub dest: Option<PathBuf>,
    /// Overwrite existing targets instead of failing on them.
    pub force: bool,
    /// Collapse now-empty ancestor directories after removing a source.
    pub clean: bool,
    /// Log per-entry progress.
    pub verbose: bool,
    /// Batch size for concurrent entry processing.
    pub concurrency: usize,
    /// Policy for cleanup failures.
    pub cleanup_failure: CleanupFailure,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            // Captured once; a failed lookup degrades to "." and is caught by validate().
            cwd: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            base: None,
            dest: None,
            force: false,
            clean: false,
            verbose: false,
            concurrency: DEFAULT_CONCURRENCY,
            cleanup_failure: CleanupFailure::default(),
        }
    }
}

impl MoveOptions {
    /// Construct options with an explicit working directory; other fields use defaults.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ..Default::default()
        }
    }

    /// Sanity-check the configuration before moving anything.
    ///
    /// - `cwd` must exist and be a directory.
    /// - `concurrency` must be at least 1.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            bail!("concurrency must be at least 1");
        }
        if !self.cwd.exists() {
            bail!("working directory does not exist: {}", self.cwd.display());
        }
        if !self.cwd.is_dir() {
            bail!(
                "working directory is not a directory: {}",
                self.cwd.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parses_aliases() {
        assert_eq!(LogLevel::parse("ERROR"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse("verbose"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("nope"), None);
    }

    #[test]
    fn defaults_match_documented_values() {
        let opts = MoveOptions::default();
        assert_eq!(opts.concurrency, DEFAULT_CONCURRENCY);
        assert!(!opts.force);
        assert!(!opts.clean);
        assert!(!opts.verbose);
        assert!(opts.base.is_none());
        assert!(opts.dest.is_none());
        assert_eq!(opts.cleanup_failure, CleanupFailure::Abort);
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut opts = MoveOptions::new(env::temp_dir());
        opts.concurrency = 0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_cwd() {
        let opts = MoveOptions::new("/definitely/not/a/real/dir");
        assert!(opts.validate().is_err());
    }
}
