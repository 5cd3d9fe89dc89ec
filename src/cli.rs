//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! The mapping comes from positional `SOURCE=TARGET` pairs, a `--map` JSON
//! manifest, or both (manifest entries first, positionals appended).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueHint};
use serde::Deserialize;

use mv_file::{CleanupFailure, DEFAULT_CONCURRENCY, LogLevel, MoveOptions, PathMapping};

/// CLI wrapper for the mv_file library.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move files, directories and glob matches according to a path mapping"
)]
pub struct Args {
    /// Mapping entries as SOURCE=TARGET. Sources may be literal files,
    /// directories, or glob patterns; both sides are relative to --cwd
    /// (targets additionally under --dest).
    #[arg(value_name = "SOURCE=TARGET")]
    pub entries: Vec<String>,

    /// Read mapping entries from a JSON manifest: either an object
    /// ({"src": "dst", ...}) or an array of [source, target] pairs.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub map: Option<PathBuf>,

    /// Working directory sources resolve against (default: current directory).
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub cwd: Option<PathBuf>,

    /// Base directory; source structure below it is preserved under the target.
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub base: Option<PathBuf>,

    /// Destination prefix joined between the working directory and every target.
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub dest: Option<PathBuf>,

    /// Overwrite existing targets instead of failing on them.
    #[arg(short, long)]
    pub force: bool,

    /// Collapse now-empty ancestor directories after removing each source.
    #[arg(long)]
    pub clean: bool,

    /// Treat cleanup failures as warnings instead of aborting the move.
    #[arg(long, requires = "clean")]
    pub lenient_clean: bool,

    /// Log per-entry progress.
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of mapping entries processed concurrently per batch.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Also write logs to this file.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,
}

/// Accepted shapes of the --map manifest.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Manifest {
    Object(serde_json::Map<String, serde_json::Value>),
    Pairs(Vec<(String, String)>),
}

impl Args {
    /// Collect the full ordered mapping from the manifest and positionals.
    pub fn mapping(&self) -> Result<PathMapping> {
        let mut mapping = PathMapping::new();

        if let Some(path) = &self.map {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read map file '{}'", path.display()))?;
            let manifest: Manifest = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse map file '{}'", path.display()))?;
            match manifest {
                Manifest::Object(object) => {
                    for (source, target) in object {
                        let serde_json::Value::String(target) = target else {
                            bail!("map entry '{source}' must have a string target");
                        };
                        mapping.push((source, target));
                    }
                }
                Manifest::Pairs(pairs) => mapping.extend(pairs),
            }
        }

        for entry in &self.entries {
            let Some((source, target)) = entry.split_once('=') else {
                bail!("invalid mapping entry '{entry}'; expected SOURCE=TARGET");
            };
            if source.is_empty() || target.is_empty() {
                bail!("invalid mapping entry '{entry}'; both sides must be non-empty");
            }
            mapping.push((source.to_string(), target.to_string()));
        }

        if mapping.is_empty() {
            bail!("no mapping entries given; pass SOURCE=TARGET pairs or --map FILE");
        }
        Ok(mapping)
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use the default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Build mover options from the flags.
    pub fn options(&self) -> MoveOptions {
        let mut options = match &self.cwd {
            Some(cwd) => MoveOptions::new(cwd.clone()),
            None => MoveOptions::default(),
        };
        options.base = self.base.clone();
        options.dest = self.dest.clone();
        options.force = self.force;
        options.clean = self.clean;
        options.verbose = self.verbose;
        options.concurrency = self.concurrency;
        options.cleanup_failure = if self.lenient_clean {
            CleanupFailure::Warn
        } else {
            CleanupFailure::Abort
        };
        options
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_from(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mv-file").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn positional_entries_become_pairs() {
        let args = args_from(&["a.txt=out/a.txt", "docs=archive"]);
        let mapping = args.mapping().unwrap();
        assert_eq!(
            mapping,
            vec![
                ("a.txt".to_string(), "out/a.txt".to_string()),
                ("docs".to_string(), "archive".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_entry_is_rejected() {
        let args = args_from(&["no-separator"]);
        assert!(args.mapping().is_err());
        let args = args_from(&["=target"]);
        assert!(args.mapping().is_err());
    }

    #[test]
    fn empty_mapping_is_rejected() {
        let args = args_from(&[]);
        assert!(args.mapping().is_err());
    }

    #[test]
    fn debug_flag_wins_over_log_level() {
        let args = args_from(&["a=b", "--debug", "--log-level", "quiet"]);
        assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));
    }

    #[test]
    fn lenient_clean_maps_to_warn_policy() {
        let args = args_from(&["a=b", "--clean", "--lenient-clean"]);
        assert_eq!(args.options().cleanup_failure, CleanupFailure::Warn);
        let args = args_from(&["a=b", "--clean"]);
        assert_eq!(args.options().cleanup_failure, CleanupFailure::Abort);
    }
}
