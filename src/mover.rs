//! The mover: drives resolution -> copy -> cleanup for a path mapping.
//!
//! Mapping entries are processed in sequential batches no larger than the
//! configured concurrency; within a batch entries run concurrently on the
//! async runtime and the whole batch settles before the next one starts.
//! Any task failure aborts the operation (fail-fast; no further batches
//! are scheduled).

use std::path::{Path, PathBuf};

use futures::future;
use tracing::{debug, error, warn};

use crate::config::{CleanupFailure, MoveOptions};
use crate::errors::MoveError;
use crate::events::MoveEvent;
use crate::fs_ops::{
    ResolvedEntry, StatOutcome, absolutize, collapse_empty_dirs, compose_target, copy_entry,
    expand_glob, normalize, remove_entry, stat_path, sub_path_under,
};

/// Ordered (source specifier, target specifier) pairs.
pub type PathMapping = Vec<(String, String)>;

type EventCallback = Box<dyn Fn(&MoveEvent) + Send + Sync>;

/// Paths precomputed once per move; every task borrows them.
struct MoveContext {
    cwd: PathBuf,
    dest_root: PathBuf,
    base: Option<PathBuf>,
    clean_boundary: PathBuf,
}

/// Stateful mover instance. Create with [`Mover::new`], optionally register
/// event callbacks, then call [`Mover::move_all`].
pub struct Mover {
    options: MoveOptions,
    callbacks: Vec<EventCallback>,
}

impl Mover {
    pub fn new(options: MoveOptions) -> Self {
        Self {
            options,
            callbacks: Vec::new(),
        }
    }

    pub fn options(&self) -> &MoveOptions {
        &self.options
    }

    /// Register a progress callback. Callbacks run inline on the task that
    /// produced the event and may fire from concurrent tasks.
    pub fn on_event<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&MoveEvent) + Send + Sync + 'static,
    {
        self.callbacks.push(Box::new(callback));
        self
    }

    fn emit(&self, event: &MoveEvent) {
        for callback in &self.callbacks {
            callback(event);
        }
    }

    /// Move every mapping entry, fail-fast.
    ///
    /// Returns `Ok(())` only when all entries succeeded. On the first batch
    /// failure an `error` event is emitted and the wrapped error returned;
    /// later batches are never scheduled.
    pub async fn move_all(&self, mapping: &[(String, String)]) -> Result<(), MoveError> {
        let ctx = self.context();
        let limit = self.options.concurrency.max(1);

        for batch in mapping.chunks(limit) {
            let tasks = batch
                .iter()
                .map(|(source, target)| self.process_entry(source, target, &ctx));
            if let Err(err) = future::try_join_all(tasks).await {
                error!(code = err.code(), error = %err, "move operation failed");
                self.emit(&MoveEvent::from_error(&err));
                return Err(err);
            }
        }
        Ok(())
    }

    fn context(&self) -> MoveContext {
        let cwd = normalize(&self.options.cwd);
        let dest_root = match &self.options.dest {
            Some(dest) => absolutize(&cwd, dest),
            None => cwd.clone(),
        };
        let base = self.options.base.as_ref().map(|b| absolutize(&cwd, b));
        // Collapse is bounded by the base when one is configured, else by cwd.
        let clean_boundary = base.clone().unwrap_or_else(|| cwd.clone());
        MoveContext {
            cwd,
            dest_root,
            base,
            clean_boundary,
        }
    }

    /// One mapping entry: resolve, then copy + clean each resolved entry.
    async fn process_entry(
        &self,
        source_spec: &str,
        target_spec: &str,
        ctx: &MoveContext,
    ) -> Result<(), MoveError> {
        let source_path = absolutize(&ctx.cwd, Path::new(source_spec));
        let target_path = absolutize(&ctx.dest_root, Path::new(target_spec));

        match stat_path(&source_path).await {
            StatOutcome::Found(meta) => {
                let entry = ResolvedEntry {
                    sub_path: sub_path_under(ctx.base.as_deref(), &source_path),
                    is_dir: meta.is_dir(),
                    path: source_path,
                };
                self.copy_resolved(&entry, &target_path).await?;
                self.clean_source(&entry.path, ctx).await
            }
            StatOutcome::NotFound => {
                self.process_glob(source_spec, source_path, &target_path, ctx)
                    .await
            }
            StatOutcome::Failed(cause) => Err(MoveError::Process {
                source: source_path,
                target: target_path,
                cause: Box::new(cause),
            }),
        }
    }

    /// Glob fallback: expand the specifier, then run all copies concurrently
    /// followed by all cleans. Zero matches is a warning-level skip.
    async fn process_glob(
        &self,
        pattern: &str,
        source_path: PathBuf,
        target_path: &Path,
        ctx: &MoveContext,
    ) -> Result<(), MoveError> {
        let matches = expand_glob(&ctx.cwd, pattern)
            .await
            .map_err(|cause| MoveError::Process {
                source: source_path,
                target: target_path.to_path_buf(),
                cause,
            })?;

        if matches.is_empty() {
            if self.options.verbose {
                warn!(pattern, "no files found matching pattern; skipping entry");
            } else {
                debug!(pattern, "no files found matching pattern; skipping entry");
            }
            return Ok(());
        }

        let entries: Vec<ResolvedEntry> = matches
            .into_iter()
            .map(|path| ResolvedEntry {
                sub_path: sub_path_under(ctx.base.as_deref(), &path),
                // Matches follow the directory target rules: structure under
                // the base is preserved, file-extension renaming never applies.
                is_dir: true,
                path,
            })
            .collect();

        future::try_join_all(
            entries
                .iter()
                .map(|entry| self.copy_resolved(entry, target_path)),
        )
        .await?;
        future::try_join_all(entries.iter().map(|entry| self.clean_source(&entry.path, ctx)))
            .await?;
        Ok(())
    }

    async fn copy_resolved(
        &self,
        entry: &ResolvedEntry,
        target: &Path,
    ) -> Result<(), MoveError> {
        let final_target = compose_target(entry, target);

        self.emit(&MoveEvent::CopyStart {
            source: entry.path.clone(),
            target: final_target.clone(),
        });
        if self.options.verbose {
            debug!(
                source = %entry.path.display(),
                target = %final_target.display(),
                "copying"
            );
        }

        copy_entry(&entry.path, &final_target, self.options.force)
            .await
            .map_err(|cause| MoveError::Copy {
                source: entry.path.clone(),
                target: final_target.clone(),
                cause,
            })?;

        self.emit(&MoveEvent::CopyDone {
            source: entry.path.clone(),
            target: final_target,
        });
        Ok(())
    }

    /// Remove a copied original and, when `clean` is set, collapse its
    /// now-empty ancestors up to the boundary.
    async fn clean_source(&self, path: &Path, ctx: &MoveContext) -> Result<(), MoveError> {
        self.emit(&MoveEvent::CleanStart {
            path: path.to_path_buf(),
        });

        let outcome = async {
            remove_entry(path).await?;
            if self.options.clean
                && let Some(parent) = path.parent()
            {
                collapse_empty_dirs(parent, &ctx.clean_boundary).await?;
            }
            Ok::<(), std::io::Error>(())
        }
        .await;

        match outcome {
            Ok(()) => {
                if self.options.verbose {
                    debug!(path = %path.display(), "cleaned source");
                }
                self.emit(&MoveEvent::CleanDone {
                    path: path.to_path_buf(),
                });
                Ok(())
            }
            Err(cause) => match self.options.cleanup_failure {
                CleanupFailure::Abort => Err(MoveError::Clean {
                    path: path.to_path_buf(),
                    cause,
                }),
                CleanupFailure::Warn => {
                    warn!(
                        path = %path.display(),
                        error = %cause,
                        "failed to clean source; continuing"
                    );
                    Ok(())
                }
            },
        }
    }
}

/// One-shot convenience: construct a mover and run a single move.
pub async fn move_file(
    mapping: &[(String, String)],
    options: MoveOptions,
) -> Result<(), MoveError> {
    Mover::new(options).move_all(mapping).await
}
