//! Application orchestrator.
//! Parses the mapping, merges flags into options, initializes logging,
//! builds the async runtime and drives the mover.

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use mv_file::output as out;
use mv_file::{MoveEvent, Mover};

use crate::cli::Args;
use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let level = args.effective_log_level().unwrap_or_default();
    // Guard must live until exit so the file appender flushes.
    let _guard = init_tracing(&level, args.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    let mapping = args.mapping()?;

    let mut options = args.options();
    options.validate()?;
    // Canonicalize the working directory up front (dunce avoids UNC-style
    // surprises on Windows); everything downstream is lexical.
    options.cwd = dunce::canonicalize(&options.cwd).with_context(|| {
        format!(
            "failed to canonicalize working directory '{}'",
            options.cwd.display()
        )
    })?;

    debug!("Starting mv-file: {:?}", args);

    let mut mover = Mover::new(options);
    mover.on_event(|event| match event {
        MoveEvent::CopyStart { source, target } => {
            debug!(event = event.name(), source = %source.display(), target = %target.display(), "copy starting");
        }
        MoveEvent::CopyDone { source, target } => {
            info!(event = event.name(), source = %source.display(), target = %target.display(), "copied");
        }
        MoveEvent::CleanStart { path } => {
            debug!(event = event.name(), path = %path.display(), "clean starting");
        }
        MoveEvent::CleanDone { path } => {
            info!(event = event.name(), path = %path.display(), "cleaned");
        }
        MoveEvent::Error { message, .. } => {
            error!(event = event.name(), error = %message, "move error");
        }
    });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build async runtime")?;

    match runtime.block_on(mover.move_all(&mapping)) {
        Ok(()) => {
            info!(entries = mapping.len(), "Move completed");
            out::print_success(&format!(
                "Moved {} mapping {}",
                mapping.len(),
                if mapping.len() == 1 { "entry" } else { "entries" }
            ));
            Ok(())
        }
        Err(e) => {
            // The mover already logged the failure with its code; surface a
            // short user-facing line and propagate.
            out::print_error(&e.to_string());
            Err(e.into())
        }
    }
}
