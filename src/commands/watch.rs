//! Watch command implementation.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, info};

use super::build::BuildOptions;
use crate::errors::{LiterallyError, Result};
use crate::interface::{compile_files, Context};

/// Options for the watch command.
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    /// Documents to watch (empty means the configured `files`).
    pub files: Vec<PathBuf>,
    /// Debounce delay in milliseconds; 0 uses the configured value.
    pub debounce_ms: u64,
}

/// Compiles once, then recompiles each document whenever it changes.
///
/// Runs until the watcher's channel closes.
pub fn watch(ctx: &Context, options: WatchOptions) -> Result<()> {
    let debounce = Duration::from_millis(if options.debounce_ms > 0 {
        options.debounce_ms
    } else {
        ctx.config.watch.debounce_ms
    });

    let inputs = if options.files.is_empty() {
        ctx.source_files()?
    } else {
        options.files.clone()
    };
    let watched = watched_paths(ctx, &inputs);

    let initial = BuildOptions {
        dry_run: false,
        files: inputs.clone(),
    };
    if let Err(e) = initial.transaction(ctx).and_then(|tx| tx.execute()) {
        error!("{}", e);
    }

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        Config::default().with_poll_interval(debounce),
    )
    .map_err(|e| LiterallyError::Watch(e.to_string()))?;

    let dirs: HashSet<&Path> = watched.keys().filter_map(|p| p.parent()).collect();
    for dir in dirs {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| LiterallyError::Watch(e.to_string()))?;
    }

    info!("Watching {} documents", inputs.len());

    loop {
        let first = rx
            .recv()
            .map_err(|e| LiterallyError::Watch(e.to_string()))?;
        let mut changed = changed_inputs(&first, &watched);

        // Editors often emit several events per save.
        loop {
            match rx.recv_timeout(debounce) {
                Ok(event) => changed.extend(changed_inputs(&event, &watched)),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(LiterallyError::Watch("watcher stopped".to_string()))
                }
            }
        }

        changed.sort();
        changed.dedup();
        for path in changed {
            debug!("Changed: {}", path.display());
            if let Err(e) = compile_files(ctx, &[path]).and_then(|tx| tx.execute()) {
                error!("{}", e);
            }
        }
    }
}

/// Maps the absolute path of each input to the path it was given as.
fn watched_paths(ctx: &Context, inputs: &[PathBuf]) -> HashMap<PathBuf, PathBuf> {
    inputs
        .iter()
        .map(|input| {
            let resolved = ctx.resolve_path(input);
            let absolute = resolved.canonicalize().unwrap_or(resolved);
            (absolute, input.clone())
        })
        .collect()
}

/// Returns the inputs touched by an event.
fn changed_inputs(event: &Event, watched: &HashMap<PathBuf, PathBuf>) -> Vec<PathBuf> {
    if event.kind.is_access() {
        return Vec::new();
    }
    event
        .paths
        .iter()
        .filter_map(|p| {
            watched.get(p).or_else(|| {
                p.canonicalize()
                    .ok()
                    .and_then(|canonical| watched.get(&canonical))
            })
        })
        .cloned()
        .collect()
}
