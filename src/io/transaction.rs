//! Batched, atomic writes of compiled artifacts.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, info};

use super::stat::{hexdigest_file, hexdigest_str};
use crate::errors::Result;

/// Write one file, replacing any existing content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAction {
    /// Target file path.
    pub path: PathBuf,
    /// Content to write.
    pub content: String,
}

impl WriteAction {
    /// Creates a new Write action.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Returns true if the target already holds exactly this content.
    pub fn is_unchanged(&self) -> bool {
        self.path.is_file()
            && hexdigest_file(&self.path)
                .map(|digest| digest == hexdigest_str(&self.content))
                .unwrap_or(false)
    }

    /// Writes the content, creating parent directories as needed.
    pub fn execute(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        atomic_write(&self.path, &self.content)?;
        Ok(())
    }

    /// Returns a description of this action.
    pub fn describe(&self) -> String {
        format!("write {}", self.path.display())
    }
}

/// The artifacts of one or more documents, written together once every
/// document has compiled.
#[derive(Debug, Default)]
pub struct Transaction {
    actions: Vec<WriteAction>,
}

impl Transaction {
    /// Creates a new empty transaction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Adds an action to the transaction.
    pub fn add(&mut self, action: WriteAction) {
        self.actions.push(action);
    }

    /// Adds a write action.
    pub fn write(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.add(WriteAction::new(path, content));
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if there are no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterates over the pending actions.
    pub fn actions(&self) -> impl Iterator<Item = &WriteAction> {
        self.actions.iter()
    }

    /// Returns descriptions of all actions.
    pub fn describe(&self) -> Vec<String> {
        self.actions.iter().map(WriteAction::describe).collect()
    }

    /// Executes all actions, skipping files whose content is unchanged.
    ///
    /// Returns the number of files written.
    pub fn execute(&self) -> Result<usize> {
        let mut written = 0;
        for action in &self.actions {
            if action.is_unchanged() {
                debug!("Unchanged {}", action.path.display());
                continue;
            }
            action.execute()?;
            info!("Compiled {}", action.path.display());
            written += 1;
        }
        Ok(written)
    }
}

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes via a temp file in the target directory, then renames over the target.
fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_path = parent.join(format!(
        ".literally-tmp-{}-{}",
        std::process::id(),
        counter,
    ));

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)?;

    Ok(())
}
