//! Build command implementation.

use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::{compile_documents, compile_files, Context};
use crate::io::Transaction;

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Dry run - show what would be written without writing.
    pub dry_run: bool,
    /// Documents to compile (empty means the configured `files`).
    pub files: Vec<PathBuf>,
}

impl BuildOptions {
    /// Compiles the selected documents without writing anything.
    pub fn transaction(&self, ctx: &Context) -> Result<Transaction> {
        if self.files.is_empty() {
            compile_documents(ctx)
        } else {
            compile_files(ctx, &self.files)
        }
    }
}

/// Executes the build command, returning the number of files written.
pub fn build(ctx: &Context, options: &BuildOptions) -> Result<usize> {
    let transaction = options.transaction(ctx)?;

    if options.dry_run {
        println!("Would write {} files:", transaction.len());
        for desc in transaction.describe() {
            println!("  {}", desc);
        }
        return Ok(0);
    }

    let written = transaction.execute()?;
    if written < transaction.len() {
        tracing::debug!("{} files unchanged", transaction.len() - written);
    }
    Ok(written)
}
