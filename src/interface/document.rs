//! Document loading and compilation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{LiterallyError, Result};
use crate::io::Transaction;
use crate::model::BlockExtractor;
use crate::readers::{parse_markdown, ParsedDocument};
use crate::render::{render_artifacts, Artifact, CompileOptions, TemplateRenderer};

use super::context::Context;

/// A parsed input document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path to the source markdown file.
    pub path: PathBuf,
    /// Parsed document content.
    pub parsed: ParsedDocument,
}

impl Document {
    /// Reads a document, applies the retarget rules, and parses it.
    pub fn load(path: &Path, ctx: &Context) -> Result<Self> {
        let content = ctx.file_cache.read(path)?;
        let content = ctx.retarget.apply(&content);
        let parsed = parse_markdown(&content, Some(path))?;

        Ok(Self {
            path: path.to_path_buf(),
            parsed,
        })
    }

    /// Runs extraction and rendering over this document.
    pub fn compile(
        &self,
        options: &CompileOptions,
        renderer: &TemplateRenderer,
    ) -> Result<Vec<Artifact>> {
        let extraction =
            BlockExtractor::new(options.reconstruct_options()).extract(&self.parsed.nodes);
        render_artifacts(&extraction, options, renderer)
    }
}

/// Compiles markdown text into the artifacts of `options.format`.
///
/// Performs no I/O.
pub fn compile_source(
    text: &str,
    options: &CompileOptions,
    renderer: &TemplateRenderer,
) -> Result<Vec<Artifact>> {
    let parsed = parse_markdown(text, None)?;
    let extraction = BlockExtractor::new(options.reconstruct_options()).extract(&parsed.nodes);
    render_artifacts(&extraction, options, renderer)
}

/// Compiles the configured documents.
pub fn compile_documents(ctx: &Context) -> Result<Transaction> {
    let source_files = ctx.source_files()?;
    compile_files(ctx, &source_files)
}

/// Compiles specific documents into one transaction.
///
/// Any failure aborts the whole batch before anything is written.
pub fn compile_files(ctx: &Context, source_files: &[PathBuf]) -> Result<Transaction> {
    let output_dir = ctx.output_dir();
    let mut transaction = Transaction::new();
    let mut targets = HashSet::new();

    for path in source_files {
        let doc = Document::load(path, ctx)?;
        let options = CompileOptions::from_config(&ctx.config, path);
        debug!("Compiling {} as {}", path.display(), options.format);

        for artifact in doc.compile(&options, &ctx.renderer)? {
            let target = output_dir.join(&artifact.path);
            if !targets.insert(target.clone()) {
                return Err(LiterallyError::Config(format!(
                    "More than one document writes {}",
                    target.display()
                )));
            }
            transaction.write(target, artifact.content);
        }
    }

    Ok(transaction)
}
