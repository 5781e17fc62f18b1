//! Execution context for compilation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use tracing::warn;

use crate::config::Config;
use crate::errors::{LiterallyError, Result};
use crate::io::{FileCache, RealFileCache};
use crate::readers::RetargetRules;
use crate::render::TemplateRenderer;

/// Context for compile operations.
///
/// Holds everything shared across documents: configuration, the compiled
/// page template, compiled retarget rules, and file system access. Nothing
/// in it changes once constructed.
#[derive(Debug)]
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// Page template.
    pub renderer: TemplateRenderer,
    /// Substitutions applied to raw markdown.
    pub retarget: RetargetRules,
    /// File cache for reading documents.
    pub file_cache: Arc<dyn FileCache>,
    /// Base directory for operations.
    pub base_dir: PathBuf,
}

impl Context {
    /// Creates a new context with the given configuration.
    ///
    /// Fails on an invalid retarget rule or an unreadable or invalid template.
    pub fn new(config: Config, base_dir: PathBuf) -> Result<Self> {
        let retarget = RetargetRules::compile(&config.retarget)?;
        let renderer = match &config.template {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    base_dir.join(path)
                };
                TemplateRenderer::from_file(&path)?
            }
            None => TemplateRenderer::builtin()?,
        };
        let file_cache = Arc::new(RealFileCache::new(base_dir.clone()));

        Ok(Self {
            config,
            renderer,
            retarget,
            file_cache,
            base_dir,
        })
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Result<Self> {
        Self::new(Config::default(), base_dir)
    }

    /// Replaces the file cache.
    #[must_use]
    pub fn with_file_cache(mut self, file_cache: Arc<dyn FileCache>) -> Self {
        self.file_cache = file_cache;
        self
    }

    /// Returns the directory artifacts are written to.
    pub fn output_dir(&self) -> PathBuf {
        match self.config.output() {
            Some(output) => self.resolve_path(output),
            None => self.base_dir.clone(),
        }
    }

    /// Expands input patterns into document paths.
    ///
    /// Plain paths are passed through unchanged so a missing document is
    /// reported when it is read. Each document appears once, at its first
    /// mention.
    pub fn input_files(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let mut files = IndexSet::new();
        for pattern in patterns {
            if !pattern.contains(&['*', '?', '['][..]) {
                files.insert(PathBuf::from(pattern));
                continue;
            }
            glob::Pattern::new(pattern)?;
            let matched = self.file_cache.glob(pattern)?;
            if matched.is_empty() {
                warn!("Pattern '{}' matched no files", pattern);
            }
            files.extend(matched);
        }
        Ok(files.into_iter().collect())
    }

    /// Returns the documents named by the configured `files` patterns.
    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        let files = self.input_files(&self.config.files)?;
        if files.is_empty() {
            return Err(LiterallyError::Config("No input files".to_string()));
        }
        Ok(files)
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
