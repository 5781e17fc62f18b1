//! Assembly of output artifacts for each format.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::context::RenderContext;
use super::template::TemplateRenderer;
use crate::config::{Config, Format, Language};
use crate::errors::Result;
use crate::model::{Extraction, ReconstructOptions, SourceMapBuilder};

/// A file produced by compilation, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Per-document compilation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Output format.
    pub format: Format,
    /// Asset base name.
    pub name: String,
    /// Source name recorded in the source map.
    pub source_name: String,
    /// Reconstruct markdown in the cleaned variant.
    pub clean: bool,
    /// Drop a leading title from the block-bundle README.
    pub strip_title: bool,
}

impl CompileOptions {
    /// Creates options with default reconstruction settings.
    pub fn new(format: Format, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            format,
            source_name: format!("{}.md", name),
            name,
            clean: true,
            strip_title: true,
        }
    }

    /// Derives the options for compiling `input` under `config`.
    pub fn from_config(config: &Config, input: &Path) -> Self {
        let name = config.asset_name(input);
        let source_name = input
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.md", name));
        Self {
            format: config.format,
            name,
            source_name,
            clean: config.clean,
            strip_title: config.strip_title,
        }
    }

    /// Reconstruction settings for this format. The bundle README is always
    /// the cleaned variant.
    pub fn reconstruct_options(&self) -> ReconstructOptions {
        match self.format {
            Format::BlockBundle => ReconstructOptions {
                clean: true,
                strip_title: self.strip_title,
            },
            _ => ReconstructOptions {
                clean: self.clean,
                strip_title: false,
            },
        }
    }
}

/// Produces the artifacts of one document in the configured format.
pub fn render_artifacts(
    extraction: &Extraction,
    options: &CompileOptions,
    renderer: &TemplateRenderer,
) -> Result<Vec<Artifact>> {
    let buckets = &extraction.buckets;
    let html = buckets.get(Language::Html);
    let css = buckets.get(Language::Css);
    let javascript = buckets.get(Language::Javascript);
    let name = &options.name;

    let artifacts = match options.format {
        Format::InlineHtml => {
            let page = renderer.render(&RenderContext::inline(html, javascript, css))?;
            vec![Artifact::new(format!("{}.html", name), page)]
        }
        Format::SplitHtml => {
            let script_name = format!("{}.js", name);
            let map_name = format!("{}.js.map", name);
            let script = SourceMapBuilder::new(script_name.as_str(), options.source_name.as_str())
                .with_mapping_url(map_name.as_str())
                .build(extraction);
            let page = renderer.render(&RenderContext::external(html, script_name.as_str(), css))?;

            vec![
                Artifact::new(script_name, script.code),
                Artifact::new(map_name, script.map.to_json()?),
                Artifact::new(format!("{}.html", name), page),
            ]
        }
        Format::NodeModule => {
            let mut artifacts = vec![Artifact::new(format!("{}.js", name), javascript)];
            let handlebars = buckets.get(Language::Handlebars);
            if handlebars.is_empty() {
                debug!("No handlebars fences in {}, skipping template", options.source_name);
            } else {
                artifacts.push(Artifact::new(format!("{}.handlebars", name), handlebars));
            }
            artifacts
        }
        Format::BlockBundle => {
            let page = renderer.render(&RenderContext::inline(html, javascript, css))?;
            let mut artifacts = vec![Artifact::new("index.html", page)];
            let block = buckets.get(Language::Block);
            if block.is_empty() {
                debug!("No block fences in {}, skipping .block", options.source_name);
            } else {
                artifacts.push(Artifact::new(".block", block));
            }
            artifacts.push(Artifact::new("README.md", extraction.markdown.as_str()));
            artifacts
        }
    };

    Ok(artifacts)
}
