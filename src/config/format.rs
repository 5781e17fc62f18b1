//! Output format definitions.
//!
//! Each format consumes the extracted buckets differently:
//! - `inline-html`: one page with inline `<style>` and `<script>`
//! - `split-html`: page + external script + source map
//! - `node-module`: bare script plus an optional template-language file
//! - `block-bundle`: `index.html`, optional `.block` metadata, `README.md`

use serde::{Deserialize, Serialize};

/// Output format of a compile run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// Single HTML page with inline css and javascript
    #[default]
    #[serde(alias = "html")]
    #[value(alias = "html")]
    InlineHtml,
    /// HTML page referencing an external script with a source map
    #[serde(alias = "split")]
    #[value(alias = "split")]
    SplitHtml,
    /// Node module script and optional handlebars template
    #[serde(alias = "node")]
    #[value(alias = "node")]
    NodeModule,
    /// Gallery bundle: index.html, .block and README.md
    #[serde(alias = "blocks")]
    #[value(alias = "blocks")]
    BlockBundle,
}

impl Format {
    /// Returns the format name as a static string.
    pub fn name(&self) -> &'static str {
        match self {
            Format::InlineHtml => "inline-html",
            Format::SplitHtml => "split-html",
            Format::NodeModule => "node-module",
            Format::BlockBundle => "block-bundle",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline-html" | "html" => Ok(Format::InlineHtml),
            "split-html" | "split" => Ok(Format::SplitHtml),
            "node-module" | "node" => Ok(Format::NodeModule),
            "block-bundle" | "blocks" => Ok(Format::BlockBundle),
            _ => Err(format!(
                "Unknown format '{}'. Valid formats: inline-html, split-html, node-module, block-bundle",
                s
            )),
        }
    }
}
