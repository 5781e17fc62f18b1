//! Literally - literate programming compiler
//!
//! Compiles markdown documents with fenced code blocks into web assets.
//! Fences tagged `html`, `css` and `javascript` are collected per language
//! in document order and assembled into one of several output formats:
//!
//! - **inline-html**: a single page with the styles and script embedded
//! - **split-html**: a page, an external script, and a source map pointing
//!   each script line back into the markdown
//! - **node-module**: the script alone, plus any `handlebars` template
//! - **block-bundle**: `index.html`, `.block` metadata and a `README.md`
//!
//! # Example
//!
//! ```
//! use literally::config::Format;
//! use literally::interface::compile_source;
//! use literally::render::{CompileOptions, TemplateRenderer};
//!
//! let renderer = TemplateRenderer::builtin().unwrap();
//! let options = CompileOptions::new(Format::NodeModule, "demo");
//! let artifacts = compile_source("```javascript\nrun();\n```\n", &options, &renderer).unwrap();
//!
//! assert_eq!(artifacts[0].content, "run();");
//! ```

pub mod commands;
pub mod config;
pub mod errors;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod render;
pub mod text_location;

// Re-export commonly used types
pub use config::{Config, Format, Language};
pub use errors::{LiterallyError, Result};
pub use interface::{compile_source, Context};
pub use model::{BlockExtractor, Extraction, SourceMapBuilder};
pub use readers::parse_markdown;
pub use render::{Artifact, CompileOptions, RenderContext, TemplateRenderer};

// Re-export command options
pub use commands::{BuildOptions, WatchOptions};
