//! Page rendering and per-format artifact assembly.

mod context;
mod formats;
mod template;

pub use context::{RenderContext, Script};
pub use formats::{render_artifacts, Artifact, CompileOptions};
pub use template::{reindent, TemplateRenderer};
