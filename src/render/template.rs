//! The page template and its indentation filter.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tera::{Tera, Value};

use super::context::RenderContext;
use crate::errors::Result;

const TEMPLATE_NAME: &str = "page.html";
const BUILTIN_TEMPLATE: &str = include_str!("../../templates/page.html");

/// A compiled page template.
///
/// Filters are registered at construction; rendering only reads the engine,
/// so one renderer can be shared across documents and threads.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Compiles the built-in page template.
    pub fn builtin() -> Result<Self> {
        Self::from_source(BUILTIN_TEMPLATE)
    }

    /// Compiles a template from Tera source.
    pub fn from_source(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        // Injected code must reach the page untouched.
        tera.autoescape_on(vec![]);
        tera.register_filter("reindent", reindent_filter);
        tera.add_raw_template(TEMPLATE_NAME, source)?;
        Ok(Self { tera })
    }

    /// Compiles a template read from `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_source(&source)
    }

    /// Renders one page.
    pub fn render(&self, context: &RenderContext) -> Result<String> {
        Ok(self.tera.render(TEMPLATE_NAME, &context.to_tera())?)
    }
}

fn reindent_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("reindent: value must be a string"))?;
    let column = match args.get("column") {
        Some(column) => column
            .as_u64()
            .ok_or_else(|| tera::Error::msg("reindent: `column` must be a non-negative integer"))?
            as usize,
        None => 0,
    };
    Ok(Value::String(reindent(text, column)))
}

/// Re-indents multi-line text for insertion at `column`.
///
/// The common indentation is removed first. The first line is emitted without
/// padding (the template already sits at the insertion column); every later
/// non-blank line is padded with `column` spaces. Blank lines stay empty.
pub fn reindent(text: &str, column: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let common = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    let padding = " ".repeat(column);

    let mut out = String::with_capacity(text.len() + lines.len() * column);
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out.push_str(line.trim_start());
            continue;
        }
        out.push('\n');
        if line.trim().is_empty() {
            continue;
        }
        out.push_str(&padding);
        out.push_str(line.get(common..).unwrap_or_else(|| line.trim_start()));
    }
    out
}
