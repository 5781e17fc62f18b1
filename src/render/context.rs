//! Values handed to the page template.

/// Where the page's javascript comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    /// Code embedded in a `<script>` element.
    Inline(String),
    /// Relative path of an external script file.
    External(String),
}

/// The assembled sections of one page.
///
/// Built once per document and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    html: String,
    css: String,
    script: Script,
}

impl RenderContext {
    /// Creates a context with inline javascript.
    pub fn inline(
        html: impl Into<String>,
        javascript: impl Into<String>,
        css: impl Into<String>,
    ) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            script: Script::Inline(javascript.into()),
        }
    }

    /// Creates a context that references the javascript at `src`.
    pub fn external(
        html: impl Into<String>,
        src: impl Into<String>,
        css: impl Into<String>,
    ) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            script: Script::External(src.into()),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Converts to template variables. Blank sections become empty strings
    /// so the template's conditionals drop them.
    pub(crate) fn to_tera(&self) -> tera::Context {
        let mut context = tera::Context::new();
        context.insert("html", section(&self.html));
        context.insert("css", section(&self.css));

        let (javascript, src) = match &self.script {
            Script::Inline(code) => (section(code), ""),
            Script::External(src) => ("", src.as_str()),
        };
        context.insert("javascript", javascript);
        context.insert("src", src);
        context
    }
}

fn section(text: &str) -> &str {
    if text.trim().is_empty() {
        ""
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_sections_are_emptied() {
        let ctx = RenderContext::inline("<p></p>", "\n  \n", "");
        let vars = ctx.to_tera().into_json();

        assert_eq!(vars["html"], "<p></p>");
        assert_eq!(vars["javascript"], "");
        assert_eq!(vars["src"], "");
    }

    #[test]
    fn test_external_script() {
        let ctx = RenderContext::external("", "demo.js", "p{}");
        let vars = ctx.to_tera().into_json();

        assert_eq!(ctx.script(), &Script::External("demo.js".to_string()));
        assert_eq!(vars["javascript"], "");
        assert_eq!(vars["src"], "demo.js");
        assert_eq!(vars["css"], "p{}");
    }
}
