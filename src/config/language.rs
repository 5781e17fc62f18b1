//! Fence language tags recognized by bucket extraction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A recognized fence language.
///
/// Tags outside the closed set route to [`Language::Other`]; fences with no
/// tag at all have no language and are never bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Css,
    Html,
    /// Template language for node modules.
    Handlebars,
    /// Gallery metadata for block bundles.
    Block,
    /// Catch-all for any other tag.
    Other,
}

impl Language {
    /// All languages, in bucket order.
    pub const ALL: [Language; 6] = [
        Language::Javascript,
        Language::Css,
        Language::Html,
        Language::Handlebars,
        Language::Block,
        Language::Other,
    ];

    /// Resolves a fence tag. Returns `None` for an empty tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = match tag {
            "" => return None,
            "javascript" => Language::Javascript,
            "css" => Language::Css,
            "html" => Language::Html,
            "handlebars" => Language::Handlebars,
            "block" => Language::Block,
            _ => Language::Other,
        };
        Some(lang)
    }

    /// The fence tag of this language.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Javascript => "javascript",
            Language::Css => "css",
            Language::Html => "html",
            Language::Handlebars => "handlebars",
            Language::Block => "block",
            Language::Other => "other",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Extracts the language token from a fence info string.
///
/// Accepts plain (`javascript`), comma (`javascript,ignore`) and Pandoc
/// (`{.javascript #id}`) styles.
pub fn info_language(info: &str) -> &str {
    info.trim()
        .trim_start_matches('{')
        .split(|c: char| c.is_whitespace() || c == ',' || c == '}')
        .next()
        .unwrap_or("")
        .trim_start_matches('.')
}
