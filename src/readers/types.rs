//! Type definitions for readers.

use crate::config::{info_language, Language};
use crate::text_location::TextLocation;

/// The structural kind of a top-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// ATX or setext heading with its level (1-6).
    Heading(u8),
    Paragraph,
    List,
    BlockQuote,
    /// Fenced code with its full info string.
    Code { info: String },
    /// Indented code; never extracted.
    IndentedCode,
    Html,
    Table,
    ThematicBreak,
    /// Anything else the grammar produces at the top level.
    Other,
}

/// One structural unit of a parsed document.
///
/// For code nodes `text` holds the fence content without the fences; for
/// every other kind it holds the node's markdown source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Structural kind.
    pub kind: NodeKind,
    /// Node text.
    pub text: String,
    /// Location of the node's first line in the input.
    pub location: TextLocation,
}

impl Node {
    /// Creates a node.
    pub fn new(kind: NodeKind, text: impl Into<String>, location: TextLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// Returns true if this is a fenced code node.
    pub fn is_code(&self) -> bool {
        matches!(self.kind, NodeKind::Code { .. })
    }

    /// Returns true if this is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        self.kind == NodeKind::Paragraph
    }

    /// Returns true if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, NodeKind::Heading(_))
    }

    /// The info string of a fenced code node.
    pub fn info(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Code { info } => Some(info),
            _ => None,
        }
    }

    /// The declared fence language tag, if any.
    pub fn language_tag(&self) -> Option<&str> {
        self.info().map(info_language).filter(|tag| !tag.is_empty())
    }

    /// The recognized language of a fenced code node.
    ///
    /// `None` for non-code nodes and for fences without a language tag.
    pub fn language(&self) -> Option<Language> {
        self.language_tag().and_then(Language::from_tag)
    }
}
