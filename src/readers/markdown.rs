//! Markdown parsing into top-level structural nodes.

use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::errors::{LiterallyError, Result};
use crate::text_location::LineIndex;

use super::types::{Node, NodeKind};

/// A parsed markdown document.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// Top-level nodes in document order.
    pub nodes: Vec<Node>,
    /// Source file path.
    pub source_path: Option<PathBuf>,
}

impl ParsedDocument {
    /// Returns the fenced code nodes in document order.
    pub fn code_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_code())
    }
}

/// A top-level node whose end event has not been seen yet.
struct PendingNode {
    kind: NodeKind,
    start: usize,
    code: String,
}

impl PendingNode {
    fn finish(self, source: &str, end: usize, index: &LineIndex, source_path: Option<&Path>) -> Node {
        let raw = source[self.start..end].trim_end();

        let mut location = index.location(self.start);
        if let Some(path) = source_path {
            location = location.with_filename(path.to_path_buf());
        }

        let text = match self.kind {
            NodeKind::Code { .. } => {
                let mut code = self.code;
                if code.ends_with('\n') {
                    code.pop();
                }
                code
            }
            _ => raw.to_string(),
        };

        Node::new(self.kind, text, location)
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn node_kind(tag: &Tag<'_>) -> NodeKind {
    match tag {
        Tag::Heading { level, .. } => NodeKind::Heading(heading_level(*level)),
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::List(_) => NodeKind::List,
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => NodeKind::Code {
            info: info.trim().to_string(),
        },
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::IndentedCode,
        Tag::HtmlBlock => NodeKind::Html,
        Tag::Table(_) => NodeKind::Table,
        _ => NodeKind::Other,
    }
}

/// Source between two top-level nodes that produced no events, such as link
/// reference definitions. Leading blank lines are dropped.
fn uncovered(source: &str, from: usize, to: usize) -> Option<PendingNode> {
    if from >= to {
        return None;
    }
    let gap = &source[from..to];
    if gap.trim().is_empty() {
        return None;
    }
    let blank = gap.len() - gap.trim_start().len();
    let line_start = gap[..blank].rfind('\n').map_or(0, |i| i + 1);
    Some(PendingNode {
        kind: NodeKind::Other,
        start: from + line_start,
        code: String::new(),
    })
}

fn unbalanced(index: &LineIndex, offset: usize, source_path: Option<&Path>, message: &str) -> LiterallyError {
    let mut location = index.location(offset);
    if let Some(path) = source_path {
        location = location.with_filename(path.to_path_buf());
    }
    LiterallyError::Parse {
        location,
        message: message.to_string(),
    }
}

/// Parses a markdown document into its ordered top-level nodes.
///
/// Line endings are normalized to `\n` first. Source that yields no events
/// at the top level (link reference definitions) becomes an `Other` node so
/// nothing is lost on reconstruction. Malformed fences are plain
/// text to the grammar, so the only failure is an event stream that does
/// not nest.
pub fn parse_markdown(input: &str, source_path: Option<&Path>) -> Result<ParsedDocument> {
    let source: Cow<'_, str> = if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(input)
    };
    let index = LineIndex::new(&source);

    let mut nodes = Vec::new();
    let mut depth = 0usize;
    let mut pending: Option<PendingNode> = None;
    let mut covered = 0usize;

    let parser = Parser::new_ext(&source, Options::ENABLE_TABLES);
    for (event, Range { start, end }) in parser.into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    if let Some(gap) = uncovered(&source, covered, start) {
                        nodes.push(gap.finish(&source, start, &index, source_path));
                    }
                    pending = Some(PendingNode {
                        kind: node_kind(&tag),
                        start,
                        code: String::new(),
                    });
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| unbalanced(&index, start, source_path, "unexpected end of block"))?;
                if depth == 0 {
                    let node = pending
                        .take()
                        .ok_or_else(|| unbalanced(&index, start, source_path, "block ended twice"))?;
                    nodes.push(node.finish(&source, end, &index, source_path));
                    covered = end;
                }
            }
            Event::Text(text) if depth == 1 => {
                if let Some(node) = pending.as_mut() {
                    if matches!(node.kind, NodeKind::Code { .. }) {
                        node.code.push_str(&text);
                    }
                }
            }
            Event::Rule if depth == 0 => {
                if let Some(gap) = uncovered(&source, covered, start) {
                    nodes.push(gap.finish(&source, start, &index, source_path));
                }
                let node = PendingNode {
                    kind: NodeKind::ThematicBreak,
                    start,
                    code: String::new(),
                };
                nodes.push(node.finish(&source, end, &index, source_path));
                covered = end;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(unbalanced(&index, source.len(), source_path, "unterminated block"));
    }
    if let Some(gap) = uncovered(&source, covered, source.len()) {
        nodes.push(gap.finish(&source, source.len(), &index, source_path));
    }

    Ok(ParsedDocument {
        nodes,
        source_path: source_path.map(Path::to_path_buf),
    })
}
