//! Single-pass extraction of language buckets and markdown reconstruction.
//!
//! Bucket contents, reconstructed markdown, and the javascript mapping
//! entries are produced together so line counters on both sides never drift.

use std::borrow::Cow;

use tracing::debug;

use crate::config::Language;
use crate::readers::Node;

use super::bucket::{Buckets, BLOCK_SEPARATOR};
use super::source_map::{LineMappings, Mapping};

/// How the markdown is re-serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructOptions {
    /// Collapse line breaks inside paragraphs to single spaces.
    pub clean: bool,
    /// Drop the first node when it is a heading.
    pub strip_title: bool,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            clean: true,
            strip_title: false,
        }
    }
}

/// Output of one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Per-language code.
    pub buckets: Buckets,
    /// The document re-serialized node by node.
    pub markdown: String,
    /// Mapping entries for the javascript bucket.
    pub mappings: Vec<Mapping>,
}

/// Routes fenced code into buckets while rebuilding the markdown.
#[derive(Debug, Clone, Copy)]
pub struct BlockExtractor {
    options: ReconstructOptions,
    mapped: Language,
}

impl BlockExtractor {
    /// Creates an extractor that records mappings for javascript.
    pub fn new(options: ReconstructOptions) -> Self {
        Self {
            options,
            mapped: Language::Javascript,
        }
    }

    /// Runs the extraction over nodes in document order.
    pub fn extract(&self, nodes: &[Node]) -> Extraction {
        let mut buckets = Buckets::new();
        let mut mappings = Vec::new();
        let mut sections: Vec<Cow<'_, str>> = Vec::with_capacity(nodes.len());

        // Both counters are 1-indexed; each section is followed by one blank line.
        let mut clean_line = 1usize;
        let mut generated_line = 1usize;

        let skip = usize::from(self.options.strip_title && nodes.first().is_some_and(Node::is_heading));

        for node in &nodes[skip..] {
            let section = serialize_node(node, self.options.clean);

            if let Some(language) = node.language() {
                if language == Language::Other {
                    debug!(
                        "{}: collecting `{}` fence as other",
                        node.location,
                        node.language_tag().unwrap_or_default()
                    );
                }
                buckets.append(language, &node.text);

                if language == self.mapped {
                    // Content starts below the opening fence.
                    mappings.extend(LineMappings::new(&node.text, generated_line, clean_line + 1));
                    generated_line += line_count(&node.text) + 1;
                }
            }

            clean_line += line_count(&section) + 1;
            sections.push(section);
        }

        let mut markdown = sections.join(BLOCK_SEPARATOR);
        if !markdown.is_empty() {
            markdown.push('\n');
        }

        Extraction {
            buckets: buckets.finish(),
            markdown,
            mappings,
        }
    }
}

fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Serializes a node for the reconstructed markdown.
fn serialize_node(node: &Node, clean: bool) -> Cow<'_, str> {
    if let Some(info) = node.info() {
        return Cow::Owned(fenced(info, &node.text));
    }
    if clean && node.is_paragraph() {
        return Cow::Owned(collapse_lines(&node.text));
    }
    Cow::Borrowed(&node.text)
}

/// Joins paragraph lines with single spaces. Backslash hard breaks are
/// dropped along with the line break they mark.
fn collapse_lines(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let last = lines.len().saturating_sub(1);

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let escapes = line.len() - line.trim_end_matches('\\').len();
            if i < last && escapes % 2 == 1 {
                line[..line.len() - 1].trim_end()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes a fenced block whose fence cannot be closed by its own content.
fn fenced(info: &str, text: &str) -> String {
    let marker = if info.contains('`') { '~' } else { '`' };
    let longest = text
        .split('\n')
        .map(|line| line.trim_start().chars().take_while(|c| *c == marker).count())
        .max()
        .unwrap_or(0);
    let fence: String = std::iter::repeat(marker).take(longest.max(2) + 1).collect();

    if text.is_empty() {
        format!("{fence}{info}\n{fence}")
    } else {
        format!("{fence}{info}\n{text}\n{fence}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::parse_markdown;
    use pretty_assertions::assert_eq;

    fn extract_with(input: &str, options: ReconstructOptions) -> Extraction {
        let doc = parse_markdown(input, None).unwrap();
        BlockExtractor::new(options).extract(&doc.nodes)
    }

    fn extract(input: &str) -> Extraction {
        extract_with(input, ReconstructOptions::default())
    }

    #[test]
    fn test_buckets_in_document_order() {
        let input = "```javascript\nfirst();\n```\n\n```css\na{}\n```\n\n```javascript\nsecond();\n```\n";
        let extraction = extract(input);

        assert_eq!(extraction.buckets.get(Language::Javascript), "first();\n\nsecond();");
        assert_eq!(extraction.buckets.get(Language::Css), "a{}");
        assert_eq!(extraction.buckets.get(Language::Html), "");
    }

    #[test]
    fn test_reordering_fences_reorders_bucket() {
        let a = extract("```javascript\na();\n```\n\n```javascript\nb();\n```\n");
        let b = extract("```javascript\nb();\n```\n\n```javascript\na();\n```\n");

        assert_eq!(a.buckets.get(Language::Javascript), "a();\n\nb();");
        assert_eq!(b.buckets.get(Language::Javascript), "b();\n\na();");
    }

    #[test]
    fn test_untagged_fence_only_in_markdown() {
        let extraction = extract("```\nplain\n```\n");

        assert_eq!(extraction.buckets.iter().count(), 0);
        assert_eq!(extraction.markdown, "```\nplain\n```\n");
    }

    #[test]
    fn test_other_tags_route_to_other_bucket() {
        let extraction = extract("```python\nprint()\n```\n\n```rust\nfn main() {}\n```\n");

        assert_eq!(extraction.buckets.get(Language::Other), "print()\n\nfn main() {}");
        assert!(extraction.markdown.contains("```python\nprint()\n```"));
    }

    #[test]
    fn test_clean_reconstruction() {
        let input = "# Title\n\nA paragraph\nwrapped   \nover lines.\n\n- a\n- b\n\n```html\n<p>hi</p>\n```\n";

        let clean = extract(input);
        assert_eq!(
            clean.markdown,
            "# Title\n\nA paragraph wrapped over lines.\n\n- a\n- b\n\n```html\n<p>hi</p>\n```\n"
        );

        let raw = extract_with(
            input,
            ReconstructOptions {
                clean: false,
                strip_title: false,
            },
        );
        assert_eq!(
            raw.markdown,
            "# Title\n\nA paragraph\nwrapped   \nover lines.\n\n- a\n- b\n\n```html\n<p>hi</p>\n```\n"
        );
    }

    #[test]
    fn test_collapse_hard_breaks() {
        assert_eq!(collapse_lines("foo\\\nbar"), "foo bar");
        assert_eq!(collapse_lines("two  \nspaces"), "two spaces");
        assert_eq!(collapse_lines("escaped\\\\\nslash"), "escaped\\\\ slash");
        assert_eq!(collapse_lines("last\\"), "last\\");
    }

    #[test]
    fn test_clean_paragraph_with_hard_break() {
        let extraction = extract("Line one\\\nline two.\n");
        assert_eq!(extraction.markdown, "Line one line two.\n");
    }

    #[test]
    fn test_link_definitions_survive_reconstruction() {
        let input = "See [the docs][d].\n\n[d]: https://example.com\n\n```javascript\nx();\n```\n";
        let extraction = extract(input);

        assert_eq!(
            extraction.markdown,
            "See [the docs][d].\n\n[d]: https://example.com\n\n```javascript\nx();\n```\n"
        );
        let original: Vec<&str> = extraction.markdown.split('\n').collect();
        let m = extraction.mappings[0];
        assert_eq!(original[m.original_line as usize - 1], "x();");
    }

    #[test]
    fn test_strip_title() {
        let options = ReconstructOptions {
            clean: true,
            strip_title: true,
        };

        let stripped = extract_with("# Title\n\nBody.\n", options);
        assert_eq!(stripped.markdown, "Body.\n");

        let kept = extract_with("Body first.\n\n# Later\n", options);
        assert_eq!(kept.markdown, "Body first.\n\n# Later\n");
    }

    #[test]
    fn test_mappings_point_at_reconstructed_lines() {
        let input = "# Demo\n\nSome\nwrapped text.\n\n```javascript\nconst a = 1;\n\n    call(a);\n```\n\nMore.\n\n```javascript\nlast();\n```\n";
        let extraction = extract(input);
        let javascript = extraction.buckets.get(Language::Javascript);

        assert_eq!(javascript, "const a = 1;\n\n    call(a);\n\nlast();");
        assert_eq!(extraction.mappings.len(), 3);

        let generated: Vec<&str> = javascript.split('\n').collect();
        let original: Vec<&str> = extraction.markdown.split('\n').collect();
        for m in &extraction.mappings {
            let g = generated[m.generated_line as usize - 1];
            let o = original[m.original_line as usize - 1];
            assert_eq!(g.trim(), o.trim());
            assert_eq!(m.generated_column as usize, g.len() - g.trim_start().len());
        }

        assert_eq!(extraction.mappings[2].generated_line, 5);
    }

    #[test]
    fn test_mappings_with_raw_paragraphs() {
        let input = "Line one\nline two\nline three\n\n```javascript\nx();\n```\n";
        let extraction = extract_with(
            input,
            ReconstructOptions {
                clean: false,
                strip_title: false,
            },
        );

        assert_eq!(extraction.mappings[0].original_line, 6);
        let original: Vec<&str> = extraction.markdown.split('\n').collect();
        assert_eq!(original[5], "x();");
    }

    #[test]
    fn test_empty_fence_keeps_counters_aligned() {
        let input = "```javascript\na();\n```\n\n```javascript\n```\n\n```javascript\nb();\n```\n";
        let extraction = extract(input);
        let javascript = extraction.buckets.get(Language::Javascript);

        assert_eq!(javascript, "a();\n\n\n\nb();");
        let last = extraction.mappings.last().unwrap();
        assert_eq!(last.generated_line as usize, javascript.split('\n').count());
    }

    #[test]
    fn test_fence_longer_than_content() {
        let extraction = extract("````markdown\n```javascript\nnot extracted\n```\n````\n");

        assert!(extraction.markdown.starts_with("````markdown\n"));
        assert!(extraction.buckets.is_empty(Language::Javascript));
    }

    #[test]
    fn test_reparse_preserves_fences() {
        let input = "# T\n\n```css\na{}\n```\n\nText\nhere.\n\n```\nuntagged\n```\n\n```javascript\nx();\n```\n";
        let extraction = extract(input);

        let original = parse_markdown(input, None).unwrap();
        let reparsed = parse_markdown(&extraction.markdown, None).unwrap();

        let fences = |doc: &crate::readers::ParsedDocument| {
            doc.code_nodes()
                .map(|n| (n.language_tag().map(str::to_string), n.text.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(fences(&original), fences(&reparsed));
    }

    #[test]
    fn test_empty_document() {
        let extraction = extract("");
        assert_eq!(extraction.markdown, "");
        assert!(extraction.mappings.is_empty());
    }
}
