//! Source maps linking generated javascript lines back to the reconstructed markdown.

use crate::config::Language;
use crate::errors::{LiterallyError, Result};

use super::extraction::Extraction;

/// One generated-to-original position pair.
///
/// Lines are 1-indexed, columns 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub generated_line: u32,
    pub generated_column: u32,
    pub original_line: u32,
    pub original_column: u32,
}

/// Walks the lines of one fence, pairing each non-blank line with its
/// position in the reconstructed markdown.
///
/// Blank lines advance both counters but yield nothing.
#[derive(Debug, Clone)]
pub struct LineMappings<'a> {
    lines: std::str::Split<'a, char>,
    generated_line: usize,
    original_line: usize,
}

impl<'a> LineMappings<'a> {
    /// Starts a walk over `text`, whose first line is generated at
    /// `generated_line` and originates at `original_line`.
    pub fn new(text: &'a str, generated_line: usize, original_line: usize) -> Self {
        Self {
            lines: text.split('\n'),
            generated_line,
            original_line,
        }
    }
}

impl Iterator for LineMappings<'_> {
    type Item = Mapping;

    fn next(&mut self) -> Option<Mapping> {
        loop {
            let line = self.lines.next()?;
            let generated_line = self.generated_line;
            let original_line = self.original_line;
            self.generated_line += 1;
            self.original_line += 1;

            if line.trim().is_empty() {
                continue;
            }

            let column = line.chars().take_while(|c| c.is_whitespace()).count() as u32;
            return Some(Mapping {
                generated_line: generated_line as u32,
                generated_column: column,
                original_line: original_line as u32,
                original_column: column,
            });
        }
    }
}

/// A source map over a single original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMap {
    /// Generated file name.
    pub file: String,
    /// Name of the original source.
    pub source_name: String,
    /// Embedded original content.
    pub source_content: String,
    /// Entries in generated order.
    pub mappings: Vec<Mapping>,
}

impl SourceMap {
    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Serializes to revision 3 source map JSON.
    pub fn to_json(&self) -> Result<String> {
        let mut builder = sourcemap::SourceMapBuilder::new(Some(self.file.as_str()));
        let source_id = builder.add_source(&self.source_name);
        builder.set_source_contents(source_id, Some(self.source_content.as_str()));

        for m in &self.mappings {
            builder.add_raw(
                m.generated_line - 1,
                m.generated_column,
                m.original_line - 1,
                m.original_column,
                Some(source_id),
                None,
                false,
            );
        }

        let mut buf = Vec::new();
        builder.into_sourcemap().to_writer(&mut buf)?;
        String::from_utf8(buf).map_err(|e| LiterallyError::Other(e.to_string()))
    }
}

/// The javascript artifact and its source map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    /// Script text, with the mapping comment when requested.
    pub code: String,
    /// Map for `code`.
    pub map: SourceMap,
}

/// Assembles the javascript bucket and its mapping entries into a script
/// plus source map.
#[derive(Debug, Clone)]
pub struct SourceMapBuilder {
    file: String,
    source_name: String,
    mapping_url: Option<String>,
}

impl SourceMapBuilder {
    /// Creates a builder for generated file `file` mapped onto `source_name`.
    pub fn new(file: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            source_name: source_name.into(),
            mapping_url: None,
        }
    }

    /// Appends a `//# sourceMappingURL=` comment pointing at `url`.
    pub fn with_mapping_url(mut self, url: impl Into<String>) -> Self {
        self.mapping_url = Some(url.into());
        self
    }

    /// Builds the script and map. An empty javascript bucket yields an
    /// empty script and a map without entries.
    pub fn build(&self, extraction: &Extraction) -> GeneratedScript {
        let javascript = extraction.buckets.get(Language::Javascript);

        let mappings = if javascript.is_empty() {
            Vec::new()
        } else {
            extraction.mappings.clone()
        };
        debug_assert!(mappings
            .last()
            .map_or(true, |m| m.generated_line as usize <= javascript.split('\n').count()));

        let code = match &self.mapping_url {
            Some(url) if !javascript.is_empty() => {
                format!("{}\n//# sourceMappingURL={}", javascript, url)
            }
            _ => javascript.to_string(),
        };

        GeneratedScript {
            code,
            map: SourceMap {
                file: self.file.clone(),
                source_name: self.source_name.clone(),
                source_content: extraction.markdown.clone(),
                mappings,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::extraction::{BlockExtractor, ReconstructOptions};
    use crate::readers::parse_markdown;

    fn extract(input: &str) -> Extraction {
        let doc = parse_markdown(input, None).unwrap();
        BlockExtractor::new(ReconstructOptions::default()).extract(&doc.nodes)
    }

    #[test]
    fn test_line_mappings_skip_blank_lines() {
        let mappings: Vec<Mapping> = LineMappings::new("a();\n\n  b();", 1, 10).collect();

        assert_eq!(
            mappings,
            vec![
                Mapping {
                    generated_line: 1,
                    generated_column: 0,
                    original_line: 10,
                    original_column: 0,
                },
                Mapping {
                    generated_line: 3,
                    generated_column: 2,
                    original_line: 12,
                    original_column: 2,
                },
            ]
        );
    }

    #[test]
    fn test_line_mappings_whitespace_only_line() {
        let mappings: Vec<Mapping> = LineMappings::new("   \nx", 5, 5).collect();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].generated_line, 6);
    }

    #[test]
    fn test_build_with_mapping_url() {
        let extraction = extract("# T\n\n```javascript\na();\n```\n");
        let script = SourceMapBuilder::new("demo.js", "demo.md")
            .with_mapping_url("demo.js.map")
            .build(&extraction);

        assert_eq!(script.code, "a();\n//# sourceMappingURL=demo.js.map");
        assert_eq!(script.map.mappings.len(), 1);
        assert_eq!(script.map.source_content, extraction.markdown);
    }

    #[test]
    fn test_empty_javascript_bucket() {
        let extraction = extract("```css\nbody{}\n```\n");
        let script = SourceMapBuilder::new("demo.js", "demo.md")
            .with_mapping_url("demo.js.map")
            .build(&extraction);

        assert_eq!(script.code, "");
        assert!(script.map.is_empty());
    }

    #[test]
    fn test_json_roundtrip_through_consumer() {
        let input = "# Demo\n\nIntro\ntext.\n\n```javascript\nconst a = 1;\n\n  a();\n```\n\n```javascript\nb();\n```\n";
        let extraction = extract(input);
        let script = SourceMapBuilder::new("demo.js", "demo.md").build(&extraction);
        let json = script.map.to_json().unwrap();

        let parsed = sourcemap::SourceMap::from_slice(json.as_bytes()).unwrap();
        assert_eq!(parsed.get_file(), Some("demo.js"));
        assert_eq!(parsed.get_source(0), Some("demo.md"));
        assert_eq!(parsed.get_source_contents(0), Some(extraction.markdown.as_str()));
        assert_eq!(parsed.get_token_count(), 3);

        let original: Vec<&str> = extraction.markdown.split('\n').collect();
        for (i, line) in script.code.split('\n').enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let column = line.len() - line.trim_start().len();
            let token = parsed.lookup_token(i as u32, column as u32).unwrap();
            assert_eq!(token.get_dst_line(), i as u32);
            let src = original[token.get_src_line() as usize];
            assert_eq!(src.trim(), line.trim());
        }
    }

    #[test]
    fn test_empty_map_json() {
        let map = SourceMap {
            file: "x.js".to_string(),
            source_name: "x.md".to_string(),
            source_content: String::new(),
            mappings: Vec::new(),
        };
        let value: serde_json::Value = serde_json::from_str(&map.to_json().unwrap()).unwrap();

        assert_eq!(value["version"], 3);
        assert_eq!(value["mappings"], "");
    }
}
