//! Per-language accumulation of fenced code.

use indexmap::IndexMap;

use crate::config::Language;

/// Separator placed between consecutive fences of one language.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Code text accumulated per language, in document order.
///
/// A language with no fences reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    buckets: IndexMap<Language, String>,
}

impl Buckets {
    /// Creates an empty set of buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one fence's text followed by the block separator.
    pub fn append(&mut self, language: Language, text: &str) {
        let bucket = self.buckets.entry(language).or_default();
        bucket.push_str(text);
        bucket.push_str(BLOCK_SEPARATOR);
    }

    /// Trims the single trailing separator from every bucket.
    #[must_use]
    pub fn finish(mut self) -> Self {
        for bucket in self.buckets.values_mut() {
            if bucket.ends_with(BLOCK_SEPARATOR) {
                bucket.truncate(bucket.len() - BLOCK_SEPARATOR.len());
            }
        }
        self
    }

    /// Returns the text of a language's bucket.
    pub fn get(&self, language: Language) -> &str {
        self.buckets.get(&language).map(String::as_str).unwrap_or("")
    }

    /// Returns true if a language has no code at all.
    pub fn is_empty(&self, language: Language) -> bool {
        self.get(language).is_empty()
    }

    /// Iterates non-empty buckets in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (Language, &str)> {
        self.buckets
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(lang, text)| (*lang, text.as_str()))
    }
}
