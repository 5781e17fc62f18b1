//! Data model for extracted code and source maps.

mod bucket;
mod extraction;
mod source_map;

pub use bucket::{Buckets, BLOCK_SEPARATOR};
pub use extraction::{BlockExtractor, Extraction, ReconstructOptions};
pub use source_map::{GeneratedScript, LineMappings, Mapping, SourceMap, SourceMapBuilder};
