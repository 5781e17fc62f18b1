//! High-level interface for compiling documents.

mod context;
mod document;

pub use context::Context;
pub use document::{compile_documents, compile_files, compile_source, Document};
