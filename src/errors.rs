//! Error types for the Literally compiler.

use thiserror::Error;

use crate::text_location::TextLocation;

/// Main error type for Literally operations.
#[derive(Error, Debug)]
pub enum LiterallyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Parse error at {location}: {message}")]
    Parse { location: TextLocation, message: String },

    #[error("Invalid retarget rule: {0}")]
    Regex(#[from] regex::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Source map error: {0}")]
    SourceMap(#[from] sourcemap::Error),

    #[error("Watch error: {0}")]
    Watch(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Literally operations.
pub type Result<T> = std::result::Result<T, LiterallyError>;
