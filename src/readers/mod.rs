//! Readers for parsing markdown and preparing raw input.

mod markdown;
mod retarget;
mod types;

pub use markdown::{parse_markdown, ParsedDocument};
pub use retarget::RetargetRules;
pub use types::{Node, NodeKind};
