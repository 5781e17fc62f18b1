//! Command implementations used by the binary.

mod build;
mod watch;

pub use build::{build, BuildOptions};
pub use watch::{watch, WatchOptions};
