//! I/O for reading documents and writing compiled artifacts.

mod file_cache;
mod stat;
mod transaction;

pub use file_cache::{FileCache, RealFileCache, VirtualFS};
pub use stat::{hexdigest_file, hexdigest_str};
pub use transaction::{Transaction, WriteAction};
