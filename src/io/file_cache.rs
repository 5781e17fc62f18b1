//! File system abstraction for reading input documents.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read-side file operations, with a real and an in-memory implementation.
pub trait FileCache: Send + Sync + std::fmt::Debug {
    /// Reads the contents of a file.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Lists files matching a glob pattern, sorted.
    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>>;
}

/// Real file system implementation.
#[derive(Debug, Clone, Default)]
pub struct RealFileCache {
    /// Base directory for relative paths.
    pub base_dir: PathBuf,
}

impl RealFileCache {
    /// Creates a new RealFileCache with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl FileCache for RealFileCache {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let full_pattern = self.base_dir.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        let mut paths: Vec<PathBuf> = glob::glob(&pattern_str)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .map(|p| {
                p.strip_prefix(&self.base_dir)
                    .map(|p| p.to_path_buf())
                    .unwrap_or(p)
            })
            .collect();
        paths.sort();

        Ok(paths)
    }
}

/// Virtual file system for testing.
#[derive(Debug, Clone, Default)]
pub struct VirtualFS {
    files: HashMap<PathBuf, String>,
}

impl VirtualFS {
    /// Creates a new empty virtual file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file to the virtual file system.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl FileCache for VirtualFS {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "File not found"))
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut matches: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| glob_pattern.matches_path(p))
            .cloned()
            .collect();
        matches.sort();

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_virtual_fs_basic() {
        let mut vfs = VirtualFS::new();
        vfs.add_file("demo.md", "# Demo");

        assert_eq!(vfs.read(Path::new("demo.md")).unwrap(), "# Demo");

        let err = vfs.read(Path::new("other.md")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_virtual_fs_glob() {
        let mut vfs = VirtualFS::new();
        vfs.add_file("docs/b.md", "");
        vfs.add_file("docs/a.md", "");
        vfs.add_file("docs/notes.txt", "");

        let matches = vfs.glob("docs/*.md").unwrap();
        assert_eq!(
            matches,
            vec![PathBuf::from("docs/a.md"), PathBuf::from("docs/b.md")]
        );
    }

    #[test]
    fn test_real_file_cache() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/one.md"), "one").unwrap();
        fs::write(dir.path().join("docs/two.md"), "two").unwrap();

        let cache = RealFileCache::new(dir.path().to_path_buf());
        assert_eq!(cache.read(Path::new("docs/two.md")).unwrap(), "two");

        let matches = cache.glob("docs/*.md").unwrap();
        assert_eq!(
            matches,
            vec![PathBuf::from("docs/one.md"), PathBuf::from("docs/two.md")]
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let vfs = VirtualFS::new();
        assert!(vfs.glob("[").is_err());
    }
}
