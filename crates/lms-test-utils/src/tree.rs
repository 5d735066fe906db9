//! [`TestTree`]: a temporary directory with file helpers.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tempfile::TempDir;

/// A temporary directory used as a destination tree, cache or site
/// mirror. Removed when dropped.
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the tree.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write a file, creating parent directories.
    pub fn write(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a pretty-printed JSON document.
    pub fn write_json(&self, rel: &str, value: &serde_json::Value) -> PathBuf {
        let text = serde_json::to_string_pretty(value).unwrap();
        self.write(rel, text.as_bytes())
    }

    pub fn read(&self, rel: &str) -> String {
        let path = self.path(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    pub fn set_mtime(&self, rel: &str, time: SystemTime) {
        let file = File::options().write(true).open(self.path(rel)).unwrap();
        file.set_modified(time).unwrap();
    }

    pub fn mtime(&self, rel: &str) -> SystemTime {
        fs::metadata(self.path(rel)).unwrap().modified().unwrap()
    }

    /// Relative paths of every file in the tree, sorted, `/`-separated.
    pub fn files(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_files(self.root(), self.root(), &mut out);
        out.sort();
        out
    }

    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let rel = path.strip_prefix(root).unwrap();
            let parts: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            out.push(parts.join("/"));
        }
    }
}
