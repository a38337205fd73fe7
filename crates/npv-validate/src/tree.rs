//! Minimal filesystem capability surface for the validator.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

/// A single directory entry as seen by the validator.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    /// Entry name without any parent components.
    pub name: String,
    /// Full path of the entry.
    pub path: PathBuf,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// Read-only directory access used by the validator.
///
/// The validator only ever needs to test existence, test directory-ness,
/// and list immediate children, so that is the whole surface. [`FsTree`]
/// backs it with `std::fs`; [`MemTree`] provides a fake tree so the
/// validator is testable without touching the real filesystem.
pub trait DirTree {
    /// True when the path exists at all (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// True when the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists immediate children of a directory.
    ///
    /// Order must be deterministic per call.
    fn list(&self, path: &Path) -> io::Result<Vec<TreeEntry>>;
}

/// [`DirTree`] backed by the real filesystem.
///
/// Entries are sorted by name so traversal order is stable across
/// platforms and repeated calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTree;

impl DirTree for FsTree {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list(&self, path: &Path) -> io::Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = path.is_dir();
            entries.push(TreeEntry { name, path, is_dir });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// In-memory [`DirTree`] for tests.
///
/// Built with the fluent [`dir`](MemTree::dir) / [`file`](MemTree::file)
/// methods; missing parent directories are created implicitly.
#[derive(Debug, Clone, Default)]
pub struct MemTree {
    dirs: BTreeSet<PathBuf>,
    files: BTreeSet<PathBuf>,
}

impl MemTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory, creating missing parents.
    #[must_use]
    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path.as_ref());
        self
    }

    /// Adds a file, creating missing parent directories.
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path.to_path_buf());
        self
    }

    fn add_dir(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.dirs.insert(current.clone());
        }
    }

    fn children(&self, path: &Path) -> Vec<TreeEntry> {
        let mut entries: Vec<TreeEntry> = self
            .dirs
            .iter()
            .map(|p| (p, true))
            .chain(self.files.iter().map(|p| (p, false)))
            .filter(|(p, _)| p.parent() == Some(path))
            .map(|(p, is_dir)| TreeEntry {
                name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                path: p.clone(),
                is_dir,
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

impl DirTree for MemTree {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.contains(path) || self.files.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn list(&self, path: &Path) -> io::Result<Vec<TreeEntry>> {
        if !self.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            ));
        }
        Ok(self.children(path))
    }
}
