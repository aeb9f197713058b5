//! In-memory backend.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::{FileType, FsError, FsStat, Metadata};

#[derive(Debug)]
enum Node {
    File(Vec<u8>),
    Dir,
    Symlink(PathBuf),
    Other,
}

impl Node {
    fn metadata(&self) -> Metadata {
        match self {
            Node::File(data) => Metadata {
                file_type: FileType::File,
                size: data.len() as u64,
            },
            Node::Dir => Metadata::new(FileType::Directory),
            Node::Symlink(target) => Metadata {
                file_type: FileType::Symlink,
                size: target.as_os_str().len() as u64,
            },
            Node::Other => Metadata::new(FileType::Other),
        }
    }
}

/// A filesystem held in a map from path to entry.
///
/// Only leaves need to be inserted: every ancestor of an entry is an implicit
/// directory, and the root (the empty path) always exists. Paths are
/// normalised lexically, so `/a/b`, `a/./b` and `a/c/../b` all name the same
/// entry. Symlinks are stored, never resolved.
///
/// A lookup that has to pass through an entry that is not a directory fails
/// with [`FsError::NotADirectory`]. That includes symlinks: unlike a host
/// filesystem, `MemoryFs` does not traverse a symlink in an intermediate
/// component, so with `link -> dir` a lookup of `link/child` fails. Paths marked with [`deny`](Self::deny)
/// fail every lookup at or below them with [`FsError::PermissionDenied`].
///
/// ## Thread Safety
///
/// State lives behind `RwLock`s, so entries can be added through `&self`
/// while other threads look paths up.
///
/// # Example
///
/// ```rust
/// use farm_rules::{FsStat, MemoryFs};
/// use std::path::Path;
///
/// let fs = MemoryFs::new()
///     .with_file("path/to/dir/.farm", b"")
///     .with_symlink("path/to/link", "dir");
///
/// assert!(fs.stat(Path::new("path/to")).unwrap().is_dir());
/// assert!(fs.stat(Path::new("path/to/link")).unwrap().is_symlink());
/// ```
#[derive(Debug, Default)]
pub struct MemoryFs {
    entries: RwLock<BTreeMap<PathBuf, Node>>,
    denied: RwLock<BTreeSet<PathBuf>>,
}

impl MemoryFs {
    /// Create an empty filesystem containing only the root directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert_file`](Self::insert_file).
    pub fn with_file(self, path: impl AsRef<Path>, contents: &[u8]) -> Self {
        self.insert_file(path, contents);
        self
    }

    /// Builder form of [`insert_dir`](Self::insert_dir).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.insert_dir(path);
        self
    }

    /// Builder form of [`insert_symlink`](Self::insert_symlink).
    pub fn with_symlink(self, path: impl AsRef<Path>, target: impl AsRef<Path>) -> Self {
        self.insert_symlink(path, target);
        self
    }

    /// Builder form of [`insert_other`](Self::insert_other).
    pub fn with_other(self, path: impl AsRef<Path>) -> Self {
        self.insert_other(path);
        self
    }

    /// Builder form of [`deny`](Self::deny).
    pub fn with_denied(self, path: impl AsRef<Path>) -> Self {
        self.deny(path);
        self
    }

    /// Add or replace a regular file.
    pub fn insert_file(&self, path: impl AsRef<Path>, contents: &[u8]) {
        self.insert(path.as_ref(), Node::File(contents.to_vec()));
    }

    /// Add or replace an explicit directory.
    pub fn insert_dir(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::Dir);
    }

    /// Add or replace a symlink pointing at `target`.
    pub fn insert_symlink(&self, path: impl AsRef<Path>, target: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::Symlink(target.as_ref().to_path_buf()));
    }

    /// Add or replace an entry that is neither file, directory nor symlink.
    pub fn insert_other(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::Other);
    }

    /// Make every lookup at or below `path` fail with permission denied.
    pub fn deny(&self, path: impl AsRef<Path>) {
        self.denied
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(normalize(path.as_ref()));
    }

    /// Remove an explicit entry. Implicit parent directories vanish with
    /// their last descendant.
    pub fn remove(&self, path: impl AsRef<Path>) -> Result<(), FsError> {
        let key = normalize(path.as_ref());
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key)
            .map(|_| ())
            .ok_or(FsError::NotFound { path: key })
    }

    fn insert(&self, path: &Path, node: Node) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(normalize(path), node);
    }
}

impl FsStat for MemoryFs {
    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        let key = normalize(path);
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let denied = self.denied.read().unwrap_or_else(PoisonError::into_inner);

        let mut prefix = PathBuf::new();
        for component in key.components() {
            if denied.contains(&prefix) {
                return Err(FsError::PermissionDenied {
                    path: prefix,
                    operation: "stat",
                });
            }
            if let Some(node) = entries.get(&prefix) {
                if !matches!(node, Node::Dir) {
                    return Err(FsError::NotADirectory { path: prefix });
                }
            }
            prefix.push(component);
        }
        if denied.contains(&key) {
            return Err(FsError::PermissionDenied {
                path: key,
                operation: "stat",
            });
        }

        if let Some(node) = entries.get(&key) {
            return Ok(node.metadata());
        }
        let implicit_dir = key.as_os_str().is_empty()
            || entries.keys().any(|k| k != &key && k.starts_with(&key));
        if implicit_dir {
            Ok(Metadata::new(FileType::Directory))
        } else {
            Err(FsError::NotFound { path: key })
        }
    }
}

/// Relative form of `path` with `.`, `..` and any root resolved lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => out.push(name),
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}
