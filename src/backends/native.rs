//! Host filesystem backend.

use std::path::{Path, PathBuf};

use crate::{FsError, FsStat, Metadata};

/// The operating system's filesystem, seen from a root directory.
///
/// Relative paths are resolved against the root; an absolute path replaces
/// it, exactly as [`Path::join`] does. Lookups use
/// [`std::fs::symlink_metadata`], so a final symlink is reported rather than
/// followed, even when the path ends in a separator. Reported error paths are
/// the joined host paths.
///
/// # Example
///
/// ```rust,no_run
/// use farm_rules::{FarmExt, NativeFs};
///
/// let fs = NativeFs::new("/srv/farms");
/// if fs.is_farm("orchard")? {
///     println!("/srv/farms/orchard is a farm");
/// }
/// # Ok::<(), farm_rules::FsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NativeFs {
    root: PathBuf,
}

impl NativeFs {
    /// Create a backend rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory relative paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `path` onto the root, rebuilt from its components so a trailing
    /// separator cannot make the OS resolve a final symlink.
    fn resolve(&self, path: &Path) -> PathBuf {
        let path: PathBuf = path.components().collect();
        if path.as_os_str().is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for NativeFs {
    /// Rooted at the process's current directory.
    fn default() -> Self {
        Self::new(".")
    }
}

impl FsStat for NativeFs {
    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        let host = self.resolve(path);
        let meta = std::fs::symlink_metadata(&host)
            .map_err(|e| FsError::from_io("stat", &host, e))?;
        Ok(Metadata {
            file_type: meta.file_type().into(),
            size: meta.len(),
        })
    }
}
