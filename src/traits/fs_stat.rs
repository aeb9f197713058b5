//! Metadata lookup for filesystem backends.

use std::path::Path;

use crate::{FsError, Metadata};

/// Stat-like metadata lookup.
///
/// This is the only capability the farm rules need from a filesystem.
///
/// # Symlinks
///
/// `stat` must not follow a symlink in the final path component: a symlink is
/// reported as [`FileType::Symlink`](crate::FileType::Symlink), the way
/// `lstat(2)` reports it.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsStat`.
pub trait FsStat: Send + Sync {
    /// Get metadata for a path without following a final symlink.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotADirectory`] if an intermediate component is not a directory
    /// - [`FsError::PermissionDenied`] if the lookup is not allowed
    fn stat(&self, path: &Path) -> Result<Metadata, FsError>;
}

impl<T: FsStat + ?Sized> FsStat for &T {
    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        (**self).stat(path)
    }
}

impl<T: FsStat + ?Sized> FsStat for Box<T> {
    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        (**self).stat(path)
    }
}

impl<T: FsStat + ?Sized> FsStat for std::sync::Arc<T> {
    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        (**self).stat(path)
    }
}
