//! Entry metadata returned by filesystem lookups.

/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link (never followed by a lookup).
    Symlink,
    /// Anything else: sockets, FIFOs, device nodes.
    Other,
}

/// Metadata for a single entry, produced by [`FsStat::stat`](crate::FsStat::stat).
///
/// A lookup result is a snapshot; nothing keeps it in sync with the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Kind of the entry.
    pub file_type: FileType,
    /// Size in bytes. For symlinks this is the length of the target path.
    pub size: u64,
}

impl Metadata {
    /// Metadata for an entry of the given kind with zero size.
    #[inline]
    pub const fn new(file_type: FileType) -> Self {
        Self { file_type, size: 0 }
    }

    /// Returns `true` if this is a regular file.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    /// Returns `true` if this is a directory.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// Returns `true` if this is a symbolic link.
    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::Symlink
    }
}

impl From<std::fs::FileType> for FileType {
    fn from(ft: std::fs::FileType) -> Self {
        if ft.is_symlink() {
            FileType::Symlink
        } else if ft.is_dir() {
            FileType::Directory
        } else if ft.is_file() {
            FileType::File
        } else {
            FileType::Other
        }
    }
}
