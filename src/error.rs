//! Error types for filesystem lookups and farm validation.

use std::io;
use std::path::{Path, PathBuf};

/// Failure of a single metadata lookup.
///
/// Backends report a missing entry as [`FsError::NotFound`]; every other
/// variant is a failure the farm rules pass through untouched.
///
/// # Examples
///
/// ```rust
/// use farm_rules::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound { path: PathBuf::from("/missing") };
/// assert!(err.to_string().contains("/missing"));
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Path does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A path component that must be traversed is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The component that is not a directory.
        path: PathBuf,
    },

    /// Permission denied for operation.
    #[error("{operation}: permission denied: {path}")]
    PermissionDenied {
        /// The path where permission was denied.
        path: PathBuf,
        /// The operation that was denied.
        operation: &'static str,
    },

    /// Generic backend error.
    #[error("backend error: {0}")]
    Backend(String),

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Converts an I/O error raised by `operation` on `path`, keeping the path.
    pub fn from_io(operation: &'static str, path: &Path, error: io::Error) -> Self {
        let path = path.to_path_buf();
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path },
            io::ErrorKind::NotADirectory => FsError::NotADirectory { path },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path, operation },
            _ => FsError::Io {
                operation,
                path,
                source: error,
            },
        }
    }

    /// Returns `true` if this is [`FsError::NotFound`].
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }

    /// The closest matching standard I/O error kind.
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            FsError::NotFound { .. } => io::ErrorKind::NotFound,
            FsError::NotADirectory { .. } => io::ErrorKind::NotADirectory,
            FsError::PermissionDenied { .. } => io::ErrorKind::PermissionDenied,
            FsError::Backend(_) => io::ErrorKind::Other,
            FsError::Io { source, .. } => source.kind(),
        }
    }
}

impl From<io::Error> for FsError {
    fn from(error: io::Error) -> Self {
        FsError::from_io("io", Path::new(""), error)
    }
}

impl From<FsError> for io::Error {
    fn from(error: FsError) -> Self {
        match error {
            FsError::Io { source, .. } => source,
            other => io::Error::new(other.io_kind(), other),
        }
    }
}

/// Specific reason a path was rejected as a farm directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FarmErrorKind {
    /// The path does not exist.
    NotExist,
    /// The path exists but is not a directory.
    NotDir,
    /// The directory has no `.farm` entry.
    NoFarmFile,
    /// The `.farm` entry is not a regular file.
    FarmFileNotRegular,
}

impl FarmErrorKind {
    /// The primary condition this kind belongs to, used for I/O mapping.
    pub const fn family(self) -> ErrorFamily {
        match self {
            FarmErrorKind::NotExist | FarmErrorKind::NoFarmFile => ErrorFamily::NotExist,
            FarmErrorKind::NotDir | FarmErrorKind::FarmFileNotRegular => ErrorFamily::Invalid,
        }
    }

    /// Returns `true` if this kind belongs to `family`.
    ///
    /// [`NoFarmFile`](Self::NoFarmFile) belongs to both families: the marker
    /// is missing, and the directory is invalid as a farm.
    pub const fn in_family(self, family: ErrorFamily) -> bool {
        matches!(
            (self, family),
            (
                FarmErrorKind::NotExist | FarmErrorKind::NoFarmFile,
                ErrorFamily::NotExist
            ) | (
                FarmErrorKind::NotDir
                    | FarmErrorKind::NoFarmFile
                    | FarmErrorKind::FarmFileNotRegular,
                ErrorFamily::Invalid
            )
        )
    }
}

/// General filesystem condition shared by several [`FarmErrorKind`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorFamily {
    /// An entry that had to exist does not.
    NotExist,
    /// An entry exists but has the wrong kind for this check.
    Invalid,
}

impl ErrorFamily {
    /// The standard I/O error kind for this condition.
    pub const fn io_kind(self) -> io::ErrorKind {
        match self {
            ErrorFamily::NotExist => io::ErrorKind::NotFound,
            ErrorFamily::Invalid => io::ErrorKind::InvalidInput,
        }
    }
}

/// Reason [`check_is_farm`](crate::check_is_farm) rejected a path.
///
/// Classify with [`kind`](Self::kind) for the specific reason or
/// [`in_family`](Self::in_family) for the general condition. Lookup failures
/// other than "not found" come back as [`FarmError::Lookup`] with neither.
///
/// ```rust
/// use farm_rules::{ErrorFamily, FarmError, FarmErrorKind};
/// use std::path::PathBuf;
///
/// let err = FarmError::NoFarmFile { path: PathBuf::from("crops/.farm") };
/// assert!(err.is(FarmErrorKind::NoFarmFile));
/// assert_eq!(err.family(), Some(ErrorFamily::NotExist));
/// assert!(err.is_not_exist());
/// assert!(err.is_invalid());
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FarmError {
    /// The candidate path does not exist.
    #[error("farm path does not exist: {path}")]
    NotExist {
        /// The candidate path.
        path: PathBuf,
    },

    /// The candidate path is not a directory.
    #[error("farm path is not a directory: {path}")]
    NotDir {
        /// The candidate path.
        path: PathBuf,
    },

    /// The candidate directory contains no `.farm` entry.
    #[error("no .farm file: {path}")]
    NoFarmFile {
        /// Path of the missing `.farm` entry.
        path: PathBuf,
    },

    /// The `.farm` entry is a directory, symlink or other non-regular file.
    #[error(".farm is not a regular file: {path}")]
    FarmFileNotRegular {
        /// Path of the `.farm` entry.
        path: PathBuf,
    },

    /// A lookup failed for a reason other than a missing entry.
    #[error(transparent)]
    Lookup(#[from] FsError),
}

impl FarmError {
    /// The specific reason, or `None` for a propagated lookup failure.
    pub fn kind(&self) -> Option<FarmErrorKind> {
        match self {
            FarmError::NotExist { .. } => Some(FarmErrorKind::NotExist),
            FarmError::NotDir { .. } => Some(FarmErrorKind::NotDir),
            FarmError::NoFarmFile { .. } => Some(FarmErrorKind::NoFarmFile),
            FarmError::FarmFileNotRegular { .. } => Some(FarmErrorKind::FarmFileNotRegular),
            FarmError::Lookup(_) => None,
        }
    }

    /// The primary condition, or `None` for a propagated lookup failure.
    pub fn family(&self) -> Option<ErrorFamily> {
        self.kind().map(FarmErrorKind::family)
    }

    /// Returns `true` if this error belongs to `family`. A propagated lookup
    /// failure belongs to no family.
    pub fn in_family(&self, family: ErrorFamily) -> bool {
        self.kind().is_some_and(|kind| kind.in_family(family))
    }

    /// Returns `true` if this error has the given specific kind.
    pub fn is(&self, kind: FarmErrorKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Returns `true` for [`NotExist`](Self::NotExist) and
    /// [`NoFarmFile`](Self::NoFarmFile).
    pub fn is_not_exist(&self) -> bool {
        self.in_family(ErrorFamily::NotExist)
    }

    /// Returns `true` for [`NotDir`](Self::NotDir),
    /// [`NoFarmFile`](Self::NoFarmFile) and
    /// [`FarmFileNotRegular`](Self::FarmFileNotRegular).
    pub fn is_invalid(&self) -> bool {
        self.in_family(ErrorFamily::Invalid)
    }

    /// The path the error concerns.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FarmError::NotExist { path }
            | FarmError::NotDir { path }
            | FarmError::NoFarmFile { path }
            | FarmError::FarmFileNotRegular { path } => Some(path),
            FarmError::Lookup(FsError::NotFound { path })
            | FarmError::Lookup(FsError::NotADirectory { path })
            | FarmError::Lookup(FsError::PermissionDenied { path, .. })
            | FarmError::Lookup(FsError::Io { path, .. }) => Some(path),
            FarmError::Lookup(FsError::Backend(_)) => None,
        }
    }
}

impl From<FarmError> for io::Error {
    fn from(error: FarmError) -> Self {
        match error {
            FarmError::Lookup(inner) => inner.into(),
            other => {
                let kind = other
                    .family()
                    .map_or(io::ErrorKind::Other, ErrorFamily::io_kind);
                io::Error::new(kind, other)
            }
        }
    }
}
