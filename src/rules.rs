//! Farm directory validation.

use std::path::Path;

use crate::{FarmError, FileType, FsError, FsStat};

/// Name of the marker file that makes a directory a farm.
pub const FARM_FILE_NAME: &str = ".farm";

/// Checks that `path` is a directory directly containing a regular `.farm` file.
///
/// Performs at most two lookups: `path` itself, then `path/.farm`. The `.farm`
/// lookup only happens once `path` is known to be a directory, so a
/// non-directory is always reported as [`FarmError::NotDir`] no matter what
/// else is on disk. Neither lookup follows a final symlink.
///
/// The empty path and `"."` name the root of `fs`.
///
/// # Errors
///
/// - [`FarmError::NotExist`] if `path` does not exist
/// - [`FarmError::NotDir`] if `path` is a file, symlink or other non-directory
/// - [`FarmError::NoFarmFile`] if `path/.farm` does not exist
/// - [`FarmError::FarmFileNotRegular`] if `path/.farm` is not a regular file
/// - [`FarmError::Lookup`] with the backend's error, unchanged, for any other
///   lookup failure
///
/// # Example
///
/// ```rust
/// use farm_rules::{FarmErrorKind, MemoryFs, check_is_farm};
///
/// let fs = MemoryFs::new()
///     .with_file("fields/north/.farm", b"")
///     .with_dir("fields/south");
///
/// assert!(check_is_farm(&fs, "fields/north").is_ok());
///
/// let err = check_is_farm(&fs, "fields/south").unwrap_err();
/// assert!(err.is(FarmErrorKind::NoFarmFile));
/// assert!(err.is_not_exist());
/// ```
pub fn check_is_farm<F>(fs: &F, path: impl AsRef<Path>) -> Result<(), FarmError>
where
    F: FsStat + ?Sized,
{
    let path = path.as_ref();

    match fs.stat(path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(FarmError::NotDir {
                path: path.to_path_buf(),
            });
        }
        Err(FsError::NotFound { .. }) => {
            return Err(FarmError::NotExist {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    }

    let farm_file = path.join(FARM_FILE_NAME);
    match fs.stat(&farm_file) {
        Ok(meta) if meta.file_type == FileType::File => Ok(()),
        Ok(_) => Err(FarmError::FarmFileNotRegular { path: farm_file }),
        Err(FsError::NotFound { .. }) => Err(FarmError::NoFarmFile { path: farm_file }),
        Err(e) => Err(e.into()),
    }
}
