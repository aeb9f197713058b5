//! # Extension Traits
//!
//! [`FarmExt`] puts the farm rules on every [`FsStat`] backend as methods.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`check_is_farm`](FarmExt::check_is_farm) | Classified check, see [`check_is_farm`](crate::check_is_farm) |
//! | [`is_farm`](FarmExt::is_farm) | Yes/no answer, errors only on lookup failures |

use crate::{FarmError, FsError, FsStat};
use std::path::Path;

/// Farm validation methods for any filesystem backend.
///
/// # Example
///
/// ```rust
/// use farm_rules::{FarmExt, MemoryFs};
///
/// let fs = MemoryFs::new().with_file("barn/.farm", b"");
/// assert!(fs.is_farm("barn").unwrap());
/// assert!(!fs.is_farm("silo").unwrap());
/// ```
pub trait FarmExt: FsStat {
    /// Method form of [`check_is_farm`](crate::check_is_farm).
    fn check_is_farm(&self, path: impl AsRef<Path>) -> Result<(), FarmError> {
        crate::check_is_farm(self, path)
    }

    /// Check if the path is a farm directory.
    ///
    /// Returns `Ok(false)` for every rejection [`check_is_farm`](crate::check_is_farm)
    /// classifies (missing, not a directory, no or bad `.farm`).
    /// Returns `Err` only for lookup failures such as permission denied.
    fn is_farm(&self, path: impl AsRef<Path>) -> Result<bool, FsError> {
        match crate::check_is_farm(self, path) {
            Ok(()) => Ok(true),
            Err(FarmError::Lookup(e)) => Err(e),
            Err(_) => Ok(false),
        }
    }
}

impl<B: FsStat + ?Sized> FarmExt for B {}
