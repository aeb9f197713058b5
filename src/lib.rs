//! # farm-rules
//!
//! Validation rules for **farm directories**: directories that directly
//! contain a regular file named `.farm`.
//!
//! The rules run against any filesystem that can answer one stat-like
//! question ([`FsStat`]), so the same check works on the host filesystem and
//! on an in-memory fixture.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use farm_rules::{FarmErrorKind, MemoryFs, check_is_farm};
//!
//! let fs = MemoryFs::new()
//!     .with_file("path/to/dir-with-farm-file/.farm", b"")
//!     .with_dir("path/to/dir-with-no-farm-file")
//!     .with_file("path/to/file", b"");
//!
//! assert!(check_is_farm(&fs, "path/to/dir-with-farm-file").is_ok());
//!
//! let err = check_is_farm(&fs, "path/to/dir-with-no-farm-file").unwrap_err();
//! assert!(err.is(FarmErrorKind::NoFarmFile));
//!
//! let err = check_is_farm(&fs, "path/to/file").unwrap_err();
//! assert!(err.is(FarmErrorKind::NotDir));
//! assert!(err.is_invalid());
//! ```
//!
//! On the host filesystem, use [`NativeFs`].
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`check_is_farm`] | The farm directory check |
//! | [`FarmError`] | Why a path is not a farm, with context |
//! | [`FarmErrorKind`] / [`ErrorFamily`] | Specific and general classification |
//! | [`FsStat`] | The filesystem capability the check needs |
//! | [`FsError`] | Lookup failure reported by a backend |
//! | [`Metadata`] / [`FileType`] | Result of a lookup |
//! | [`NativeFs`] / [`MemoryFs`] | Backends |
//! | [`FarmExt`] | `check_is_farm` / `is_farm` as methods on any backend |
//! | [`Layer`] / [`LoggingLayer`] | Middleware around backends |
//!
//! ---
//!
//! ## Error Handling
//!
//! Rejections fall into two general families:
//!
//! | [`FarmErrorKind`] | [`ErrorFamily`] |
//! |-------------------|-----------------|
//! | `NotExist` | `NotExist` |
//! | `NoFarmFile` | `NotExist` and `Invalid` |
//! | `NotDir` | `Invalid` |
//! | `FarmFileNotRegular` | `Invalid` |
//!
//! [`FarmErrorKind::family`] picks the primary family (`NotExist` for
//! `NoFarmFile`), which decides the [`std::io::ErrorKind`].
//!
//! Any other lookup failure is returned unchanged as [`FarmError::Lookup`].
//! Both error types convert into [`std::io::Error`] with a matching
//! [`std::io::ErrorKind`].
//!
//! ---
//!
//! ## Thread Safety
//!
//! [`FsStat`] requires `Send + Sync` and takes `&self`. The check holds no
//! state and takes no locks; the two lookups are not atomic with respect to
//! concurrent changes.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Enable serialization for [`Metadata`], [`FileType`], [`FarmErrorKind`], [`ErrorFamily`] |

// Private modules
mod backends;
mod error;
mod ext;
mod layer;
mod rules;
mod traits;
mod types;

// Public re-exports - error types
pub use error::{ErrorFamily, FarmError, FarmErrorKind, FsError};

// Public re-exports - core types
pub use types::{FileType, Metadata};

// Public re-exports - filesystem abstraction
pub use traits::FsStat;

// Public re-exports - rules
pub use rules::{FARM_FILE_NAME, check_is_farm};

// Public re-exports - backends
pub use backends::{MemoryFs, NativeFs};

// Public re-exports - infrastructure
pub use ext::FarmExt;
pub use layer::{Layer, LayerExt, LoggingFs, LoggingLayer};
