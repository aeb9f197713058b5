//! # Filesystem Traits
//!
//! The farm rules only ever ask a filesystem one question: what is at this
//! path? That question is [`FsStat`].
//!
//! Any backend works, from the host filesystem ([`NativeFs`](crate::NativeFs))
//! to an in-memory map ([`MemoryFs`](crate::MemoryFs)):
//!
//! ```rust
//! use farm_rules::{FileType, FsError, FsStat, Metadata};
//! use std::path::Path;
//!
//! // A backend where everything is a directory.
//! struct AllDirs;
//!
//! impl FsStat for AllDirs {
//!     fn stat(&self, _: &Path) -> Result<Metadata, FsError> {
//!         Ok(Metadata::new(FileType::Directory))
//!     }
//! }
//!
//! fn kind_of(fs: &dyn FsStat, path: &str) -> Result<FileType, FsError> {
//!     Ok(fs.stat(Path::new(path))?.file_type)
//! }
//!
//! assert_eq!(kind_of(&AllDirs, "anything").unwrap(), FileType::Directory);
//! ```

mod fs_stat;

pub use fs_stat::FsStat;
