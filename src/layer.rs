//! # Layer Trait
//!
//! Tower-style middleware composition for filesystem backends.
//!
//! ## How It Works
//!
//! ```text
//! Backend ──▶ Layer::layer() ──▶ Wrapped Backend
//! ```
//!
//! Each middleware provides a wrapper struct that implements [`FsStat`] and a
//! [`Layer`] that builds it. [`LoggingLayer`] is the one shipped here:
//!
//! ```rust
//! use farm_rules::{FarmExt, LayerExt, LoggingLayer, MemoryFs};
//!
//! let fs = MemoryFs::new()
//!     .with_file("pasture/.farm", b"")
//!     .layer(LoggingLayer::new(log::Level::Debug));
//!
//! // Two lookups, two log records; the result is unchanged.
//! assert!(fs.is_farm("pasture").unwrap());
//! ```

use std::path::Path;

use crate::{FsError, FsStat, Metadata};

/// A layer that wraps a backend to add functionality.
///
/// Inspired by Tower's `Layer` trait: `layer(self, backend)` consumes both
/// the configuration and the backend.
pub trait Layer<B> {
    /// The resulting backend type after applying this layer.
    type Backend;

    /// Wrap the given backend with this layer's functionality.
    fn layer(self, backend: B) -> Self::Backend;
}

/// Extension trait for fluent layer composition.
///
/// ```rust
/// use farm_rules::{FsStat, Layer, LayerExt};
///
/// fn compose_backend<B: FsStat, L: Layer<B>>(backend: B, layer: L) -> L::Backend {
///     backend.layer(layer)
/// }
/// ```
pub trait LayerExt: FsStat + Sized {
    /// Apply a layer to this backend.
    fn layer<L: Layer<Self>>(self, layer: L) -> L::Backend {
        layer.layer(self)
    }
}

impl<B: FsStat> LayerExt for B {}

/// Layer that logs every lookup through the [`log`] facade.
#[derive(Debug, Clone, Copy)]
pub struct LoggingLayer {
    level: log::Level,
}

impl LoggingLayer {
    /// Log lookups at `level`.
    pub const fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingLayer {
    fn default() -> Self {
        Self::new(log::Level::Trace)
    }
}

impl<B: FsStat> Layer<B> for LoggingLayer {
    type Backend = LoggingFs<B>;

    fn layer(self, backend: B) -> Self::Backend {
        LoggingFs {
            inner: backend,
            level: self.level,
        }
    }
}

/// Backend wrapper produced by [`LoggingLayer`].
#[derive(Debug)]
pub struct LoggingFs<B> {
    inner: B,
    level: log::Level,
}

impl<B> LoggingFs<B> {
    /// The wrapped backend.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Unwrap, returning the inner backend.
    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: FsStat> FsStat for LoggingFs<B> {
    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        let result = self.inner.stat(path);
        match &result {
            Ok(meta) => log::log!(
                self.level,
                "stat {}: {:?}, {} bytes",
                path.display(),
                meta.file_type,
                meta.size
            ),
            Err(e) => log::log!(self.level, "stat {}: {e}", path.display()),
        }
        result
    }
}
