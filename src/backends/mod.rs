//! # Backends
//!
//! | Backend | Storage |
//! |---------|---------|
//! | [`NativeFs`] | Host filesystem under a root directory |
//! | [`MemoryFs`] | In-memory map of path to entry, for tests and fixtures |

mod memory;
mod native;

pub use memory::MemoryFs;
pub use native::NativeFs;
