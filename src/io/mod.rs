//! Platform layer under the stream facade.
//!
//! This module provides:
//! - `Handle`: The owned native resource (descriptor-backed file or memory buffer)
//! - `MemoryBuffer`: In-process backend with optional spill-over to a temp file
//! - `sys`: The libc calls std does not cover (flock, fcntl status flags)

mod handle;
mod memory;
pub(crate) mod sys;

pub use handle::Handle;
pub use memory::MemoryBuffer;
