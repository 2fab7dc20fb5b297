//! Options for stream-to-stream copies.

use serde::Deserialize;

/// Default number of bytes moved per iteration of the generic copy loop.
pub const DEFAULT_CHUNK_SIZE: i64 = 1024;

/// Bounds for `copy_to_stream`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CopyOptions {
    /// Stop after this many bytes; `None` copies until the source is exhausted
    pub max_length: Option<u64>,
    /// Chunk size for the generic path, must be at least 1
    pub chunk_size: i64,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            max_length: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl CopyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of bytes copied.
    pub fn with_max_length(mut self, max_length: u64) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the generic-path chunk size.
    pub fn with_chunk_size(mut self, chunk_size: i64) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}
