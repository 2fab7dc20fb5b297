//! # unistream
//!
//! One consistent contract over a single byte-stream handle: a file, pipe,
//! socket, standard channel or memory buffer.
//!
//! ## Overview
//!
//! unistream provides:
//! - **Lifecycle**: A stream is open until it is closed (handle released) or
//!   detached (handle handed back); both are terminal
//! - **Capabilities**: readable/writable/seekable/lockable/blocking/local
//!   answers derived from live handle metadata on every call
//! - **Advisory locking**: Exclusive/shared/unlock, blocking or not, with
//!   contention reported separately from real failures
//! - **Positioned I/O**: seek/tell/read/write/truncate/eof with preconditions
//!   checked before the OS is touched
//! - **Lines and CSV records**: `read_line`, `write_line`, `read_csv`, `write_csv`
//! - **Copying**: `copy_to_stream` with a native path for same-backend pairs
//!   and a chunked loop for everything else
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use unistream::{CsvDialect, Stream};
//!
//! fn main() -> Result<(), unistream::StreamError> {
//!     let mut stream = Stream::temp()?;
//!     stream.write_csv(&["id", "name"], &CsvDialect::default())?;
//!     stream.write_csv(&["1", "a, b"], &CsvDialect::default())?;
//!     stream.rewind()?;
//!
//!     let header = stream.read_csv(0, &CsvDialect::default())?;
//!     assert_eq!(header, ["id", "name"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `miette` - Pretty error reporting with miette
//! - `sarge` - The `unistream_cat` demo binary
//!
//! ## Error semantics
//!
//! Every failing operation returns a `StreamError`. Precondition violations
//! (`Domain`, `Length`, `Logic`, `Not*`) are raised before any OS call, so a
//! failed call has no side effects. Reaching the end of the data is never an
//! error for `read`; `read_line` and `read_csv` return an empty value only
//! when the call itself ran into the end of the data.

// Core modules
pub mod adapter;
pub mod capability;
pub mod config;
pub mod copy;
pub mod error;
mod factory;
pub mod format;
pub mod io;
pub mod lock;
pub mod metadata;
pub mod stream;

// Re-exports for convenience
pub use adapter::{StreamIo, to_io_error};
pub use capability::{Capability, MetadataSource};
pub use config::{AccessKind, CopyOptions, CsvDialect, DEFAULT_CHUNK_SIZE, OpenMode};
pub use copy::{CopyPath, copy_to_stream};
pub use error::{ErrorKind, Result, StreamError};
pub use format::DEFAULT_NEWLINE;
pub use io::{Handle, MemoryBuffer};
pub use lock::{LockMode, LockRequest};
pub use metadata::{StreamMetadata, StreamStat};
pub use stream::{Stream, Whence};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::StreamDiagnostic;

// Internal test modules (see src/tests)
#[cfg(test)]
mod tests;
