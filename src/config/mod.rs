//! Configuration types for stream operations.
//!
//! This module provides:
//! - `OpenMode`: fopen-style mode strings for the factory constructors
//! - `CsvDialect`: Delimiter/quote/escape triple for CSV records
//! - `CopyOptions`: Length and chunk bounds for stream-to-stream copies

mod copy;
mod csv;
mod mode;

pub use copy::{CopyOptions, DEFAULT_CHUNK_SIZE};
pub(crate) use self::csv::CsvBytes;
pub use self::csv::CsvDialect;
pub use mode::{AccessKind, OpenMode};
