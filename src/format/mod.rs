//! Line and record parsing on top of the positioned I/O primitives.
//!
//! This module provides:
//! - `Stream::read_line` / `Stream::write_line`
//! - `Stream::read_csv` / `Stream::write_csv`

mod csv;
mod line;

pub use line::DEFAULT_NEWLINE;

#[cfg(test)]
pub(crate) use self::csv::{encode_record, parse_record, record_is_open};
