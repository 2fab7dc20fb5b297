//! Stream-to-stream copies.
//!
//! Two descriptor-backed endpoints, or two memory buffers, are copied
//! natively: file pairs go through `std::io::copy` on the raw files, which
//! lets the platform use `copy_file_range`/`sendfile`. Any other pairing
//! falls back to a chunked loop over the public `read`/`write` contract.

use std::fs::File;
use std::io::{self, Read};

use crate::capability::Capability;
use crate::config::CopyOptions;
use crate::error::{Result, StreamError};
use crate::io::Handle;
use crate::stream::{OpenStream, Stream};

/// How a particular source/target pair will be copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    /// Both ends share a backend: a single native transfer
    Native,
    /// Chunked read/write loop
    Generic,
}

impl CopyPath {
    /// Pick the path for a pair of handles.
    pub fn select(source: &Handle, target: &Handle) -> Self {
        match (source, target) {
            (Handle::File { .. }, Handle::File { .. }) => CopyPath::Native,
            (Handle::Memory(_), Handle::Memory(_)) => CopyPath::Native,
            _ => CopyPath::Generic,
        }
    }
}

/// Copy from `source`'s current position to `target`'s current position.
///
/// Returns the number of bytes copied: everything left in `source`, or at
/// most `options.max_length` bytes.
pub fn copy_to_stream(
    source: &mut Stream,
    target: &mut Stream,
    options: &CopyOptions,
) -> Result<u64> {
    source.require(Capability::Readable, "copy from stream")?;
    target.require(Capability::Writable, "copy to stream")?;
    if options.chunk_size < 1 {
        return Err(StreamError::Domain(format!(
            "chunk size must be at least 1, got {}",
            options.chunk_size
        )));
    }

    let path = match (source.open_ref(), target.open_ref()) {
        (Some(src), Some(dst)) => CopyPath::select(&src.handle, &dst.handle),
        _ => CopyPath::Generic,
    };
    log::trace!("copying {source} -> {target} via {path:?} path");

    match path {
        CopyPath::Native => {
            let src = source.open_mut("copy from stream")?;
            let dst = target.open_mut("copy to stream")?;
            native_copy(src, dst, options.max_length)
                .map_err(|e| StreamError::runtime_with(format!("unable to copy stream: {e}"), e))
        }
        CopyPath::Generic => generic_copy(source, target, options).map_err(|e| {
            StreamError::runtime_with(format!("unable to copy stream: {e}"), e)
        }),
    }
}

fn native_copy(src: &mut OpenStream, dst: &mut OpenStream, max_length: Option<u64>) -> io::Result<u64> {
    let copied = match (&mut src.handle, &mut dst.handle) {
        (Handle::File { file: from, .. }, Handle::File { file: to, .. }) => {
            copy_files(from, to, max_length)?
        }
        (from, to) => match max_length {
            Some(limit) => io::copy(&mut from.take(limit), to)?,
            None => io::copy(from, to)?,
        },
    };

    if max_length.is_none_or(|limit| copied < limit) {
        src.eof = true;
    }
    src.position += copied;
    dst.position += copied;
    Ok(copied)
}

fn copy_files(from: &mut File, to: &mut File, max_length: Option<u64>) -> io::Result<u64> {
    let mut from: &File = from;
    let mut to: &File = to;
    match max_length {
        Some(limit) => io::copy(&mut from.take(limit), &mut to),
        None => io::copy(&mut from, &mut to),
    }
}

fn generic_copy(source: &mut Stream, target: &mut Stream, options: &CopyOptions) -> Result<u64> {
    let chunk = options.chunk_size as u64;
    let mut copied: u64 = 0;

    while !source.eof() && options.max_length.is_none_or(|max| copied < max) {
        let want = match options.max_length {
            Some(max) => chunk.min(max - copied),
            None => chunk,
        };
        let data = source.read(want as i64)?;
        if data.is_empty() {
            break;
        }
        copied += target.write(&data)? as u64;
    }

    Ok(copied)
}

impl Stream {
    /// Copy from this stream into `target`; see [`copy_to_stream`].
    pub fn copy_to(&mut self, target: &mut Stream, options: &CopyOptions) -> Result<u64> {
        copy_to_stream(self, target, options)
    }
}
