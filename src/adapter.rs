//! `std::io` view of a stream.
//!
//! `StreamIo` lets a `Stream` be handed to anything expecting `Read`,
//! `Write` or `Seek`. Every `StreamError` becomes an `io::Error` whose inner
//! error is the original, so the message and the cause chain survive.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::error::{ErrorKind, StreamError};
use crate::stream::{Stream, Whence};

/// Map a stream error onto `io::Error`, keeping it as the inner error.
pub fn to_io_error(err: StreamError) -> io::Error {
    let kind = match err.kind() {
        _ if err.would_block() => io::ErrorKind::WouldBlock,
        ErrorKind::Domain | ErrorKind::Length | ErrorKind::Logic => io::ErrorKind::InvalidInput,
        ErrorKind::InvalidArgument => io::ErrorKind::InvalidInput,
        ErrorKind::NotReadable
        | ErrorKind::NotWritable
        | ErrorKind::NotSeekable
        | ErrorKind::NotLockable => io::ErrorKind::Unsupported,
        ErrorKind::Runtime => io::ErrorKind::Other,
    };
    io::Error::new(kind, err)
}

/// Borrowed `Read + Write + Seek` adapter over a `Stream`.
#[derive(Debug)]
pub struct StreamIo<'a> {
    stream: &'a mut Stream,
}

impl<'a> StreamIo<'a> {
    pub fn new(stream: &'a mut Stream) -> Self {
        Self { stream }
    }

    pub fn get_ref(&self) -> &Stream {
        self.stream
    }

    pub fn get_mut(&mut self) -> &mut Stream {
        self.stream
    }
}

fn to_length(len: usize) -> io::Result<i64> {
    i64::try_from(len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "buffer length exceeds i64::MAX"))
}

impl Read for StreamIo<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let data = self.stream.read(to_length(buf.len())?).map_err(to_io_error)?;
        buf[..data.len()].copy_from_slice(&data);
        Ok(data.len())
    }
}

impl Write for StreamIo<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf).map_err(to_io_error)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush().map_err(to_io_error)
    }
}

impl Seek for StreamIo<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(n) => {
                let offset = i64::try_from(n).map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("seek offset {n} does not fit in i64"),
                    )
                })?;
                (offset, Whence::Set)
            }
            SeekFrom::Current(n) => (n, Whence::Current),
            SeekFrom::End(n) => (n, Whence::End),
        };
        self.stream.seek(offset, whence).map_err(to_io_error)?;
        self.stream
            .tell()
            .map_err(to_io_error)?
            .ok_or_else(|| io::Error::other("stream closed during seek"))
    }
}

impl Stream {
    /// Borrow this stream as a `std::io` reader/writer/seeker.
    pub fn as_io(&mut self) -> StreamIo<'_> {
        StreamIo::new(self)
    }
}
