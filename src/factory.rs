//! Constructors for the common kinds of streams.

use std::fs::File;
use std::io;
use std::os::fd::AsFd;
use std::path::Path;

use crate::config::OpenMode;
use crate::error::{Result, StreamError};
use crate::io::{Handle, MemoryBuffer};
use crate::stream::{Stream, non_negative};

impl Stream {
    /// Open `path` with an fopen-style mode string (`"r"`, `"w+"`, `"a"`, ...).
    pub fn open(path: impl AsRef<Path>, mode: &str) -> Result<Self> {
        let path = path.as_ref();
        let mode = OpenMode::parse(mode)?;
        let file = mode.to_open_options().open(path).map_err(|e| {
            StreamError::os(
                format_args!("open '{}' with mode '{mode}'", path.display()),
                e,
            )
        })?;
        Stream::new(Handle::file(file, Some(path.to_string_lossy().into_owned())))
    }

    /// An anonymous read/write temp file, removed once closed.
    pub fn temp() -> Result<Self> {
        let file = tempfile::tempfile().map_err(|e| StreamError::os("create temp file", e))?;
        Stream::new(Handle::file(file, Some("temp".into())))
    }

    /// A read/write memory buffer that moves to a temp file once it grows
    /// past `max_memory` bytes.
    pub fn temp_with_limit(max_memory: i64) -> Result<Self> {
        let limit = non_negative(max_memory, "memory limit")?;
        Stream::new(MemoryBuffer::new().with_spill_limit(limit))
    }

    /// An empty read/write memory buffer.
    pub fn memory() -> Result<Self> {
        Stream::new(MemoryBuffer::new())
    }

    /// A read/write memory buffer holding `bytes`, positioned at the start.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Stream::new(MemoryBuffer::from_bytes(bytes, OpenMode::READ_WRITE))
    }

    /// A memory buffer holding `bytes` with an explicit mode.
    pub fn from_bytes_with_mode(bytes: impl Into<Vec<u8>>, mode: &str) -> Result<Self> {
        let mode = OpenMode::parse(mode)?;
        Stream::new(MemoryBuffer::from_bytes(bytes, mode))
    }

    /// A duplicate of the process's standard input.
    pub fn stdin() -> Result<Self> {
        std_channel(io::stdin().as_fd().try_clone_to_owned(), "stdin")
    }

    /// A duplicate of the process's standard output.
    pub fn stdout() -> Result<Self> {
        std_channel(io::stdout().as_fd().try_clone_to_owned(), "stdout")
    }

    /// A duplicate of the process's standard error.
    pub fn stderr() -> Result<Self> {
        std_channel(io::stderr().as_fd().try_clone_to_owned(), "stderr")
    }
}

fn std_channel(fd: io::Result<std::os::fd::OwnedFd>, name: &str) -> Result<Stream> {
    let fd = fd.map_err(|e| StreamError::os(format_args!("duplicate {name}"), e))?;
    Stream::new(Handle::file(File::from(fd), Some(name.to_owned())))
}
