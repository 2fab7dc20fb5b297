//! The stream facade: lifecycle, capability checks and positioned I/O.

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::os::fd::OwnedFd;

use crate::capability::{self, Capability, MetadataSource};
use crate::error::{Result, StreamError};
use crate::io::Handle;

/// Largest single read issued against a non-seekable handle.
const UNSEEKABLE_READ_CAP: u64 = 64 * 1024;

/// Reference point for `Stream::seek`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// From the start of the stream
    Set,
    /// From the current position
    Current,
    /// From the end of the stream
    End,
}

impl Whence {
    /// The `SEEK_*` constant for this reference point.
    pub fn as_raw(&self) -> i32 {
        match self {
            Whence::Set => libc::SEEK_SET,
            Whence::Current => libc::SEEK_CUR,
            Whence::End => libc::SEEK_END,
        }
    }
}

impl TryFrom<i32> for Whence {
    type Error = StreamError;

    fn try_from(raw: i32) -> Result<Self> {
        match raw {
            libc::SEEK_SET => Ok(Whence::Set),
            libc::SEEK_CUR => Ok(Whence::Current),
            libc::SEEK_END => Ok(Whence::End),
            other => Err(StreamError::Domain(format!(
                "whence must be one of SEEK_SET, SEEK_CUR or SEEK_END, got {other}"
            ))),
        }
    }
}

/// State of an open stream.
#[derive(Debug)]
pub(crate) struct OpenStream {
    pub(crate) handle: Handle,
    /// Set once a read ran into the end of the data, cleared by seeking
    pub(crate) eof: bool,
    /// Bytes consumed or produced; serves `tell` on unseekable handles
    pub(crate) position: u64,
}

impl OpenStream {
    /// Read up to `len` bytes. Seekable handles are drained until `len` or
    /// end of data; other handles get a single read.
    pub(crate) fn read_up_to(&mut self, len: u64, seekable: bool) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        if seekable {
            (&mut self.handle).take(len).read_to_end(&mut out)?;
            if (out.len() as u64) < len {
                self.eof = true;
            }
        } else {
            out.resize(len.min(UNSEEKABLE_READ_CAP) as usize, 0);
            let (n, would_block) = loop {
                match self.handle.read(&mut out) {
                    Ok(n) => break (n, false),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) if e.kind() == io::ErrorKind::WouldBlock => break (0, true),
                    Err(e) => return Err(e),
                }
            };
            out.truncate(n);
            if n == 0 && !would_block {
                self.eof = true;
            }
        }
        self.position += out.len() as u64;
        Ok(out)
    }

    /// Write as much of `data` as the handle accepts.
    pub(crate) fn write_bytes(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < data.len() {
            match self.handle.write(&data[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(_) if written > 0 => break,
                Err(e) => return Err(e),
            }
        }
        self.position += written as u64;
        Ok(written)
    }

    pub(crate) fn read_to_end(&mut self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        self.handle.read_to_end(&mut out)?;
        self.position += out.len() as u64;
        self.eof = true;
        Ok(out)
    }

    /// Release the handle, dropping any advisory lock first.
    fn release(self) {
        if self.handle.lockable() {
            if let Err(e) = self.handle.flock(libc::LOCK_UN) {
                log::warn!("best-effort unlock on close failed: {e}");
            }
        }
        drop(self.handle);
    }
}

#[derive(Debug)]
enum State {
    Open(OpenStream),
    Closed,
    Detached,
}

/// A stream over exactly one exclusively owned native handle.
///
/// The stream starts out open and ends either closed (handle released) or
/// detached (handle handed back to the caller). Neither terminal state can
/// be left again. Capabilities are asked of the handle on every call.
#[derive(Debug)]
pub struct Stream {
    state: State,
}

pub(crate) fn non_negative(value: i64, what: &str) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| StreamError::Domain(format!("{what} must be non-negative, got {value}")))
}

impl Stream {
    /// Wrap a native handle.
    ///
    /// Fails with `InvalidArgument` for closed descriptors and directories.
    pub fn new(handle: impl Into<Handle>) -> Result<Self> {
        let handle = handle.into();
        handle.validate()?;
        let stream = Self {
            state: State::Open(OpenStream {
                handle,
                eof: false,
                position: 0,
            }),
        };
        log::debug!("opened {stream}");
        Ok(stream)
    }

    pub(crate) fn open_ref(&self) -> Option<&OpenStream> {
        match &self.state {
            State::Open(open) => Some(open),
            State::Closed | State::Detached => None,
        }
    }

    pub(crate) fn open_mut(&mut self, op: &str) -> Result<&mut OpenStream> {
        match &mut self.state {
            State::Open(open) => Ok(open),
            State::Closed => Err(StreamError::runtime(format!("cannot {op}: stream is closed"))),
            State::Detached => Err(StreamError::runtime(format!(
                "cannot {op}: stream is detached"
            ))),
        }
    }

    fn source(&self) -> Option<&dyn MetadataSource> {
        self.open_ref().map(|open| &open.handle as &dyn MetadataSource)
    }

    /// Fail with the matching capability error unless the stream is open
    /// and has `capability`.
    pub(crate) fn require(&self, capability: Capability, op: &str) -> Result<()> {
        let diagnosis = match &self.state {
            State::Open(open) => {
                if capability::derive(capability, Some(&open.handle)) {
                    return Ok(());
                }
                format!(
                    "cannot {op}: {} is not {capability}",
                    describe(&open.handle)
                )
            }
            State::Closed => format!("cannot {op}: stream is closed"),
            State::Detached => format!("cannot {op}: stream is detached"),
        };

        Err(match capability {
            Capability::Readable => StreamError::NotReadable(diagnosis),
            Capability::Writable => StreamError::NotWritable(diagnosis),
            Capability::Seekable => StreamError::NotSeekable(diagnosis),
            Capability::Lockable => StreamError::NotLockable(diagnosis),
            _ => StreamError::Logic(diagnosis),
        })
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    pub fn is_detached(&self) -> bool {
        matches!(self.state, State::Detached)
    }

    /// Answer a capability query against the live handle.
    pub fn has(&self, capability: Capability) -> bool {
        capability::derive(capability, self.source())
    }

    pub fn is_readable(&self) -> bool {
        self.has(Capability::Readable)
    }

    pub fn is_writable(&self) -> bool {
        self.has(Capability::Writable)
    }

    pub fn is_seekable(&self) -> bool {
        self.has(Capability::Seekable)
    }

    pub fn is_lockable(&self) -> bool {
        self.has(Capability::Lockable)
    }

    pub fn is_blocking(&self) -> bool {
        self.has(Capability::Blocking)
    }

    pub fn is_local(&self) -> bool {
        self.has(Capability::Local)
    }

    pub fn is_remote(&self) -> bool {
        self.has(Capability::Remote)
    }

    pub fn mode(&self) -> Option<String> {
        self.source().and_then(|s| s.mode())
    }

    pub fn uri(&self) -> Option<&str> {
        self.open_ref().and_then(|open| open.handle.uri())
    }

    pub fn stream_type(&self) -> Option<&'static str> {
        self.open_ref().map(|open| open.handle.stream_type())
    }

    /// Move the position. `whence` is checked before seekability.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<()> {
        self.require(Capability::Seekable, "seek")?;
        let open = self.open_mut("seek")?;

        let target = match whence {
            Whence::Set => SeekFrom::Start(u64::try_from(offset).map_err(|_| {
                StreamError::runtime(format!("unable to seek to negative offset {offset}"))
            })?),
            Whence::Current => SeekFrom::Current(offset),
            Whence::End => SeekFrom::End(offset),
        };

        let position = open
            .handle
            .seek(target)
            .map_err(|e| StreamError::os(format_args!("seek to {offset} ({whence:?})"), e))?;
        open.position = position;
        open.eof = false;
        Ok(())
    }

    /// `seek` taking a raw `SEEK_*` value; unknown values are `Domain` errors.
    pub fn seek_raw(&mut self, offset: i64, whence: i32) -> Result<()> {
        let whence = Whence::try_from(whence)?;
        self.seek(offset, whence)
    }

    pub fn rewind(&mut self) -> Result<()> {
        self.seek(0, Whence::Set)
    }

    pub fn fast_forward(&mut self) -> Result<()> {
        self.seek(0, Whence::End)
    }

    /// Current byte offset, `None` when the stream is closed or detached.
    pub fn tell(&self) -> Result<Option<u64>> {
        let Some(open) = self.open_ref() else {
            return Ok(None);
        };
        if !open.handle.seekable() {
            return Ok(Some(open.position));
        }
        open.handle
            .position()
            .map(Some)
            .map_err(|e| StreamError::os("tell", e))
    }

    /// Read up to `length` bytes. An empty result at end of data is not an error.
    pub fn read(&mut self, length: i64) -> Result<Vec<u8>> {
        let length = non_negative(length, "read length")?;
        self.require(Capability::Readable, "read")?;
        if length == 0 {
            return Ok(Vec::new());
        }
        let seekable = self.is_seekable();
        let open = self.open_mut("read")?;
        open.read_up_to(length, seekable)
            .map_err(|e| StreamError::os(format_args!("read of {length} bytes"), e))
    }

    /// Write `data`, returning how many bytes the handle accepted.
    pub fn write(&mut self, data: impl AsRef<[u8]>) -> Result<usize> {
        let data = data.as_ref();
        self.require(Capability::Writable, "write")?;
        let open = self.open_mut("write")?;
        open.write_bytes(data)
            .map_err(|e| StreamError::os(format_args!("write of {} bytes", data.len()), e))
    }

    /// Cut or extend the data to `length` bytes. Extension pads with zeros;
    /// the position is left alone and eof is cleared.
    pub fn truncate(&mut self, length: i64) -> Result<()> {
        let length = non_negative(length, "truncate length")?;
        self.require(Capability::Writable, "truncate")?;
        let open = self.open_mut("truncate")?;
        open.handle
            .set_len(length)
            .map_err(|e| StreamError::os(format_args!("truncate to {length} bytes"), e))?;
        open.eof = false;
        Ok(())
    }

    /// End-of-data indicator. Only meaningful after a read; closed streams
    /// always report `true`.
    pub fn eof(&self) -> bool {
        self.open_ref().is_none_or(|open| open.eof)
    }

    pub fn set_blocking(&mut self, blocking: bool) -> Result<()> {
        let open = self.open_mut("set blocking mode")?;
        open.handle
            .set_blocking(blocking)
            .map_err(|e| StreamError::os(format_args!("set_blocking({blocking})"), e))
    }

    pub fn flush(&mut self) -> Result<()> {
        let open = self.open_mut("flush")?;
        open.handle.flush().map_err(|e| StreamError::os("flush", e))
    }

    /// Everything from the current position to the end of the data.
    pub fn contents(&mut self) -> Result<Vec<u8>> {
        self.require(Capability::Readable, "read contents")?;
        let open = self.open_mut("read contents")?;
        open.read_to_end()
            .map_err(|e| StreamError::os("read to end", e))
    }

    /// The whole stream as text, rewinding first when possible.
    ///
    /// Never fails: any error, or a closed stream, yields an empty string.
    pub fn to_string_lossy(&mut self) -> String {
        if !self.is_readable() {
            return String::new();
        }
        if self.is_seekable() {
            if let Err(e) = self.rewind() {
                log::debug!("to_string_lossy: rewind failed: {e}");
                return String::new();
            }
        }
        match self.contents() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                log::debug!("to_string_lossy: read failed: {e}");
                String::new()
            }
        }
    }

    /// Release the handle. Idempotent; a held advisory lock is dropped first
    /// on a best-effort basis and failures are only logged.
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        log::debug!("closing {self}");
        if let State::Open(open) = std::mem::replace(&mut self.state, State::Closed) {
            open.release();
        }
    }

    /// Give up ownership of the handle without closing it.
    ///
    /// Returns `None` if the stream is already closed or detached.
    pub fn detach(&mut self) -> Option<Handle> {
        if !self.is_open() {
            return None;
        }
        log::debug!("detaching {self}");
        match std::mem::replace(&mut self.state, State::Detached) {
            State::Open(open) => Some(open.handle),
            State::Closed | State::Detached => None,
        }
    }
}

fn describe(handle: &Handle) -> String {
    let mode = handle.mode().unwrap_or_else(|| "?".into());
    match handle.uri() {
        Some(uri) => format!(
            "{} stream '{uri}' opened with mode '{mode}'",
            handle.stream_type()
        ),
        None => format!("{} stream opened with mode '{mode}'", handle.stream_type()),
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Open(open) => write!(
                f,
                "Stream(type={}, uri={}, mode={})",
                open.handle.stream_type(),
                open.handle.uri().unwrap_or("-"),
                open.handle.mode().as_deref().unwrap_or("?"),
            ),
            State::Closed => write!(f, "Stream(closed)"),
            State::Detached => write!(f, "Stream(detached)"),
        }
    }
}

impl Drop for Stream {
    fn drop(&mut self) {
        self.close();
    }
}

impl TryFrom<File> for Stream {
    type Error = StreamError;

    fn try_from(file: File) -> Result<Self> {
        Stream::new(file)
    }
}

impl TryFrom<OwnedFd> for Stream {
    type Error = StreamError;

    fn try_from(fd: OwnedFd) -> Result<Self> {
        Stream::new(fd)
    }
}
