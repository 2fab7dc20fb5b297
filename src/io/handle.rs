//! The native resource a `Stream` owns.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::os::fd::{AsFd, OwnedFd};
use std::os::unix::fs::FileTypeExt;

use super::memory::MemoryBuffer;
use super::sys;
use crate::capability::MetadataSource;
use crate::error::StreamError;
use crate::metadata::StreamStat;

/// An underlying stream resource.
///
/// `File` covers everything backed by a file descriptor: regular files,
/// pipes, sockets, terminals and duplicated standard channels.
#[derive(Debug)]
pub enum Handle {
    File {
        file: File,
        /// Path or channel name for diagnostics
        uri: Option<String>,
    },
    Memory(MemoryBuffer),
}

impl Handle {
    /// Wrap a file with an optional diagnostic uri.
    pub fn file(file: File, uri: Option<String>) -> Self {
        Handle::File { file, uri }
    }

    /// Check that this is something a stream can be built on.
    pub(crate) fn validate(&self) -> Result<(), StreamError> {
        let Handle::File { file, .. } = self else {
            return Ok(());
        };
        sys::status_flags(file.as_fd())
            .map_err(|e| StreamError::InvalidArgument(format!("descriptor is not open: {e}")))?;
        let meta = file
            .metadata()
            .map_err(|e| StreamError::InvalidArgument(format!("descriptor cannot be inspected: {e}")))?;
        if meta.is_dir() {
            return Err(StreamError::InvalidArgument(
                "a directory is not a stream".into(),
            ));
        }
        Ok(())
    }

    pub fn uri(&self) -> Option<&str> {
        match self {
            Handle::File { uri, .. } => uri.as_deref(),
            Handle::Memory(buf) if buf.spill_limit().is_some() => Some("temp"),
            Handle::Memory(_) => Some("memory"),
        }
    }

    /// Kind of resource, e.g. `"file"`, `"pipe"` or `"memory"`.
    pub fn stream_type(&self) -> &'static str {
        let Handle::File { file, .. } = self else {
            return "memory";
        };
        let Ok(meta) = file.metadata() else {
            return "unknown";
        };
        let ft = meta.file_type();
        if ft.is_file() {
            "file"
        } else if ft.is_fifo() {
            "pipe"
        } else if ft.is_socket() {
            "socket"
        } else if ft.is_char_device() {
            "char-device"
        } else if ft.is_block_device() {
            "block-device"
        } else {
            "unknown"
        }
    }

    pub fn wrapper_type(&self) -> &'static str {
        match self {
            Handle::File { .. } => "plainfile",
            Handle::Memory(_) => "memory",
        }
    }

    /// Hand back the file, if this handle is descriptor-backed.
    pub fn into_file(self) -> Option<File> {
        match self {
            Handle::File { file, .. } => Some(file),
            Handle::Memory(_) => None,
        }
    }

    pub(crate) fn stat(&self) -> io::Result<StreamStat> {
        match self {
            Handle::File { file, .. } => Ok(StreamStat::from(&file.metadata()?)),
            Handle::Memory(buf) => Ok(StreamStat::for_memory(buf.len())),
        }
    }

    /// Current offset as reported by the OS (or the buffer cursor).
    pub(crate) fn position(&self) -> io::Result<u64> {
        match self {
            Handle::File { file, .. } => {
                let mut f: &File = file;
                f.stream_position()
            }
            Handle::Memory(buf) => Ok(buf.position()),
        }
    }

    pub(crate) fn set_len(&mut self, len: u64) -> io::Result<()> {
        match self {
            Handle::File { file, .. } => file.set_len(len),
            Handle::Memory(buf) => buf.set_len(len),
        }
    }

    pub(crate) fn set_blocking(&mut self, blocking: bool) -> io::Result<()> {
        match self {
            Handle::File { file, .. } => sys::set_nonblocking(file.as_fd(), !blocking),
            Handle::Memory(_) if blocking => Ok(()),
            Handle::Memory(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "memory streams are always blocking",
            )),
        }
    }

    pub(crate) fn flock(&self, operation: libc::c_int) -> io::Result<()> {
        match self {
            Handle::File { file, .. } => sys::flock(file.as_fd(), operation),
            Handle::Memory(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "memory streams cannot be locked",
            )),
        }
    }

    /// Move a memory buffer into a temp file when the next write would
    /// cross its spill limit.
    fn spill_if_needed(&mut self, incoming: usize) -> io::Result<()> {
        let Handle::Memory(buf) = self else {
            return Ok(());
        };
        if !buf.needs_spill(incoming) {
            return Ok(());
        }
        let file = buf.spill()?;
        log::trace!(
            "memory stream spilled to temp file at {} bytes (limit {:?})",
            buf.len(),
            buf.spill_limit()
        );
        *self = Handle::File {
            file,
            uri: Some("temp".into()),
        };
        Ok(())
    }
}

impl MetadataSource for Handle {
    fn mode(&self) -> Option<String> {
        match self {
            Handle::File { file, .. } => sys::status_flags(file.as_fd())
                .ok()
                .and_then(sys::mode_from_flags)
                .map(str::to_owned),
            Handle::Memory(buf) => Some(buf.mode().as_str().to_owned()),
        }
    }

    fn seekable(&self) -> bool {
        match self {
            // lseek fails with ESPIPE on pipes, sockets and terminals
            Handle::File { .. } => self.position().is_ok(),
            Handle::Memory(_) => true,
        }
    }

    fn blocked(&self) -> bool {
        match self {
            Handle::File { file, .. } => sys::status_flags(file.as_fd())
                .map(|flags| flags & libc::O_NONBLOCK == 0)
                .unwrap_or(false),
            Handle::Memory(_) => true,
        }
    }

    fn local(&self) -> bool {
        match self {
            Handle::File { file, .. } => file
                .metadata()
                .map(|m| !m.file_type().is_socket())
                .unwrap_or(false),
            Handle::Memory(_) => true,
        }
    }

    fn lockable(&self) -> bool {
        match self {
            Handle::File { file, .. } => file.metadata().map(|m| m.is_file()).unwrap_or(false),
            Handle::Memory(_) => false,
        }
    }
}

impl Read for Handle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Handle::File { file, .. } => file.read(buf),
            Handle::Memory(mem) => mem.read(buf),
        }
    }
}

impl Write for Handle {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.spill_if_needed(data.len())?;
        match self {
            Handle::File { file, .. } => file.write(data),
            Handle::Memory(mem) => mem.write(data),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Handle::File { file, .. } => file.flush(),
            Handle::Memory(mem) => mem.flush(),
        }
    }
}

impl Seek for Handle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Handle::File { file, .. } => file.seek(pos),
            Handle::Memory(mem) => mem.seek(pos),
        }
    }
}

impl From<File> for Handle {
    fn from(file: File) -> Self {
        Handle::File { file, uri: None }
    }
}

impl From<OwnedFd> for Handle {
    fn from(fd: OwnedFd) -> Self {
        Handle::File {
            file: File::from(fd),
            uri: None,
        }
    }
}

impl From<MemoryBuffer> for Handle {
    fn from(buf: MemoryBuffer) -> Self {
        Handle::Memory(buf)
    }
}
