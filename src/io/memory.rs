//! In-memory stream backend.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

use crate::config::{AccessKind, OpenMode};

/// A growable byte buffer with a cursor and a fixed mode.
///
/// With a spill limit set, the owning `Handle` moves the contents into an
/// anonymous temp file once a write would grow the buffer past the limit.
#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    cursor: Cursor<Vec<u8>>,
    mode: OpenMode,
    spill_limit: Option<u64>,
}

impl MemoryBuffer {
    /// Create an empty read/write buffer.
    pub fn new() -> Self {
        Self::from_bytes(Vec::new(), OpenMode::READ_WRITE)
    }

    /// Create a buffer over existing bytes, positioned at the start.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, mode: OpenMode) -> Self {
        Self {
            cursor: Cursor::new(bytes.into()),
            mode,
            spill_limit: None,
        }
    }

    /// Spill to a temp file once the contents would exceed `limit` bytes.
    pub fn with_spill_limit(mut self, limit: u64) -> Self {
        self.spill_limit = Some(limit);
        self
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    pub fn spill_limit(&self) -> Option<u64> {
        self.spill_limit
    }

    /// Get the buffer contents regardless of the cursor position.
    pub fn as_bytes(&self) -> &[u8] {
        self.cursor.get_ref()
    }

    pub fn len(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.get_ref().is_empty()
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Consume the buffer and return its contents.
    pub fn into_inner(self) -> Vec<u8> {
        self.cursor.into_inner()
    }

    /// Resize to `len`, padding with zero bytes. The cursor does not move.
    pub fn set_len(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "length too large"))?;
        self.cursor.get_mut().resize(len, 0);
        Ok(())
    }

    pub(crate) fn needs_spill(&self, incoming: usize) -> bool {
        let Some(limit) = self.spill_limit else {
            return false;
        };
        let end = self.write_offset().saturating_add(incoming as u64);
        end.max(self.len()) > limit
    }

    /// Copy the contents into an anonymous temp file at the same position.
    pub(crate) fn spill(&self) -> io::Result<File> {
        let mut file = tempfile::tempfile()?;
        file.write_all(self.as_bytes())?;
        file.seek(SeekFrom::Start(self.position()))?;
        Ok(file)
    }

    fn write_offset(&self) -> u64 {
        if self.mode.access() == AccessKind::Append {
            self.len()
        } else {
            self.position()
        }
    }
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for MemoryBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Write for MemoryBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.mode.access() == AccessKind::Append {
            let end = self.len();
            self.cursor.set_position(end);
        }
        self.cursor.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MemoryBuffer {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}
