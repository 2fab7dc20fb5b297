//! Line-oriented reads and writes.

use std::io::{self, Read, Seek, SeekFrom};

use crate::capability::Capability;
use crate::error::{Result, StreamError};
use crate::stream::{OpenStream, Stream, non_negative};

/// Line terminator used when callers have no preference.
pub const DEFAULT_NEWLINE: &str = "\n";

/// Bytes fetched per step when scanning a seekable handle for a newline.
const LINE_CHUNK: u64 = 8192;

impl OpenStream {
    /// Read through the next newline (kept), end of data, or `limit` bytes.
    ///
    /// Seekable handles are read in chunks and the unused tail is seeked
    /// back over; a line ending exactly at the end of the data sets eof.
    /// Anything else is read a byte at a time so that nothing past the
    /// newline is consumed, which means eof is only seen by the next read.
    pub(crate) fn read_raw_line(&mut self, limit: Option<u64>, seekable: bool) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();

        if seekable {
            loop {
                let want = match limit {
                    Some(l) => (l - line.len() as u64).min(LINE_CHUNK),
                    None => LINE_CHUNK,
                };
                if want == 0 {
                    break;
                }

                let mut chunk = Vec::new();
                (&mut self.handle).take(want).read_to_end(&mut chunk)?;
                let short = (chunk.len() as u64) < want;

                if let Some(i) = chunk.iter().position(|&b| b == b'\n') {
                    let excess = chunk.len() - (i + 1);
                    chunk.truncate(i + 1);
                    line.extend_from_slice(&chunk);
                    if excess > 0 {
                        self.handle.seek(SeekFrom::Current(-(excess as i64)))?;
                    } else if short {
                        // the newline was the last byte of the data
                        self.eof = true;
                    }
                    break;
                }

                line.extend_from_slice(&chunk);
                if short {
                    self.eof = true;
                    break;
                }
            }
        } else {
            let mut byte = [0u8; 1];
            while limit.is_none_or(|l| (line.len() as u64) < l) {
                match self.handle.read(&mut byte) {
                    Ok(0) => {
                        self.eof = true;
                        break;
                    }
                    Ok(_) => {
                        line.push(byte[0]);
                        if byte[0] == b'\n' {
                            break;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                    Err(e) => return Err(e),
                }
            }
        }

        self.position += line.len() as u64;
        Ok(line)
    }

    /// `read_raw_line` with the empty-final-line rule: getting nothing is
    /// an error, unless this very call is what ran into end of data.
    pub(crate) fn read_line_tolerant(
        &mut self,
        limit: Option<u64>,
        seekable: bool,
        op: &str,
    ) -> Result<Vec<u8>> {
        let eof_before = self.eof;
        let result = self.read_raw_line(limit, seekable);
        let reached_eof = !eof_before && self.eof;

        match result {
            Ok(line) if !line.is_empty() => Ok(line),
            Ok(_) if reached_eof => Ok(Vec::new()),
            Ok(_) => Err(StreamError::runtime(format!(
                "unable to {op}: no data available"
            ))),
            Err(_) if reached_eof => Ok(Vec::new()),
            Err(e) => Err(StreamError::os(op, e)),
        }
    }
}

impl Stream {
    /// Read the next line including its newline.
    ///
    /// `length == 0` means unbounded; otherwise at most `length` bytes are
    /// returned. Returns an empty vector only when this call hit end of data.
    pub fn read_line(&mut self, length: i64) -> Result<Vec<u8>> {
        let length = non_negative(length, "line length")?;
        self.require(Capability::Readable, "read line")?;
        let seekable = self.is_seekable();
        let open = self.open_mut("read line")?;
        open.read_line_tolerant((length > 0).then_some(length), seekable, "read line")
    }

    /// Write `text` followed by `newline`.
    pub fn write_line(&mut self, text: impl AsRef<[u8]>, newline: &str) -> Result<usize> {
        let text = text.as_ref();
        let mut buf = Vec::with_capacity(text.len() + newline.len());
        buf.extend_from_slice(text);
        buf.extend_from_slice(newline.as_bytes());
        self.write(buf)
    }
}
