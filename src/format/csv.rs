//! CSV record reads and writes, one record per call.

use crate::capability::Capability;
use crate::config::{CsvBytes, CsvDialect};
use crate::error::{Result, StreamError};
use crate::stream::{Stream, non_negative};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
    EscapeInQuoted,
}

/// Whether `buf` ends inside a quoted field, i.e. the record continues on
/// the next line. Follows the csv reader's state machine.
pub(crate) fn record_is_open(buf: &[u8], chars: CsvBytes) -> bool {
    let mut state = Scan::FieldStart;
    for &b in buf {
        state = match state {
            Scan::FieldStart | Scan::Unquoted if b == chars.delimiter || b == b'\n' => {
                Scan::FieldStart
            }
            Scan::FieldStart if b == chars.quote => Scan::Quoted,
            Scan::FieldStart | Scan::Unquoted => Scan::Unquoted,
            Scan::Quoted if b == chars.quote => Scan::QuoteInQuoted,
            Scan::Quoted if b == chars.escape => Scan::EscapeInQuoted,
            Scan::Quoted => Scan::Quoted,
            Scan::EscapeInQuoted => Scan::Quoted,
            Scan::QuoteInQuoted if b == chars.quote => Scan::Quoted,
            Scan::QuoteInQuoted if b == chars.delimiter || b == b'\n' => Scan::FieldStart,
            Scan::QuoteInQuoted => Scan::Unquoted,
        };
    }
    matches!(state, Scan::Quoted | Scan::EscapeInQuoted)
}

fn trim_terminator(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|&b| b != b'\n' && b != b'\r')
        .map_or(0, |i| i + 1);
    &line[..end]
}

/// Parse one record. A blank line is an empty record.
pub(crate) fn parse_record(line: &[u8], chars: CsvBytes) -> Result<Vec<String>> {
    if trim_terminator(line).is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(chars.delimiter)
        .quote(chars.quote)
        .escape(Some(chars.escape))
        .double_quote(true)
        .from_reader(line);

    let mut record = ::csv::ByteRecord::new();
    let found = reader
        .read_byte_record(&mut record)
        .map_err(|e| StreamError::runtime_with(format!("unable to parse CSV record: {e}"), e))?;
    if !found {
        return Ok(Vec::new());
    }

    Ok(record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect())
}

fn needs_quotes(field: &[u8], chars: CsvBytes) -> bool {
    field
        .iter()
        .any(|&b| b == chars.delimiter || b == chars.quote || b == b'\n' || b == b'\r')
}

/// Encode one record terminated by `\n`.
///
/// Inside quotes, both the quote and the escape character are doubled so the
/// reader gives back exactly the original bytes.
pub(crate) fn encode_record<S: AsRef<str>>(fields: &[S], chars: CsvBytes) -> Vec<u8> {
    let mut out = Vec::new();

    if let [only] = fields {
        if only.as_ref().is_empty() {
            out.extend_from_slice(&[chars.quote, chars.quote, b'\n']);
            return out;
        }
    }

    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(chars.delimiter);
        }
        let field = field.as_ref().as_bytes();
        if !needs_quotes(field, chars) {
            out.extend_from_slice(field);
            continue;
        }
        out.push(chars.quote);
        for &b in field {
            if b == chars.quote || b == chars.escape {
                out.push(b);
            }
            out.push(b);
        }
        out.push(chars.quote);
    }

    out.push(b'\n');
    out
}

impl Stream {
    /// Read the next CSV record.
    ///
    /// A quoted field left open at the end of a line pulls in the following
    /// line(s). `length` bounds each physical line (`0` = unbounded). Like
    /// `read_line`, an empty record is returned when this call hit end of data.
    pub fn read_csv(&mut self, length: i64, dialect: &CsvDialect) -> Result<Vec<String>> {
        let chars = dialect.to_bytes()?;
        let length = non_negative(length, "line length")?;
        self.require(Capability::Readable, "read CSV record")?;

        let seekable = self.is_seekable();
        let open = self.open_mut("read CSV record")?;
        let limit = (length > 0).then_some(length);

        let mut record = open.read_line_tolerant(limit, seekable, "read CSV record")?;
        if record.is_empty() {
            return Ok(Vec::new());
        }

        while record_is_open(&record, chars) && !open.eof {
            let more = open
                .read_raw_line(limit, seekable)
                .map_err(|e| StreamError::os("read CSV continuation line", e))?;
            if more.is_empty() {
                break;
            }
            record.extend_from_slice(&more);
        }

        parse_record(&record, chars)
    }

    /// Write one CSV record followed by `\n`, returning the bytes written.
    pub fn write_csv<S: AsRef<str>>(&mut self, fields: &[S], dialect: &CsvDialect) -> Result<usize> {
        let chars = dialect.to_bytes()?;
        self.require(Capability::Writable, "write CSV record")?;
        let line = encode_record(fields, chars);
        self.write(line)
    }
}
