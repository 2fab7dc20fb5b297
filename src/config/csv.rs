//! Delimiter/quote/escape triple used by CSV record reads and writes.

use serde::Deserialize;

use crate::error::StreamError;

/// Characters framing a CSV record.
///
/// Each character must be a single ASCII byte; anything else, including a
/// single non-ASCII character such as `"é"`, is a `Length` error. Kept as
/// strings so that a caller passing `"::"` gets that error instead of a
/// silently truncated byte.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsvDialect {
    pub delimiter: String,
    pub quote: String,
    pub escape: String,
}

/// A dialect that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CsvBytes {
    pub delimiter: u8,
    pub quote: u8,
    pub escape: u8,
}

impl Default for CsvDialect {
    fn default() -> Self {
        Self {
            delimiter: ",".into(),
            quote: "\"".into(),
            escape: "\\".into(),
        }
    }
}

impl CsvDialect {
    /// Create a dialect from its three characters.
    pub fn new(
        delimiter: impl Into<String>,
        quote: impl Into<String>,
        escape: impl Into<String>,
    ) -> Self {
        Self {
            delimiter: delimiter.into(),
            quote: quote.into(),
            escape: escape.into(),
        }
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the quote character.
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = quote.into();
        self
    }

    /// Set the escape character.
    pub fn with_escape(mut self, escape: impl Into<String>) -> Self {
        self.escape = escape.into();
        self
    }

    /// Check that each character is a single ASCII byte and that all three differ.
    pub fn validate(&self) -> Result<(), StreamError> {
        self.to_bytes().map(|_| ())
    }

    pub(crate) fn to_bytes(&self) -> Result<CsvBytes, StreamError> {
        let delimiter = single_byte("delimiter", &self.delimiter)?;
        let quote = single_byte("quote", &self.quote)?;
        let escape = single_byte("escape", &self.escape)?;

        if delimiter == quote || delimiter == escape || quote == escape {
            return Err(StreamError::Logic(format!(
                "delimiter '{}', quote '{}' and escape '{}' must all be different",
                self.delimiter, self.quote, self.escape
            )));
        }

        Ok(CsvBytes {
            delimiter,
            quote,
            escape,
        })
    }
}

fn single_byte(name: &str, value: &str) -> Result<u8, StreamError> {
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(StreamError::Length(format!(
            "{name} must be a single ASCII character, got '{value}'"
        ))),
    }
}
