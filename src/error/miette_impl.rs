//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{ErrorKind, StreamError};

/// A diagnostic wrapper for stream errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct StreamDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<StreamError>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(kind: ErrorKind) -> Option<String> {
    let text = match kind {
        ErrorKind::InvalidArgument => "Pass an open file, pipe, socket or memory buffer",
        ErrorKind::Domain => "Check that lengths are non-negative and chunk sizes are at least 1",
        ErrorKind::Length => "Delimiter, quote and escape must each be exactly one character",
        ErrorKind::Logic => "Delimiter, quote and escape must all differ",
        ErrorKind::NotReadable | ErrorKind::NotWritable => {
            "Check the mode the stream was opened with"
        }
        ErrorKind::NotSeekable => "Pipes, sockets and terminals cannot be repositioned",
        ErrorKind::NotLockable => "Advisory locks are only available on regular files",
        ErrorKind::Runtime => return None,
    };
    Some(text.into())
}

impl From<StreamError> for StreamDiagnostic {
    fn from(e: StreamError) -> Self {
        let kind = e.kind();
        StreamDiagnostic {
            message: format!("[{kind}] stream operation failed"),
            help: help_for(kind),
            source: Some(e),
            severity: Severity::Error,
        }
    }
}

impl From<StreamError> for miette::Report {
    fn from(e: StreamError) -> Self {
        miette::Report::new(StreamDiagnostic::from(e))
    }
}
