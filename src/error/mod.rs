//! Error types for stream operations.
//!
//! This module provides:
//! - `ErrorKind`: A copyable discriminant for each failure class
//! - `StreamError`: The structured error returned by every stream operation
//! - `Result`: Crate-wide result alias

use std::fmt;

use thiserror::Error;

/// Boxed cause carried by runtime failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Crate-wide result alias.
pub type Result<T, E = StreamError> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The constructor received something that is not an open stream handle
    InvalidArgument,
    /// A numeric argument is outside its legal range
    Domain,
    /// A single-character argument is not exactly one character
    Length,
    /// Structural precondition violated (e.g. CSV characters not distinct)
    Logic,
    NotReadable,
    NotWritable,
    NotSeekable,
    NotLockable,
    /// The underlying OS call failed
    Runtime,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "InvalidArgument"),
            ErrorKind::Domain => write!(f, "Domain"),
            ErrorKind::Length => write!(f, "Length"),
            ErrorKind::Logic => write!(f, "Logic"),
            ErrorKind::NotReadable => write!(f, "NotReadable"),
            ErrorKind::NotWritable => write!(f, "NotWritable"),
            ErrorKind::NotSeekable => write!(f, "NotSeekable"),
            ErrorKind::NotLockable => write!(f, "NotLockable"),
            ErrorKind::Runtime => write!(f, "Runtime"),
        }
    }
}

/// A failed stream operation.
///
/// Precondition failures (everything except `Runtime`) are raised before any
/// OS call is made. Capability errors carry a diagnosis that tells a closed
/// stream apart from an open stream lacking the capability.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("invalid stream handle: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Domain(String),

    #[error("{0}")]
    Length(String),

    #[error("{0}")]
    Logic(String),

    #[error("{0}")]
    NotReadable(String),

    #[error("{0}")]
    NotWritable(String),

    #[error("{0}")]
    NotSeekable(String),

    #[error("{0}")]
    NotLockable(String),

    #[error("{message}")]
    Runtime {
        /// Operation and arguments that failed
        message: String,
        /// Set when a non-blocking lock attempt lost to contention
        would_block: bool,
        /// The original failure, if any
        #[source]
        source: Option<BoxError>,
    },
}

impl StreamError {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StreamError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            StreamError::Domain(_) => ErrorKind::Domain,
            StreamError::Length(_) => ErrorKind::Length,
            StreamError::Logic(_) => ErrorKind::Logic,
            StreamError::NotReadable(_) => ErrorKind::NotReadable,
            StreamError::NotWritable(_) => ErrorKind::NotWritable,
            StreamError::NotSeekable(_) => ErrorKind::NotSeekable,
            StreamError::NotLockable(_) => ErrorKind::NotLockable,
            StreamError::Runtime { .. } => ErrorKind::Runtime,
        }
    }

    /// Whether a failed lock attempt was caused by contention.
    ///
    /// Always `false` for errors other than `Runtime`.
    pub fn would_block(&self) -> bool {
        matches!(
            self,
            StreamError::Runtime {
                would_block: true,
                ..
            }
        )
    }

    /// Create a runtime error without an underlying cause.
    pub fn runtime(message: impl Into<String>) -> Self {
        StreamError::Runtime {
            message: message.into(),
            would_block: false,
            source: None,
        }
    }

    /// Create a runtime error chaining the original failure as its source.
    pub fn runtime_with(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        StreamError::Runtime {
            message: message.into(),
            would_block: false,
            source: Some(source.into()),
        }
    }

    /// Wrap an OS error from operation `op`, keeping it as the source.
    pub(crate) fn os(op: impl fmt::Display, err: std::io::Error) -> Self {
        StreamError::Runtime {
            message: format!("{op} failed: {err}"),
            would_block: false,
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
