//! fopen-style mode strings.

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

use crate::error::StreamError;

/// Primary access letter of a mode string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// `r`: open existing for reading
    Read,
    /// `w`: create or truncate for writing
    Write,
    /// `a`: create, writes always go to the end
    Append,
    /// `x`: create, fail if the file exists
    Exclusive,
    /// `c`: create without truncating
    Create,
}

/// A parsed mode string such as `"r"`, `"w+"` or `"ab"`.
///
/// The `b` and `t` flags are accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMode {
    access: AccessKind,
    plus: bool,
}

impl OpenMode {
    pub const READ: OpenMode = OpenMode::new(AccessKind::Read, false);
    pub const READ_WRITE: OpenMode = OpenMode::new(AccessKind::Read, true);
    pub const WRITE: OpenMode = OpenMode::new(AccessKind::Write, false);
    pub const APPEND: OpenMode = OpenMode::new(AccessKind::Append, false);

    /// Create a mode from its parts.
    pub const fn new(access: AccessKind, plus: bool) -> Self {
        Self { access, plus }
    }

    /// Parse a mode string.
    pub fn parse(s: &str) -> Result<Self, StreamError> {
        let invalid = || StreamError::InvalidArgument(format!("unknown stream mode '{s}'"));

        let mut chars = s.chars();
        let access = match chars.next() {
            Some('r') => AccessKind::Read,
            Some('w') => AccessKind::Write,
            Some('a') => AccessKind::Append,
            Some('x') => AccessKind::Exclusive,
            Some('c') => AccessKind::Create,
            _ => return Err(invalid()),
        };

        let mut plus = false;
        for c in chars {
            match c {
                '+' if !plus => plus = true,
                'b' | 't' => {}
                _ => return Err(invalid()),
            }
        }

        Ok(Self { access, plus })
    }

    pub fn access(&self) -> AccessKind {
        self.access
    }

    pub fn is_update(&self) -> bool {
        self.plus
    }

    /// Canonical spelling, e.g. `"r+"`.
    pub fn as_str(&self) -> &'static str {
        match (self.access, self.plus) {
            (AccessKind::Read, false) => "r",
            (AccessKind::Read, true) => "r+",
            (AccessKind::Write, false) => "w",
            (AccessKind::Write, true) => "w+",
            (AccessKind::Append, false) => "a",
            (AccessKind::Append, true) => "a+",
            (AccessKind::Exclusive, false) => "x",
            (AccessKind::Exclusive, true) => "x+",
            (AccessKind::Create, false) => "c",
            (AccessKind::Create, true) => "c+",
        }
    }

    /// Translate into `OpenOptions` with fopen semantics.
    pub fn to_open_options(&self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        match self.access {
            AccessKind::Read => {
                opts.read(true).write(self.plus);
            }
            AccessKind::Write => {
                opts.write(true).create(true).truncate(true).read(self.plus);
            }
            AccessKind::Append => {
                opts.append(true).create(true).read(self.plus);
            }
            AccessKind::Exclusive => {
                opts.write(true).create_new(true).read(self.plus);
            }
            AccessKind::Create => {
                opts.write(true).create(true).read(self.plus);
            }
        }
        opts
    }
}

impl Default for OpenMode {
    fn default() -> Self {
        OpenMode::READ_WRITE
    }
}

impl FromStr for OpenMode {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpenMode::parse(s)
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
