//! Capability answers derived from live stream metadata.
//!
//! Nothing here is cached: every query asks the `MetadataSource` again, since
//! a descriptor's flags can be changed underneath us (`fcntl` from another
//! owner of a duplicated descriptor, a file being replaced, ...).

use std::fmt;

/// The per-property metadata a stream backend must be able to report.
pub trait MetadataSource {
    /// Mode string in fopen notation, `None` if it cannot be determined.
    fn mode(&self) -> Option<String>;
    fn seekable(&self) -> bool;
    /// Whether reads and writes block.
    fn blocked(&self) -> bool;
    /// Whether the resource is local (not a network endpoint).
    fn local(&self) -> bool;
    /// Whether advisory locks can be placed on the resource.
    fn lockable(&self) -> bool;
}

/// A boolean property of an open stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Readable,
    Writable,
    Seekable,
    Lockable,
    Blocking,
    Local,
    Remote,
}

impl Capability {
    /// Adjective used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Capability::Readable => "readable",
            Capability::Writable => "writable",
            Capability::Seekable => "seekable",
            Capability::Lockable => "lockable",
            Capability::Blocking => "blocking",
            Capability::Local => "local",
            Capability::Remote => "remote",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Readable iff the mode contains `r` or `+`.
pub fn mode_is_readable(mode: &str) -> bool {
    mode.contains(['r', '+'])
}

/// Writable iff the mode contains any of `w a x c +`.
pub fn mode_is_writable(mode: &str) -> bool {
    mode.contains(['w', 'a', 'x', 'c', '+'])
}

/// Answer `capability` for a stream; `None` stands for a closed stream.
///
/// A closed stream has no capabilities at all, including `Local`.
pub fn derive(capability: Capability, source: Option<&dyn MetadataSource>) -> bool {
    let Some(source) = source else {
        return false;
    };

    match capability {
        Capability::Readable => source.mode().is_some_and(|m| mode_is_readable(&m)),
        Capability::Writable => source.mode().is_some_and(|m| mode_is_writable(&m)),
        Capability::Seekable => source.seekable(),
        Capability::Lockable => source.lockable(),
        Capability::Blocking => source.blocked(),
        Capability::Local => source.local(),
        Capability::Remote => !source.local(),
    }
}
