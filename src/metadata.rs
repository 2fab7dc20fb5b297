//! Raw metadata and stat maps for introspection.
//!
//! The typed structs are the source of truth; the string-keyed maps are
//! produced by serializing them, so key names follow the field names.

use std::collections::BTreeMap;
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;

use serde::Serialize;
use serde_json::Value;

use crate::capability::MetadataSource;
use crate::stream::Stream;

/// Point-in-time description of an open stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamMetadata {
    pub stream_type: &'static str,
    pub wrapper_type: &'static str,
    pub mode: Option<String>,
    pub seekable: bool,
    pub blocked: bool,
    pub local: bool,
    pub eof: bool,
    pub uri: Option<String>,
    /// Bytes buffered above the OS handle; always zero, nothing is buffered here
    pub unread_bytes: u64,
}

/// `fstat`-style fields of the underlying resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamStat {
    pub dev: u64,
    pub ino: u64,
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub rdev: u64,
    pub size: u64,
    pub atime: i64,
    pub mtime: i64,
    pub ctime: i64,
    pub blksize: u64,
    pub blocks: u64,
}

/// Regular file, rw-rw-rw-.
const MEMORY_STAT_MODE: u32 = 0o100666;

impl StreamStat {
    /// Stat for an in-memory buffer of `size` bytes.
    pub fn for_memory(size: u64) -> Self {
        Self {
            mode: MEMORY_STAT_MODE,
            nlink: 1,
            size,
            ..Self::default()
        }
    }
}

impl From<&Metadata> for StreamStat {
    fn from(m: &Metadata) -> Self {
        Self {
            dev: m.dev(),
            ino: m.ino(),
            mode: m.mode(),
            nlink: m.nlink(),
            uid: m.uid(),
            gid: m.gid(),
            rdev: m.rdev(),
            size: m.size(),
            atime: m.atime(),
            mtime: m.mtime(),
            ctime: m.ctime(),
            blksize: m.blksize(),
            blocks: m.blocks(),
        }
    }
}

fn to_map<T: Serialize>(value: &T) -> BTreeMap<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}

impl Stream {
    /// Typed metadata of the open stream, `None` once closed or detached.
    pub fn stream_metadata(&self) -> Option<StreamMetadata> {
        let open = self.open_ref()?;
        let handle = &open.handle;
        Some(StreamMetadata {
            stream_type: handle.stream_type(),
            wrapper_type: handle.wrapper_type(),
            mode: handle.mode(),
            seekable: handle.seekable(),
            blocked: handle.blocked(),
            local: handle.local(),
            eof: open.eof,
            uri: handle.uri().map(str::to_owned),
            unread_bytes: 0,
        })
    }

    /// Raw metadata map; empty for a closed stream.
    pub fn metadata(&self) -> BTreeMap<String, Value> {
        self.stream_metadata()
            .map(|m| to_map(&m))
            .unwrap_or_default()
    }

    /// A single metadata entry by key.
    pub fn metadata_key(&self, key: &str) -> Option<Value> {
        self.metadata().remove(key)
    }

    /// Typed stat of the underlying resource, `None` if closed or if the
    /// OS refuses to stat it.
    pub fn stream_stat(&self) -> Option<StreamStat> {
        let open = self.open_ref()?;
        match open.handle.stat() {
            Ok(stat) => Some(stat),
            Err(e) => {
                log::debug!("stat failed on {self}: {e}");
                None
            }
        }
    }

    /// Raw stat map; empty for a closed stream.
    pub fn stat(&self) -> BTreeMap<String, Value> {
        self.stream_stat().map(|s| to_map(&s)).unwrap_or_default()
    }

    /// A single stat entry by key.
    pub fn stat_key(&self, key: &str) -> Option<Value> {
        self.stat().remove(key)
    }

    /// Size of the underlying resource in bytes, if known.
    pub fn size(&self) -> Option<u64> {
        self.stream_stat().map(|s| s.size)
    }
}
