//! Shared fixtures for the unit tests.

use std::os::fd::OwnedFd;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use crate::Stream;

/// A scratch directory plus a path inside it holding `content`.
pub(crate) fn file_with(content: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.txt");
    std::fs::write(&path, content).expect("write fixture");
    (dir, path)
}

/// A stream over one end of a socket pair, plus the peer end.
///
/// Sockets are neither seekable nor local, which makes them a handy
/// stand-in for pipes and network streams.
pub(crate) fn socket_stream() -> (Stream, UnixStream) {
    let (ours, peer) = UnixStream::pair().expect("socketpair");
    let stream = Stream::new(OwnedFd::from(ours)).expect("wrap socket");
    (stream, peer)
}
