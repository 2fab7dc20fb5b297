//! Tests for open/closed/detached transitions.

use std::fs::File;
use std::io::Read;

use crate::error::ErrorKind;
use crate::stream::Stream;
use crate::tests::support::file_with;

#[test]
fn close_is_idempotent() {
    let mut stream = Stream::memory().unwrap();
    assert!(stream.is_open());

    stream.close();
    stream.close();

    assert!(stream.is_closed());
    assert!(!stream.is_detached());
    assert!(stream.eof());
    assert_eq!(stream.tell().unwrap(), None);
    assert_eq!(stream.mode(), None);
    assert_eq!(stream.to_string(), "Stream(closed)");
}

#[test]
fn closed_stream_has_no_capabilities() {
    let mut stream = Stream::memory().unwrap();
    stream.close();

    assert!(!stream.is_readable());
    assert!(!stream.is_writable());
    assert!(!stream.is_seekable());
    assert!(!stream.is_local());
    assert!(!stream.is_remote());
}

#[test]
fn operations_on_closed_stream_name_the_state() {
    let mut stream = Stream::memory().unwrap();
    stream.close();

    let err = stream.read(1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotReadable);
    assert!(err.to_string().contains("closed"), "{err}");

    let err = stream.write(b"x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotWritable);

    let err = stream.seek(0, crate::Whence::Set).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotSeekable);

    let err = stream.flush().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
}

#[test]
fn detach_hands_back_a_usable_handle() {
    let (_dir, path) = file_with(b"still here");
    let mut stream = Stream::open(&path, "r").unwrap();

    let handle = stream.detach().expect("open stream detaches");
    assert!(stream.is_detached());
    assert!(stream.detach().is_none());
    assert_eq!(stream.to_string(), "Stream(detached)");

    let mut file: File = handle.into_file().expect("file handle");
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();
    assert_eq!(text, "still here");
}

#[test]
fn detach_after_close_returns_none() {
    let mut stream = Stream::memory().unwrap();
    stream.close();
    assert!(stream.detach().is_none());
    assert!(stream.is_closed());
}

#[test]
fn directories_are_invalid_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let err = Stream::try_from(File::open(dir.path()).unwrap()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn display_names_type_uri_and_mode() {
    let stream = Stream::from_bytes("x").unwrap();
    assert_eq!(stream.to_string(), "Stream(type=memory, uri=memory, mode=r+)");
}
