//! Tests for MemoryBuffer.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::config::OpenMode;
use crate::io::MemoryBuffer;

#[test]
fn writes_overwrite_at_the_cursor() {
    let mut buf = MemoryBuffer::from_bytes(b"hello".to_vec(), OpenMode::READ_WRITE);
    buf.seek(SeekFrom::Start(1)).unwrap();
    buf.write_all(b"EL").unwrap();
    assert_eq!(buf.as_bytes(), b"hELlo");
    assert_eq!(buf.position(), 3);
}

#[test]
fn append_mode_always_writes_at_the_end() {
    let mut buf = MemoryBuffer::from_bytes(b"abc".to_vec(), OpenMode::APPEND);
    buf.seek(SeekFrom::Start(0)).unwrap();
    buf.write_all(b"def").unwrap();
    assert_eq!(buf.as_bytes(), b"abcdef");
}

#[test]
fn set_len_pads_with_zeros_and_keeps_the_cursor() {
    let mut buf = MemoryBuffer::from_bytes(b"abc".to_vec(), OpenMode::READ_WRITE);
    buf.seek(SeekFrom::Start(2)).unwrap();
    buf.set_len(5).unwrap();
    assert_eq!(buf.as_bytes(), b"abc\0\0");
    assert_eq!(buf.position(), 2);

    buf.set_len(1).unwrap();
    assert_eq!(buf.as_bytes(), b"a");
    let mut rest = Vec::new();
    buf.read_to_end(&mut rest).unwrap();
    assert!(rest.is_empty());
}

#[test]
fn needs_spill_only_past_the_limit() {
    let buf = MemoryBuffer::new().with_spill_limit(4);
    assert!(!buf.needs_spill(4));
    assert!(buf.needs_spill(5));

    let unlimited = MemoryBuffer::new();
    assert!(!unlimited.needs_spill(usize::MAX));
}

#[test]
fn spill_preserves_contents_and_position() {
    let mut buf = MemoryBuffer::from_bytes(b"spilled".to_vec(), OpenMode::READ_WRITE);
    buf.seek(SeekFrom::Start(3)).unwrap();

    let mut file = buf.spill().unwrap();
    assert_eq!(file.stream_position().unwrap(), 3);

    let mut all = String::new();
    file.rewind().unwrap();
    file.read_to_string(&mut all).unwrap();
    assert_eq!(all, "spilled");
}
