//! Tests for StreamError kinds and helpers.

use std::error::Error;

use crate::error::{ErrorKind, StreamError};

#[test]
fn each_variant_reports_its_kind() {
    let cases = [
        (StreamError::InvalidArgument("x".into()), ErrorKind::InvalidArgument),
        (StreamError::Domain("x".into()), ErrorKind::Domain),
        (StreamError::Length("x".into()), ErrorKind::Length),
        (StreamError::Logic("x".into()), ErrorKind::Logic),
        (StreamError::NotReadable("x".into()), ErrorKind::NotReadable),
        (StreamError::NotWritable("x".into()), ErrorKind::NotWritable),
        (StreamError::NotSeekable("x".into()), ErrorKind::NotSeekable),
        (StreamError::NotLockable("x".into()), ErrorKind::NotLockable),
        (StreamError::runtime("x"), ErrorKind::Runtime),
    ];

    for (err, kind) in cases {
        assert_eq!(err.kind(), kind);
        assert!(!err.would_block());
    }
}

#[test]
fn runtime_with_chains_the_cause() {
    let cause = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe went away");
    let err = StreamError::runtime_with("copy failed", cause);

    assert_eq!(err.to_string(), "copy failed");
    let source = err.source().expect("source is kept");
    assert_eq!(source.to_string(), "pipe went away");
}

#[test]
fn would_block_is_read_from_runtime_errors() {
    let err = StreamError::Runtime {
        message: "lock".into(),
        would_block: true,
        source: None,
    };
    assert!(err.would_block());
    assert_eq!(err.kind(), ErrorKind::Runtime);
}

#[test]
fn invalid_argument_message_is_prefixed() {
    let err = StreamError::InvalidArgument("a directory is not a stream".into());
    assert_eq!(
        err.to_string(),
        "invalid stream handle: a directory is not a stream"
    );
}
