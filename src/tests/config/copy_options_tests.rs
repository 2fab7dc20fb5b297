//! Tests for CopyOptions.

use crate::config::{CopyOptions, DEFAULT_CHUNK_SIZE};

#[test]
fn defaults_are_unbounded_with_standard_chunk() {
    let opts = CopyOptions::default();
    assert_eq!(opts.max_length, None);
    assert_eq!(opts.chunk_size, DEFAULT_CHUNK_SIZE);
    assert_eq!(DEFAULT_CHUNK_SIZE, 1024);
}

#[test]
fn builder_sets_fields() {
    let opts = CopyOptions::new().with_max_length(10).with_chunk_size(3);
    assert_eq!(opts.max_length, Some(10));
    assert_eq!(opts.chunk_size, 3);
}

#[test]
fn deserializes_partial_config() {
    let opts: CopyOptions = serde_json::from_str(r#"{"max_length": 64}"#).unwrap();
    assert_eq!(opts, CopyOptions::new().with_max_length(64));
}
