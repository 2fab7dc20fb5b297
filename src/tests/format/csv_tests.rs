//! Tests for CSV record reads and writes.

use crate::config::CsvDialect;
use crate::error::ErrorKind;
use crate::format::{encode_record, parse_record, record_is_open};
use crate::stream::Stream;
use crate::tests::support::file_with;

fn default_bytes() -> crate::config::CsvBytes {
    CsvDialect::default().to_bytes().unwrap()
}

#[test]
fn plain_records_round_trip() {
    let dialect = CsvDialect::default();
    let mut stream = Stream::memory().unwrap();

    stream.write_csv(&["id", "name", "note"], &dialect).unwrap();
    stream.write_csv(&["1", "a, b", "say \"hi\""], &dialect).unwrap();
    stream.write_csv(&["2", "multi\nline", "back\\slash"], &dialect).unwrap();
    stream.rewind().unwrap();

    assert_eq!(stream.read_csv(0, &dialect).unwrap(), ["id", "name", "note"]);
    assert_eq!(stream.read_csv(0, &dialect).unwrap(), ["1", "a, b", "say \"hi\""]);
    assert_eq!(
        stream.read_csv(0, &dialect).unwrap(),
        ["2", "multi\nline", "back\\slash"]
    );
    assert!(stream.eof());
    assert_eq!(stream.read_csv(0, &dialect).unwrap_err().kind(), ErrorKind::Runtime);
}

#[test]
fn writes_use_the_dialect() {
    let dialect = CsvDialect::new(";", "'", "|");
    let mut stream = Stream::memory().unwrap();

    stream.write_csv(&["a;b", "it's", "pipe|d", "plain"], &dialect).unwrap();
    assert_eq!(stream.to_string_lossy(), "'a;b';'it''s';pipe|d;plain\n");

    stream.rewind().unwrap();
    assert_eq!(
        stream.read_csv(0, &dialect).unwrap(),
        ["a;b", "it's", "pipe|d", "plain"]
    );
}

#[test]
fn single_empty_field_is_quoted() {
    let dialect = CsvDialect::default();
    let mut stream = Stream::memory().unwrap();

    stream.write_csv(&[""], &dialect).unwrap();
    assert_eq!(stream.to_string_lossy(), "\"\"\n");

    stream.rewind().unwrap();
    assert_eq!(stream.read_csv(0, &dialect).unwrap(), [""]);
}

#[test]
fn blank_line_reads_as_empty_record() {
    let dialect = CsvDialect::default();
    let mut stream = Stream::from_bytes("a,b\n\nc\n").unwrap();

    assert_eq!(stream.read_csv(0, &dialect).unwrap(), ["a", "b"]);
    assert!(stream.read_csv(0, &dialect).unwrap().is_empty());
    assert_eq!(stream.read_csv(0, &dialect).unwrap(), ["c"]);
}

#[test]
fn empty_fields_survive() {
    let dialect = CsvDialect::default();
    let mut stream = Stream::from_bytes(",x,\n").unwrap();
    assert_eq!(stream.read_csv(0, &dialect).unwrap(), ["", "x", ""]);
}

#[test]
fn dialect_is_validated_before_touching_the_stream() {
    let (_dir, path) = file_with(b"a,b\n");
    let mut stream = Stream::open(&path, "r").unwrap();

    let err = stream.read_csv(0, &CsvDialect::default().with_delimiter("::")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Length);
    let err = stream.read_csv(0, &CsvDialect::new(",", ",", "\\")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Logic);
    assert_eq!(stream.tell().unwrap(), Some(0));

    let err = stream.write_csv(&["x"], &CsvDialect::new("", "\"", "\\")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Length);
    let err = stream.write_csv(&["x"], &CsvDialect::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotWritable);
}

#[test]
fn open_quote_detection() {
    let chars = default_bytes();
    assert!(!record_is_open(b"a,b\n", chars));
    assert!(record_is_open(b"a,\"b\n", chars));
    assert!(!record_is_open(b"a,\"b\"\"c\"\n", chars));
    assert!(record_is_open(b"a,\"b\"\"\n", chars));
    assert!(record_is_open(b"\"x\\", chars));
    assert!(!record_is_open(b"ab\"c\n", chars));
}

#[test]
fn encoder_doubles_quote_and_escape_inside_quotes() {
    let chars = default_bytes();
    assert_eq!(encode_record(&["a", "b"], chars), b"a,b\n");
    assert_eq!(encode_record(&["a\"b"], chars), b"\"a\"\"b\"\n");
    assert_eq!(encode_record(&["x,\\"], chars), b"\"x,\\\\\"\n");
    assert_eq!(encode_record(&["no\\quote"], chars), b"no\\quote\n");
}

#[test]
fn parser_handles_escapes() {
    let chars = default_bytes();
    assert_eq!(
        parse_record(b"\"a\\\"b\",c\n", chars).unwrap(),
        ["a\"b", "c"]
    );
    assert_eq!(parse_record(b"x,y\r\n", chars).unwrap(), ["x", "y"]);
    assert!(parse_record(b"\n", chars).unwrap().is_empty());
}
