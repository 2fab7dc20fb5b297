//! Tests for CsvDialect validation.

use crate::config::CsvDialect;
use crate::error::ErrorKind;

#[test]
fn default_dialect_is_valid() {
    let dialect = CsvDialect::default();
    assert_eq!(dialect.delimiter, ",");
    assert_eq!(dialect.quote, "\"");
    assert_eq!(dialect.escape, "\\");
    dialect.validate().expect("default dialect validates");
}

#[test]
fn multi_character_or_empty_fields_are_length_errors() {
    let cases = [
        CsvDialect::default().with_delimiter(";;"),
        CsvDialect::default().with_quote(""),
        CsvDialect::default().with_escape("\\\\"),
        CsvDialect::default().with_delimiter("é"),
    ];
    for dialect in cases {
        let err = dialect.validate().expect_err("should be rejected");
        assert_eq!(err.kind(), ErrorKind::Length, "{dialect:?}");
    }
}

#[test]
fn coinciding_characters_are_logic_errors() {
    let cases = [
        CsvDialect::new(",", ",", "\\"),
        CsvDialect::new(",", "\"", ","),
        CsvDialect::new(",", "\"", "\""),
        CsvDialect::new("|", "|", "|"),
    ];
    for dialect in cases {
        let err = dialect.validate().expect_err("should be rejected");
        assert_eq!(err.kind(), ErrorKind::Logic, "{dialect:?}");
    }
}

#[test]
fn length_is_checked_before_distinctness() {
    let err = CsvDialect::new(",,", ",", ",").validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Length);
}

#[test]
fn deserializes_with_defaults_for_missing_fields() {
    let dialect: CsvDialect = serde_json::from_str(r#"{"delimiter": ";"}"#).unwrap();
    assert_eq!(dialect, CsvDialect::default().with_delimiter(";"));
}

#[test]
fn single_non_ascii_character_is_rejected() {
    let err = CsvDialect::default().with_quote("é").validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Length);
    assert!(err.to_string().contains("single ASCII character"), "{err}");
}
