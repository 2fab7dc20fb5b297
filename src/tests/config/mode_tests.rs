//! Tests for fopen-style mode parsing.

use crate::config::{AccessKind, OpenMode};
use crate::error::ErrorKind;

#[test]
fn parses_every_base_mode_with_and_without_plus() {
    for (raw, access, plus) in [
        ("r", AccessKind::Read, false),
        ("r+", AccessKind::Read, true),
        ("w", AccessKind::Write, false),
        ("w+", AccessKind::Write, true),
        ("a", AccessKind::Append, false),
        ("a+", AccessKind::Append, true),
        ("x", AccessKind::Exclusive, false),
        ("x+", AccessKind::Exclusive, true),
        ("c", AccessKind::Create, false),
        ("c+", AccessKind::Create, true),
    ] {
        let mode = OpenMode::parse(raw).expect(raw);
        assert_eq!(mode.access(), access, "{raw}");
        assert_eq!(mode.is_update(), plus, "{raw}");
        assert_eq!(mode.as_str(), raw);
    }
}

#[test]
fn binary_and_text_flags_are_ignored() {
    assert_eq!(OpenMode::parse("rb").unwrap(), OpenMode::READ);
    assert_eq!(OpenMode::parse("r+b").unwrap(), OpenMode::READ_WRITE);
    assert_eq!(OpenMode::parse("rb+").unwrap(), OpenMode::READ_WRITE);
    assert_eq!(OpenMode::parse("wt").unwrap(), OpenMode::WRITE);
}

#[test]
fn rejects_unknown_modes() {
    for raw in ["", "q", "rw", "r++", "+r", "ab?"] {
        let err = OpenMode::parse(raw).expect_err(raw);
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{raw}");
    }
}

#[test]
fn from_str_and_display_agree() {
    let mode: OpenMode = "a+".parse().unwrap();
    assert_eq!(mode.to_string(), "a+");
    assert_eq!(OpenMode::default(), OpenMode::READ_WRITE);
}
