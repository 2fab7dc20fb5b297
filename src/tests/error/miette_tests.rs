//! Tests for the miette diagnostic wrapper.

use miette::{Diagnostic, Severity};

use crate::error::{StreamDiagnostic, StreamError};

#[test]
fn diagnostic_carries_kind_and_help() {
    let diag = StreamDiagnostic::from(StreamError::NotSeekable("pipe".into()));

    assert_eq!(diag.to_string(), "[NotSeekable] stream operation failed");
    assert_eq!(diag.severity(), Some(Severity::Error));
    assert!(diag.help().is_some());
    assert!(diag.source.is_some());
}

#[test]
fn runtime_errors_have_no_help() {
    let diag = StreamDiagnostic::from(StreamError::runtime("boom"));
    assert!(diag.help().is_none());
}

#[test]
fn converts_into_report() {
    let report: miette::Report = StreamError::Domain("negative".into()).into();
    assert!(report.to_string().contains("Domain"));
}
