//! End-to-end checks for the diagnostic path: lexical and parse errors
//! carry the right error kind, build a source snippet when the offending
//! file is registered with a `SourceManager`, and accumulate a trace
//! stack as the failure unwinds through nested parser calls.

use argonc::error::ErrorKind;
use argonc::lexer::tokenize;
use argonc::parser::parse_program;
use argonc::source::{IndicatorKind, SourceManager};

#[test]
fn unterminated_string_is_a_lexical_error() {
    let err = tokenize("bad.argon", "def x = \"abc").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lexical);
    assert!(err.formatted_message().contains("unterminated string literal"));
}

#[test]
fn missing_closing_paren_is_a_parse_error_with_a_non_empty_trace() {
    let tokens = tokenize("bad.argon", "func main( i32 -> 0;").unwrap();
    let err = parse_program("bad.argon", tokens).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Parse);
    assert!(!err.trace.is_empty());
}

#[test]
fn program_missing_a_main_function_is_reported_as_a_parse_error() {
    let tokens = tokenize("bad.argon", "func f() i32 -> 1;").unwrap();
    let err = parse_program("bad.argon", tokens).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Parse);
    assert!(err.expected.as_deref().unwrap().contains("func main"));
}

#[test]
fn formatted_message_includes_the_file_line_and_column() {
    let err = tokenize("bad.argon", "\"unterminated").unwrap_err();
    let rendered = err.formatted_message();
    assert!(rendered.starts_with("bad.argon:1:1"));
}

#[test]
fn a_snippet_is_attached_once_the_offending_file_is_registered() {
    let source_text = "def x = \"abc";
    let err = tokenize("bad.argon", source_text).unwrap_err();

    let mut sources = SourceManager::new();
    sources.load("bad.argon", source_text);
    let err = err.with_snippet_from(&sources, IndicatorKind::Caret);

    assert!(err.snippet.is_some());
    assert!(err.formatted_message().contains(source_text));
}

#[test]
fn no_snippet_is_attached_when_the_file_was_never_registered() {
    let err = tokenize("bad.argon", "\"abc").unwrap_err();
    let sources = SourceManager::new();
    let err = err.with_snippet_from(&sources, IndicatorKind::Caret);
    assert!(err.snippet.is_none());
}
