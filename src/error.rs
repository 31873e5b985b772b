//! Result/trace error machinery shared by every pipeline stage.
//!
//! Grounded on `original_source/include/Error/Error.h` and
//! `include/Error/Result.h`: a value-or-error sum whose error side carries a
//! kind tag, a human message, optional expected/actual pair, an optional
//! suggestion, free-form notes, a chain of causing errors, an optional
//! source snippet, and an ordered trace stack of (AST kind, Position)
//! frames. The trace stack is built by `with_frame`, which mirrors the
//! original's `Result(const Result<U>&, Trace)` converting constructor: a
//! parent call pushes its own frame onto a child's error before forwarding
//! it, so the final diagnostic can show the whole parser invocation chain.

use crate::source::{IndicatorKind, Position, Snippet, SourceManager};
use std::fmt;

/// Which stage raised the error. `Type` is reserved for the (unimplemented)
/// semantic pass and is never produced by this crate's own code, but the
/// variant exists so the error kind enum is the same shape the eventual
/// typechecker would extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Parse,
    Type,
    CodeGeneration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Lexical => "lexical error",
            ErrorKind::Parse => "parse error",
            ErrorKind::Type => "type error",
            ErrorKind::CodeGeneration => "code generation error",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One frame of the parser (or emitter) call stack at the moment an error
/// was raised: which kind of node the caller was in the middle of building,
/// and where.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFrame {
    pub node_kind: String,
    pub position: Position,
}

impl TraceFrame {
    pub fn new(node_kind: impl Into<String>, position: Position) -> Self {
        TraceFrame { node_kind: node_kind.into(), position }
    }
}

impl fmt::Display for TraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "while parsing {} at {}", self.node_kind, self.position)
    }
}

/// A fallible pipeline error: the error side of `ArgonResult<T>`.
#[derive(Debug, Clone)]
pub struct ArgonError {
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: String,
    pub position: Position,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub suggestion: Option<String>,
    pub notes: Vec<String>,
    pub causes: Vec<ArgonError>,
    pub snippet: Option<Snippet>,
    /// Innermost frame first; pushed to by `with_frame` as the error
    /// unwinds up the call stack.
    pub trace: Vec<TraceFrame>,
}

impl ArgonError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        ArgonError {
            kind,
            severity: Severity::Error,
            message: message.into(),
            position,
            expected: None,
            actual: None,
            suggestion: None,
            notes: Vec::new(),
            causes: Vec::new(),
            snippet: None,
            trace: Vec::new(),
        }
    }

    pub fn warning(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        let mut e = ArgonError::new(kind, message, position);
        e.severity = Severity::Warning;
        e
    }

    pub fn with_expected_actual(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_cause(mut self, cause: ArgonError) -> Self {
        self.causes.push(cause);
        self
    }

    pub fn with_snippet_from(mut self, sources: &SourceManager, indicator: IndicatorKind) -> Self {
        self.snippet = sources.build_snippet(
            &self.position.file,
            self.position.line,
            self.position.token_start,
            self.position.token_end,
            indicator,
            self.suggestion.clone(),
        );
        self
    }

    /// The propagation primitive: the parent pushes its own frame onto
    /// the child error's trace before forwarding it. The pushed frame
    /// becomes the new innermost-but-one entry; the original failure site
    /// (pushed by whoever first raised the error) always stays at index 0.
    pub fn with_frame(mut self, frame: TraceFrame) -> Self {
        self.trace.push(frame);
        self
    }

    /// Renders the full diagnostic:
    /// `<file>:<line>:<col>: <severity>: <message>` followed by optional
    /// Expected/Actual/Suggestion/Note lines, a source snippet, and a
    /// recursive `Caused by:` chain.
    pub fn formatted_message(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}: {}: {}", self.position, self.severity, self.message));

        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            out.push_str(&format!("\n  Expected: {expected}\n  Actual:   {actual}"));
        }
        if let Some(suggestion) = &self.suggestion {
            out.push_str(&format!("\n  Suggestion: {suggestion}"));
        }
        for note in &self.notes {
            out.push_str(&format!("\n  Note: {note}"));
        }
        if let Some(snippet) = &self.snippet {
            out.push('\n');
            out.push_str(&snippet.to_string());
        }
        for cause in &self.causes {
            out.push_str("\n  Caused by: ");
            out.push_str(&cause.formatted_message());
        }
        out
    }
}

impl fmt::Display for ArgonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted_message())
    }
}

impl std::error::Error for ArgonError {}

pub type ArgonResult<T> = Result<T, ArgonError>;

/// Extension trait giving `Result`/`Option`-style combinators a name that
/// reads the way the call sites in `parser`/`codegen` want them to read:
/// "this recursive call failed; push my frame and forward it".
pub trait WithFrame<T> {
    fn trace(self, node_kind: impl Into<String>, position: Position) -> ArgonResult<T>;
}

impl<T> WithFrame<T> for ArgonResult<T> {
    fn trace(self, node_kind: impl Into<String>, position: Position) -> ArgonResult<T> {
        self.map_err(|e| e.with_frame(TraceFrame::new(node_kind, position)))
    }
}

pub mod helpers {
    //! Constructors for the handful of error shapes raised at dozens of
    //! call sites, so those call sites read as one line instead of
    //! reassembling `ArgonError::new` boilerplate each time.
    use super::*;

    pub fn unexpected_char(ch: char, position: Position) -> ArgonError {
        ArgonError::new(ErrorKind::Lexical, format!("unexpected character '{ch}'"), position)
    }

    pub fn unterminated_string(position: Position) -> ArgonError {
        ArgonError::new(ErrorKind::Lexical, "unterminated string literal", position)
    }

    pub fn unterminated_comment(position: Position) -> ArgonError {
        ArgonError::new(ErrorKind::Lexical, "unterminated block comment", position)
    }

    pub fn invalid_number_literal(lexeme: &str, position: Position) -> ArgonError {
        ArgonError::new(ErrorKind::Lexical, format!("invalid number literal '{lexeme}'"), position)
    }

    pub fn unexpected_token(found: &str, position: Position) -> ArgonError {
        ArgonError::new(ErrorKind::Parse, format!("unexpected token '{found}'"), position)
    }

    pub fn missing_token(expected: &str, found: &str, position: Position) -> ArgonError {
        ArgonError::new(ErrorKind::Parse, format!("expected {expected}, found '{found}'"), position)
            .with_expected_actual(expected.to_owned(), found.to_owned())
    }

    pub fn missing_closing(delim: &str, position: Position) -> ArgonError {
        ArgonError::new(ErrorKind::Parse, format!("missing closing '{delim}'"), position)
    }

    pub fn invalid_statement(position: Position) -> ArgonError {
        ArgonError::new(ErrorKind::Parse, "not a valid statement at the top level", position)
    }

    pub fn internal_compiler_error(message: impl Into<String>, position: Position) -> ArgonError {
        ArgonError::new(ErrorKind::CodeGeneration, message, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_is_empty_on_construction_and_grows_with_each_frame() {
        let err = helpers::unexpected_token(")", Position::new("a.argon", 1, 5));
        assert!(err.trace.is_empty());
        let err = err.with_frame(TraceFrame::new("PrimaryExpression", Position::new("a.argon", 1, 3)));
        assert_eq!(err.trace.len(), 1);
        let err = err.with_frame(TraceFrame::new("CallExpression", Position::new("a.argon", 1, 1)));
        assert_eq!(err.trace.len(), 2);
        assert_eq!(err.trace[0].node_kind, "PrimaryExpression");
    }

    #[test]
    fn formatted_message_includes_expected_actual_and_cause_chain() {
        let cause = helpers::unterminated_string(Position::new("a.argon", 2, 1));
        let err = helpers::missing_token(";", "}", Position::new("a.argon", 1, 10)).with_cause(cause);
        let rendered = err.formatted_message();
        assert!(rendered.contains("Expected: ;"));
        assert!(rendered.contains("Actual:   }"));
        assert!(rendered.contains("Caused by:"));
    }
}
