//! Source manager: lazy, idempotent file loading plus diagnostic snippet
//! construction.
//!
//! Grounded on the "lazy/idempotent file loader keyed by file name" design
//! note: every cache here lives on a `SourceManager` instance, never behind
//! a process-wide global, so a single compilation pipeline can be built,
//! used, and dropped without leaking state into the next one.

use std::collections::HashMap;
use std::fmt;

/// A single point in a source file: 1-based line and column, plus enough
/// context to render a diagnostic without going back to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub file: String,
    pub line: usize,
    pub column: usize,
    /// The full text of `line`, if the source manager had it loaded at the
    /// time this position was recorded.
    pub source_line: Option<String>,
    /// Column at which the originating token starts (may equal `column`).
    pub token_start: usize,
    /// Column one past the end of the originating token.
    pub token_end: usize,
}

impl Position {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Position {
            file: file.into(),
            line,
            column,
            source_line: None,
            token_start: column,
            token_end: column,
        }
    }

    /// A position with no useful file context, used by synthesized nodes
    /// that do not trace back to user-written text.
    pub fn synthetic() -> Self {
        Position::new("<synthesized>", 0, 0)
    }

    pub fn with_token_span(mut self, start: usize, end: usize) -> Self {
        self.token_start = start;
        self.token_end = end;
        self
    }

    pub fn with_source_line(mut self, line: impl Into<String>) -> Self {
        self.source_line = Some(line.into());
        self
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A half-open-in-spirit (but inclusive on both ends, per source-language
/// convention) pair of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }
}

/// The shape of the underline drawn beneath a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    /// `^^^^^`
    Caret,
    /// `~~~~~`
    Tilde,
    /// `----->`
    Arrow,
    /// `{{{{{`, used for brace-delimited spans (struct/array literals).
    Brace,
}

impl IndicatorKind {
    fn glyph(self) -> char {
        match self {
            IndicatorKind::Caret => '^',
            IndicatorKind::Tilde => '~',
            IndicatorKind::Arrow => '-',
            IndicatorKind::Brace => '{',
        }
    }
}

/// A fully rendered diagnostic context: the offending line plus its
/// surrounding window and an underline.
#[derive(Debug, Clone)]
pub struct Snippet {
    pub file: String,
    pub line: usize,
    pub line_text: String,
    pub column_start: usize,
    pub column_end: usize,
    pub indicator: IndicatorKind,
    pub highlight_message: Option<String>,
    pub context_before: Vec<(usize, String)>,
    pub context_after: Vec<(usize, String)>,
}

impl Snippet {
    fn indicator_string(&self) -> String {
        let width = self.column_end.saturating_sub(self.column_start).max(1);
        let mut s: String = std::iter::repeat(self.indicator.glyph()).take(width).collect();
        if self.indicator == IndicatorKind::Arrow {
            s.push('>');
        }
        s
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, text) in &self.context_before {
            writeln!(f, "{n:>4} | {text}")?;
        }
        writeln!(f, "{:>4} | {}", self.line, self.line_text)?;
        let pad = " ".repeat(self.column_start.saturating_sub(1));
        let indicator = self.indicator_string();
        match &self.highlight_message {
            Some(msg) => write!(f, "     | {pad}{indicator} {msg}")?,
            None => write!(f, "     | {pad}{indicator}")?,
        }
        for (n, text) in &self.context_after {
            write!(f, "\n{n:>4} | {text}")?;
        }
        Ok(())
    }
}

/// Number of context lines shown before and after the highlighted line.
const CONTEXT_WINDOW: usize = 3;

/// Loads and caches source files by name, and builds diagnostic snippets
/// from the cache. A missing file never raises an error here: callers
/// that cannot find a snippet simply omit it from their diagnostic.
#[derive(Debug, Default)]
pub struct SourceManager {
    files: HashMap<String, Vec<String>>,
}

impl SourceManager {
    pub fn new() -> Self {
        SourceManager { files: HashMap::new() }
    }

    /// Registers source text under `name`, splitting it into lines. Calling
    /// this twice for the same name overwrites the previous content
    /// (idempotent from the caller's point of view: the manager always
    /// reflects the most recently loaded content for that name).
    pub fn load(&mut self, name: impl Into<String>, text: &str) {
        let lines = text.lines().map(str::to_owned).collect();
        self.files.insert(name.into(), lines);
    }

    /// Loads `path` from disk if it is not already cached under that name.
    /// Returns `false` (not an error) if the file cannot be read.
    pub fn load_from_disk(&mut self, path: &str) -> bool {
        if self.files.contains_key(path) {
            return true;
        }
        match std::fs::read_to_string(path) {
            Ok(text) => {
                self.load(path, &text);
                true
            }
            Err(_) => false,
        }
    }

    /// 1-based line lookup.
    pub fn get_line(&self, file: &str, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.files.get(file).and_then(|lines| lines.get(line - 1)).map(String::as_str)
    }

    /// Up to `CONTEXT_WINDOW` lines strictly before `line`, oldest first.
    pub fn context_before(&self, file: &str, line: usize) -> Vec<(usize, String)> {
        let start = line.saturating_sub(CONTEXT_WINDOW).max(1);
        (start..line)
            .filter_map(|n| self.get_line(file, n).map(|text| (n, text.to_owned())))
            .collect()
    }

    /// Up to `CONTEXT_WINDOW` lines strictly after `line`.
    pub fn context_after(&self, file: &str, line: usize) -> Vec<(usize, String)> {
        ((line + 1)..=(line + CONTEXT_WINDOW))
            .filter_map(|n| self.get_line(file, n).map(|text| (n, text.to_owned())))
            .collect()
    }

    /// Builds a full snippet for the given file/line/column range, or
    /// `None` if the file/line isn't cached (not an error at this layer).
    pub fn build_snippet(
        &self,
        file: &str,
        line: usize,
        column_start: usize,
        column_end: usize,
        indicator: IndicatorKind,
        highlight_message: Option<String>,
    ) -> Option<Snippet> {
        let line_text = self.get_line(file, line)?.to_owned();
        Some(Snippet {
            file: file.to_owned(),
            line,
            line_text,
            column_start,
            column_end,
            indicator,
            highlight_message,
            context_before: self.context_before(file, line),
            context_after: self.context_after(file, line),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_loaded_source_by_name() {
        let mut mgr = SourceManager::new();
        mgr.load("a.argon", "one\ntwo\nthree\n");
        assert_eq!(mgr.get_line("a.argon", 1), Some("one"));
        assert_eq!(mgr.get_line("a.argon", 3), Some("three"));
        assert_eq!(mgr.get_line("a.argon", 4), None);
    }

    #[test]
    fn missing_file_yields_no_snippet_not_an_error() {
        let mgr = SourceManager::new();
        assert!(mgr.build_snippet("nope.argon", 1, 1, 2, IndicatorKind::Caret, None).is_none());
    }

    #[test]
    fn context_window_is_bounded_at_file_edges() {
        let mut mgr = SourceManager::new();
        mgr.load("a.argon", "one\ntwo\nthree\n");
        assert_eq!(mgr.context_before("a.argon", 1), vec![]);
        assert_eq!(mgr.context_after("a.argon", 3), vec![]);
        assert_eq!(mgr.context_before("a.argon", 2), vec![(1, "one".to_owned())]);
    }

    #[test]
    fn snippet_renders_indicator_under_the_span() {
        let mut mgr = SourceManager::new();
        mgr.load("a.argon", "let x = 1 + ;\n");
        let snippet = mgr
            .build_snippet("a.argon", 1, 13, 14, IndicatorKind::Caret, Some("expected expression".to_owned()))
            .unwrap();
        let rendered = snippet.to_string();
        assert!(rendered.contains("let x = 1 + ;"));
        assert!(rendered.contains('^'));
        assert!(rendered.contains("expected expression"));
    }
}
