//! The parser: a hand-written recursive-descent parser with an explicit
//! Pratt-style precedence chain, producing a `Program` (the AST rooted at
//! an ordered list of top-level declarations).
//!
//! Grounded on y-lang's `src/ast/parser.rs` + per-node `from_pair`
//! dispatch pattern, generalized from pest's grammar-driven `Pair`
//! traversal to a cursor over our own `Vec<Token>` — this is a
//! *hand-written* recursive descent, not a grammar-generator one, so the
//! cursor (`tokens`/`pos`) replaces `pest::iterators::Pairs` as the thing
//! every `parse_*` method threads through.

mod declarations;
mod expressions;
mod patterns;
mod statements;
mod types;

use crate::ast::{Program, Statement};
use crate::error::{helpers, ArgonResult, WithFrame};
use crate::lexer::token::{Token, TokenKind};
use crate::source::Position;

/// A cursor over the token vector produced by the lexer. `pos` never
/// advances past the final `End` token, so `current()` is always valid.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::End)));
        Parser { tokens, pos: 0 }
    }

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(crate) fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    pub(crate) fn peek_kind_at(&self, offset: usize) -> &TokenKind {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    pub(crate) fn position(&self) -> Position {
        self.current().position.clone()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::End)
    }

    /// Consumes and returns the current token, advancing the cursor
    /// (staying put once the `End` token is reached).
    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn check(&self, pred: impl Fn(&TokenKind) -> bool) -> bool {
        pred(self.current_kind())
    }

    /// Consumes the current token iff it satisfies `pred`.
    pub(crate) fn take_if(&mut self, pred: impl Fn(&TokenKind) -> bool) -> Option<Token> {
        if pred(self.current_kind()) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consumes the current token iff it is exactly `kind` (payload-bearing
    /// kinds must use `take_if`/`expect_identifier` instead, since equality
    /// there would also have to match the payload).
    pub(crate) fn take_exact(&mut self, kind: &TokenKind) -> bool {
        if self.current_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_exact(&mut self, kind: TokenKind, what: &str) -> ArgonResult<Token> {
        if self.current_kind() == &kind {
            Ok(self.advance())
        } else {
            Err(helpers::missing_token(what, &self.current().lexeme, self.position()))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> ArgonResult<(String, Position)> {
        let pos = self.position();
        match self.current_kind().clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok((name, pos))
            }
            _ => Err(helpers::missing_token("identifier", &self.current().lexeme, pos)),
        }
    }

    /// Error-recovery sync point: advances tokens until the next `;` or
    /// `}` (consuming it) or `End`, then stops. Called once by the entry
    /// point after the first error.
    pub(crate) fn synchronize(&mut self) {
        loop {
            match self.current_kind() {
                TokenKind::End => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::RightBrace => {
                    self.advance();
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}

/// Parses the whole token vector into a `Program`, enforcing the
/// top-level restriction and the "exactly one `main`" invariant after a
/// fully successful parse.
///
/// On the first error, frames are already attached by the recursive
/// descent (`WithFrame::trace`); this entry point does not call
/// `synchronize()` itself — each caller that wants best-effort recovery
/// across multiple top-level declarations invokes it explicitly, mirroring
/// y-lang's "collect what you can, stop at the first hard error for
/// definitive output" posture for a single-file compiler invocation.
pub fn parse_program(file: &str, tokens: Vec<Token>) -> ArgonResult<Program> {
    let mut parser = Parser::new(tokens);
    let mut declarations = Vec::new();

    while !parser.is_at_end() {
        let pos = parser.position();
        let decl = parser.top_level_declaration().trace("Program", pos)?;
        if !decl.allowed_at_top_level() {
            return Err(helpers::invalid_statement(decl.position().clone()));
        }
        declarations.push(decl);
    }

    let program = Program::new(file, declarations);
    match program.main_function_count() {
        1 => Ok(program),
        0 => Err(helpers::missing_token("a top-level `func main`", "end of file", Position::new(file, 0, 0))),
        n => Err(helpers::missing_token(
            "exactly one top-level `func main`",
            &format!("{n} definitions"),
            Position::new(file, 0, 0),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(src: &str) -> ArgonResult<Program> {
        let tokens = tokenize("t.argon", src).unwrap();
        parse_program("t.argon", tokens)
    }

    #[test]
    fn rejects_program_with_no_main() {
        assert!(parse("func f() i32 -> 1;").is_err());
    }

    #[test]
    fn rejects_program_with_two_mains() {
        let src = "func main() i32 -> 0; func main() i32 -> 1;";
        assert!(parse(src).is_err());
    }

    #[test]
    fn accepts_single_main() {
        let program = parse("func main() i32 -> 0;").unwrap();
        assert_eq!(program.main_function_count(), 1);
    }

    #[test]
    fn failing_parse_has_non_empty_trace() {
        let tokens = tokenize("t.argon", "func main( i32 -> 0;").unwrap();
        let err = parse_program("t.argon", tokens).unwrap_err();
        assert!(!err.trace.is_empty());
    }
}
