//! The lexer: a single-pass, deterministic scanner over the whole source
//! text that produces a finite token vector terminated by an `End` token,
//! or the first lexical error encountered.
//!
//! Grounded on the original scanning policy and, for the exact
//! escape/backtick/suffix handling, on
//! `original_source/src/backend/Tokenizer.cpp`.

pub mod token;

use crate::error::{helpers, ArgonResult};
use crate::lexer::token::{lookup_keyword, PrimitiveType, Token, TokenKind};
use crate::source::Position;
use std::str::Chars;

/// Longest-first punctuator table: each entry's lexeme must
/// be tried before any shorter prefix of it. Grouped roughly by first
/// character so `scan_operator` can narrow quickly, but the list itself is
/// what enforces "longest match wins" — it is walked in order and the
/// first matching prefix of the remaining input wins.
const PUNCTUATORS: &[(&str, TokenKind)] = &[
    ("||>=", TokenKind::MapPipeAssign),
    ("||>", TokenKind::MapPipe),
    ("|>=", TokenKind::PipeAssign),
    ("|>", TokenKind::Pipe),
    ("==", TokenKind::Equal),
    ("!=", TokenKind::NotEqual),
    (">=", TokenKind::GreaterEqual),
    ("<=", TokenKind::LessEqual),
    ("&&", TokenKind::LogicalAnd),
    ("||", TokenKind::LogicalOr),
    ("->", TokenKind::Arrow),
    ("=>", TokenKind::MatchArrow),
    ("::", TokenKind::DoubleColon),
    ("##", TokenKind::DoubleHash),
    ("*<=", TokenKind::ShiftLeftAssign),
    ("*<", TokenKind::ShiftLeft),
    ("*>=", TokenKind::ShiftRightAssign),
    ("*>", TokenKind::ShiftRight),
    ("+=", TokenKind::PlusAssign),
    ("++", TokenKind::Increment),
    ("-=", TokenKind::MinusAssign),
    ("--", TokenKind::Decrement),
    ("*=", TokenKind::StarAssign),
    ("/=", TokenKind::SlashAssign),
    ("%=", TokenKind::PercentAssign),
    ("|=", TokenKind::FilterAssign),
    ("&=", TokenKind::MapAssign),
    ("^=", TokenKind::ReduceAssign),
    ("^^=", TokenKind::AccumulateAssign),
    ("^^", TokenKind::AccumulateRange),
    ("*&=", TokenKind::BitAndAssign),
    ("*&", TokenKind::BitAnd),
    ("*|=", TokenKind::BitOrAssign),
    ("*|", TokenKind::BitOr),
    ("*^=", TokenKind::BitXorAssign),
    ("*^", TokenKind::BitXor),
    ("*~", TokenKind::BitNot),
    ("...", TokenKind::DotDotDot),
];

/// Single-character fallbacks, tried only once every multi-character
/// punctuator above has failed to match.
fn single_char(ch: char) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match ch {
        '+' => Plus,
        '-' => Minus,
        '*' => Star,
        '/' => Slash,
        '%' => Percent,
        '=' => Assign,
        '<' => Less,
        '>' => Greater,
        '!' => LogicalNot,
        '&' => MapRange,
        '|' => FilterRange,
        '^' => ReduceRange,
        '~' => Ownership,
        '(' => LeftParen,
        ')' => RightParen,
        '{' => LeftBrace,
        '}' => RightBrace,
        '[' => LeftBracket,
        ']' => RightBracket,
        ';' => Semicolon,
        ':' => Colon,
        ',' => Comma,
        '.' => Dot,
        '?' => QuestionMark,
        '#' => Hash,
        '$' => Dollar,
        _ => return None,
    })
}

struct Scanner<'a> {
    file: String,
    chars: Chars<'a>,
    peeked: Vec<char>,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(file: &str, source: &'a str) -> Self {
        Scanner {
            file: file.to_owned(),
            chars: source.chars(),
            peeked: Vec::new(),
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn peek_at(&mut self, n: usize) -> Option<char> {
        while self.peeked.len() <= n {
            match self.chars.next() {
                Some(c) => self.peeked.push(c),
                None => return None,
            }
        }
        self.peeked.get(n).copied()
    }

    fn peek(&mut self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek2(&mut self) -> Option<char> {
        self.peek_at(1)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = if self.peeked.is_empty() { self.chars.next() } else { Some(self.peeked.remove(0)) };
        if let Some(c) = ch {
            match c {
                '\n' => {
                    self.line += 1;
                    self.column = 1;
                }
                '\t' => self.column += 4,
                _ => self.column += 1,
            }
        }
        ch
    }

    fn position(&self) -> Position {
        Position::new(self.file.clone(), self.line, self.column)
    }

    fn rest_starts_with(&mut self, text: &str) -> bool {
        for (i, expected) in text.chars().enumerate() {
            if self.peek_at(i) != Some(expected) {
                return false;
            }
        }
        true
    }

    fn consume_str(&mut self, text: &str) {
        for _ in text.chars() {
            self.advance();
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> ArgonResult<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek2() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek2() == Some('*') => {
                    let start = self.position();
                    self.advance();
                    self.advance();
                    loop {
                        match self.peek() {
                            None => return Err(helpers::unterminated_comment(start)),
                            Some('*') if self.peek2() == Some('/') => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            _ => {
                                self.advance();
                            }
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn scan_string(&mut self) -> ArgonResult<Token> {
        let start = self.position();
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.advance() {
                None => return Err(helpers::unterminated_string(start.clone())),
                Some('"') => break,
                Some('\\') => value.push(self.scan_escape(&start)?),
                Some(c) => value.push(c),
            }
        }
        Ok(Token::new(TokenKind::StringLiteral(value.clone()), format!("\"{value}\""), start))
    }

    fn scan_char(&mut self) -> ArgonResult<Token> {
        let start = self.position();
        self.advance(); // opening quote
        let ch = match self.advance() {
            None => return Err(helpers::unterminated_string(start.clone())),
            Some('\\') => self.scan_escape(&start)?,
            Some(c) => c,
        };
        match self.advance() {
            Some('\'') => {}
            _ => {
                return Err(helpers::invalid_number_literal("char literal", start)
                    .with_note("a char literal must contain exactly one character"))
            }
        }
        Ok(Token::new(TokenKind::CharLiteral(ch), format!("'{ch}'"), start))
    }

    fn scan_escape(&mut self, start: &Position) -> ArgonResult<char> {
        match self.advance() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('0') => Ok('\0'),
            Some('\\') => Ok('\\'),
            Some('"') => Ok('"'),
            Some('\'') => Ok('\''),
            Some(other) => Ok(other),
            None => Err(helpers::unterminated_string(start.clone())),
        }
    }

    fn scan_number(&mut self) -> ArgonResult<Token> {
        let start = self.position();
        let mut digits = String::new();
        let mut is_float = false;

        self.consume_digits(&mut digits);

        if self.peek() == Some('.') && self.peek2().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            is_float = true;
            digits.push('.');
            self.advance();
            self.consume_digits(&mut digits);
            if self.peek() == Some('.') {
                return Err(helpers::invalid_number_literal(&digits, start));
            }
        }

        let suffix = self.scan_optional_suffix();

        if is_float {
            let ty = suffix
                .and_then(|s| PrimitiveType::from_keyword(&s))
                .filter(|t| t.is_float())
                .unwrap_or_else(PrimitiveType::default_float);
            let value: f64 = digits
                .parse()
                .map_err(|_| helpers::invalid_number_literal(&digits, start.clone()))?;
            let lexeme = suffix.map(|s| format!("{digits}{s}")).unwrap_or_else(|| digits.clone());
            Ok(Token::new(TokenKind::FloatLiteral { text: digits, value, ty }, lexeme, start))
        } else {
            let ty = suffix
                .and_then(|s| PrimitiveType::from_keyword(&s))
                .filter(|t| t.is_integral())
                .unwrap_or_else(PrimitiveType::default_integral);
            let value: i128 = digits
                .parse()
                .map_err(|_| helpers::invalid_number_literal(&digits, start.clone()))?;
            let lexeme = suffix.map(|s| format!("{digits}{s}")).unwrap_or_else(|| digits.clone());
            Ok(Token::new(TokenKind::IntegralLiteral { text: digits, value, ty }, lexeme, start))
        }
    }

    /// Consumes a run of ASCII digits, silently skipping backticks used for
    /// digit-grouping (`1`000`000`).
    fn consume_digits(&mut self, out: &mut String) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                out.push(c);
                self.advance();
            } else if c == '`' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// An explicit width suffix directly following the digits, with no
    /// intervening whitespace: `i8`, `i16`, ..., `f128`. Only consumed if
    /// it is in fact one of the known suffix spellings; otherwise the
    /// lookahead is not committed (so `1.to_string()`-shaped things, if
    /// the language ever grew them, wouldn't misparse — though the
    /// current grammar has no such call).
    fn scan_optional_suffix(&mut self) -> Option<String> {
        const SUFFIXES: &[&str] = &[
            "i128", "i64", "i32", "i16", "i8", "u128", "u64", "u32", "u16", "u8", "f128", "f64", "f32",
        ];
        for suffix in SUFFIXES {
            if self.rest_starts_with(suffix) {
                let after = self.peek_at(suffix.len());
                let boundary = !after.map(|c| c.is_alphanumeric() || c == '_').unwrap_or(false);
                if boundary {
                    self.consume_str(suffix);
                    return Some((*suffix).to_owned());
                }
            }
        }
        None
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.position();
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || (c == '-' && !text.is_empty()) {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = lookup_keyword(&text).unwrap_or_else(|| TokenKind::Identifier(text.clone()));
        Token::new(kind, text, start)
    }

    fn scan_operator(&mut self) -> ArgonResult<Token> {
        let start = self.position();
        for (text, kind) in PUNCTUATORS {
            if self.rest_starts_with(text) {
                self.consume_str(text);
                return Ok(Token::new(kind.clone(), *text, start));
            }
        }
        let ch = self.peek().expect("scan_operator called at end of input");
        match single_char(ch) {
            Some(kind) => {
                self.advance();
                Ok(Token::new(kind, ch.to_string(), start))
            }
            None => {
                self.advance();
                Err(helpers::unexpected_char(ch, start))
            }
        }
    }

    fn run(mut self) -> ArgonResult<Vec<Token>> {
        loop {
            self.skip_whitespace_and_comments()?;
            let Some(ch) = self.peek() else {
                let end = self.position();
                self.tokens.push(Token::new(TokenKind::End, "", end));
                return Ok(self.tokens);
            };

            let token = if ch == '"' {
                self.scan_string()?
            } else if ch == '\'' {
                self.scan_char()?
            } else if ch.is_ascii_digit() {
                self.scan_number()?
            } else if ch.is_alphabetic() || ch == '_' {
                self.scan_identifier()
            } else {
                self.scan_operator()?
            };
            self.tokens.push(token);
        }
    }
}

/// Tokenizes `source` (attributed to `file` in every emitted `Position`)
/// into a finite token vector terminated by an `End` token. The whole
/// source is scanned eagerly; on the first lexical error the partial
/// token vector is discarded and the error is returned.
pub fn tokenize(file: &str, source: &str) -> ArgonResult<Vec<Token>> {
    Scanner::new(file, source).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::TokenKind::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize("t.argon", src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn skips_whitespace_and_line_comments() {
        assert_eq!(kinds("  // hello\n  42"), vec![
            IntegralLiteral { text: "42".into(), value: 42, ty: PrimitiveType::I32 },
            End
        ]);
    }

    #[test]
    fn block_comments_span_newlines() {
        let toks = tokenize("t.argon", "/* a\nb */ 1").unwrap();
        assert_eq!(toks[0].position.line, 2);
    }

    #[test]
    fn bitwise_operators_prefer_the_longer_star_spelling() {
        assert_eq!(kinds("*& *| *^ *~ *< *>"), vec![
            BitAnd, BitOr, BitXor, BitNot, ShiftLeft, ShiftRight, End
        ]);
    }

    #[test]
    fn bare_ampersand_and_pipe_are_range_operators_not_bitwise() {
        assert_eq!(kinds("a & b | c ^ d"), vec![
            Identifier("a".into()),
            MapRange,
            Identifier("b".into()),
            FilterRange,
            Identifier("c".into()),
            ReduceRange,
            Identifier("d".into()),
            End
        ]);
    }

    #[test]
    fn numeric_suffix_selects_primitive_width() {
        let toks = tokenize("t.argon", "42i64 3.14f64").unwrap();
        assert_eq!(toks[0].kind, IntegralLiteral { text: "42".into(), value: 42, ty: PrimitiveType::I64 });
        assert_eq!(toks[1].kind, FloatLiteral { text: "3.14".into(), value: 3.14, ty: PrimitiveType::F64 });
    }

    #[test]
    fn missing_suffix_defaults_to_i32_and_f32() {
        let toks = tokenize("t.argon", "42 3.14").unwrap();
        assert_eq!(toks[0].kind, IntegralLiteral { text: "42".into(), value: 42, ty: PrimitiveType::I32 });
        assert_eq!(toks[1].kind, FloatLiteral { text: "3.14".into(), value: 3.14, ty: PrimitiveType::F32 });
    }

    #[test]
    fn backticks_group_digits() {
        let toks = tokenize("t.argon", "1`000`000").unwrap();
        assert_eq!(toks[0].kind, IntegralLiteral { text: "1000000".into(), value: 1_000_000, ty: PrimitiveType::I32 });
    }

    #[test]
    fn identifiers_allow_hyphens_after_the_first_character() {
        assert_eq!(kinds("my-ident"), vec![Identifier("my-ident".into()), End]);
    }

    #[test]
    fn def_and_const_lex_to_the_same_token_kind() {
        assert_eq!(kinds("def const"), vec![Def, Def, End]);
    }

    #[test]
    fn string_and_char_escapes() {
        let toks = tokenize("t.argon", r#" "a\nb" '\t' "#).unwrap();
        assert_eq!(toks[0].kind, StringLiteral("a\nb".into()));
        assert_eq!(toks[1].kind, CharLiteral('\t'));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(tokenize("t.argon", "\"abc").is_err());
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        assert!(tokenize("t.argon", "/* abc").is_err());
    }

    #[test]
    fn char_literal_with_more_than_one_character_is_an_error() {
        assert!(tokenize("t.argon", "'ab'").is_err());
    }

    #[test]
    fn to_and_to_assign_forms() {
        assert_eq!(kinds("0 to 10"), vec![
            IntegralLiteral { text: "0".into(), value: 0, ty: PrimitiveType::I32 },
            To,
            IntegralLiteral { text: "10".into(), value: 10, ty: PrimitiveType::I32 },
            End
        ]);
        // `to=` is recognized by the parser as `To` immediately followed by
        // `Assign`; the lexer does not special-case it.
        assert_eq!(kinds("0 to= 10"), vec![
            IntegralLiteral { text: "0".into(), value: 0, ty: PrimitiveType::I32 },
            To,
            Assign,
            IntegralLiteral { text: "10".into(), value: 10, ty: PrimitiveType::I32 },
            End
        ]);
    }

    #[test]
    fn tabs_advance_column_by_four() {
        let toks = tokenize("t.argon", "\tx").unwrap();
        assert_eq!(toks[0].position.column, 5);
    }
}
