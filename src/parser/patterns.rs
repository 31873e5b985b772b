//! Pattern parsing: wildcard, literal, identifier-with-guard, array
//! (optional rest), struct, constructor, type pattern, and range pattern.

use super::Parser;
use crate::ast::{FieldPattern, Pattern};
use crate::error::{helpers, ArgonResult, WithFrame};
use crate::lexer::token::TokenKind;

impl Parser {
    pub(crate) fn parse_pattern(&mut self) -> ArgonResult<Pattern> {
        let start = self.position();
        match self.current_kind().clone() {
            TokenKind::Identifier(name) if name == "_" => {
                self.advance();
                Ok(Pattern::Wildcard { position: start })
            }
            TokenKind::LeftBracket => self.parse_array_pattern(),
            TokenKind::LeftBrace => self.parse_struct_pattern(),
            TokenKind::PrimitiveKeyword(p) if matches!(self.peek_kind_at(1), TokenKind::LeftParen) => {
                self.advance();
                self.advance();
                let binding = if self.check(|k| matches!(k, TokenKind::RightParen)) {
                    None
                } else {
                    Some(self.expect_identifier()?.0)
                };
                self.expect_exact(TokenKind::RightParen, "')'")?;
                Ok(Pattern::TypePattern { ty: crate::ast::Type::identifier(p.name(), start.clone()), binding, position: start })
            }
            TokenKind::Identifier(name)
                if matches!(self.peek_kind_at(1), TokenKind::DoubleColon | TokenKind::LeftParen) =>
            {
                self.parse_constructor_pattern(name)
            }
            TokenKind::Identifier(name) => {
                self.advance();
                let guard = if self.take_exact(&TokenKind::LogicalAnd) {
                    Some(Box::new(self.expression().trace("IdentifierPattern", start.clone())?))
                } else {
                    None
                };
                Ok(Pattern::Identifier { name, guard, position: start })
            }
            _ => self.parse_literal_or_range_pattern(),
        }
    }

    fn parse_constructor_pattern(&mut self, first: String) -> ArgonResult<Pattern> {
        let start = self.position();
        self.advance();
        let mut path = first;
        while self.take_exact(&TokenKind::DoubleColon) {
            path.push_str("::");
            path.push_str(&self.expect_identifier()?.0);
        }
        let mut args = Vec::new();
        if self.take_exact(&TokenKind::LeftParen) {
            if !self.check(|k| matches!(k, TokenKind::RightParen)) {
                loop {
                    args.push(self.parse_pattern().trace("ConstructorPattern", start.clone())?);
                    if !self.take_exact(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect_exact(TokenKind::RightParen, "')'")?;
        }
        Ok(Pattern::Constructor { path, args, position: start })
    }

    /// `[p1, p2, ...tail]`
    fn parse_array_pattern(&mut self) -> ArgonResult<Pattern> {
        let start = self.position();
        self.expect_exact(TokenKind::LeftBracket, "'['")?;
        let mut elements = Vec::new();
        let mut rest = None;
        if !self.check(|k| matches!(k, TokenKind::RightBracket)) {
            loop {
                if self.take_exact(&TokenKind::DotDotDot) {
                    rest = Some(self.expect_identifier()?.0);
                    break;
                }
                elements.push(self.parse_pattern().trace("ArrayPattern", start.clone())?);
                if !self.take_exact(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_exact(TokenKind::RightBracket, "']'")?;
        Ok(Pattern::Array { elements, rest, position: start })
    }

    /// `{ f1, f2: sub }`
    fn parse_struct_pattern(&mut self) -> ArgonResult<Pattern> {
        let start = self.position();
        self.expect_exact(TokenKind::LeftBrace, "'{'")?;
        let mut fields = Vec::new();
        if !self.check(|k| matches!(k, TokenKind::RightBrace)) {
            loop {
                let (name, fpos) = self.expect_identifier()?;
                let sub_pattern = if self.take_exact(&TokenKind::Colon) {
                    Some(Box::new(self.parse_pattern().trace("StructPattern", start.clone())?))
                } else {
                    None
                };
                fields.push(FieldPattern { name, sub_pattern, position: fpos });
                if !self.take_exact(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_exact(TokenKind::RightBrace, "'}'")?;
        Ok(Pattern::Struct { fields, position: start })
    }

    /// A literal value used as an equality test, or (if followed by `to`/
    /// `to=`) the lower bound of a range pattern.
    fn parse_literal_or_range_pattern(&mut self) -> ArgonResult<Pattern> {
        let start = self.position();
        let lo = self.parse_unary_expression().trace("LiteralPattern", start.clone())?;

        if self.take_exact(&TokenKind::To) {
            let inclusive = self.take_exact(&TokenKind::Assign);
            let hi = self.parse_unary_expression().trace("RangePattern", start.clone())?;
            return Ok(Pattern::Range { lo: Box::new(lo), hi: Box::new(hi), inclusive, position: start });
        }

        match &lo {
            crate::ast::Expression::StringLiteral { .. }
            | crate::ast::Expression::CharLiteral { .. }
            | crate::ast::Expression::IntegralLiteral { .. }
            | crate::ast::Expression::FloatLiteral { .. }
            | crate::ast::Expression::BooleanLiteral { .. }
            | crate::ast::Expression::Unary { .. } => {
                Ok(Pattern::Literal { value: Box::new(lo), position: start })
            }
            _ => Err(helpers::unexpected_token(&self.current().lexeme, start)),
        }
    }
}
