//! Type-expression parsing:
//! `parse_type = parse_sum_type`, sum over `|`-separated intersections,
//! intersection over `&`-separated generic types, generic types wrapping
//! a prefixed type with optional `<args>`/`[size]`, and prefix/array/
//! function/closure/variadic forms underneath.

use super::Parser;
use crate::ast::{Prefix, Type};
use crate::error::{ArgonResult, WithFrame};
use crate::lexer::token::TokenKind;

impl Parser {
    pub(crate) fn parse_type(&mut self) -> ArgonResult<Type> {
        self.parse_sum_type()
    }

    /// `A | B | C`
    fn parse_sum_type(&mut self) -> ArgonResult<Type> {
        let start = self.position();
        let first = self.parse_intersection_type()?;
        if !self.check(|k| matches!(k, TokenKind::FilterRange)) {
            return Ok(first);
        }
        let mut members = vec![first];
        while self.take_exact(&TokenKind::FilterRange) {
            members.push(self.parse_intersection_type().trace("SumType", start.clone())?);
        }
        Ok(Type::Sum { members, position: start })
    }

    /// `A & B & C`
    fn parse_intersection_type(&mut self) -> ArgonResult<Type> {
        let start = self.position();
        let first = self.parse_generic_type()?;
        if !self.check(|k| matches!(k, TokenKind::MapRange)) {
            return Ok(first);
        }
        let mut members = vec![first];
        while self.take_exact(&TokenKind::MapRange) {
            members.push(self.parse_generic_type().trace("IntersectionType", start.clone())?);
        }
        Ok(Type::Intersection { members, position: start })
    }

    /// `Base<Arg1, Arg2>` or `Base[N]`, wrapping a prefixed type.
    fn parse_generic_type(&mut self) -> ArgonResult<Type> {
        let start = self.position();
        let base = self.parse_prefixed_type()?;

        if self.take_exact(&TokenKind::Less) {
            let Type::Identifier { name, .. } = &base else {
                return Ok(base);
            };
            let base_name = name.clone();
            let mut args = Vec::new();
            if !self.check(|k| matches!(k, TokenKind::Greater)) {
                loop {
                    args.push(self.parse_type().trace("GenericType", start.clone())?);
                    if !self.take_exact(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect_exact(TokenKind::Greater, "'>'")?;
            return Ok(Type::Generic { base: base_name, args, position: start });
        }

        if self.take_exact(&TokenKind::LeftBracket) {
            let size_tok = self.expect_integer_literal()?;
            self.expect_exact(TokenKind::RightBracket, "']'")?;
            return Ok(Type::Array { element: Box::new(base), size: size_tok, position: start });
        }

        Ok(base)
    }

    fn expect_integer_literal(&mut self) -> ArgonResult<u64> {
        let pos = self.position();
        match self.current_kind().clone() {
            TokenKind::IntegralLiteral { value, .. } => {
                self.advance();
                Ok(value as u64)
            }
            _ => Err(crate::error::helpers::missing_token("an array size", &self.current().lexeme, pos)),
        }
    }

    /// `*T` (pointer), `~T` (owned), `&T` (reference), `&&T` (mutable
    /// reference), or a bare primary type.
    fn parse_prefixed_type(&mut self) -> ArgonResult<Type> {
        let start = self.position();
        let prefix = match self.current_kind() {
            TokenKind::Star => Some(Prefix::Pointer),
            TokenKind::Ownership => Some(Prefix::Owned),
            TokenKind::LogicalAnd => Some(Prefix::MutableReference),
            TokenKind::MapRange => Some(Prefix::Reference),
            _ => None,
        };
        if let Some(prefix) = prefix {
            self.advance();
            let inner = self.parse_prefixed_type().trace("PrefixedType", start.clone())?;
            return Ok(Type::Prefixed { prefix, inner: Box::new(inner), position: start });
        }
        self.parse_primary_type()
    }

    fn parse_primary_type(&mut self) -> ArgonResult<Type> {
        let start = self.position();
        match self.current_kind().clone() {
            TokenKind::DotDotDot => {
                self.advance();
                let inner = self.parse_type().trace("VariadicType", start.clone())?;
                Ok(Type::Variadic { inner: Box::new(inner), position: start })
            }
            TokenKind::Func => {
                self.advance();
                if self.take_exact(&TokenKind::LeftParen) {
                    let mut params = Vec::new();
                    if !self.check(|k| matches!(k, TokenKind::RightParen)) {
                        loop {
                            params.push(self.parse_type()?);
                            if !self.take_exact(&TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect_exact(TokenKind::RightParen, "')'")?;
                    let ret = self.parse_type().trace("FunctionType", start.clone())?;
                    Ok(Type::Function { params, ret: Box::new(ret), position: start })
                } else {
                    let ret = self.parse_type().trace("ClosureType", start.clone())?;
                    Ok(Type::Closure { ret: Box::new(ret), position: start })
                }
            }
            TokenKind::PrimitiveKeyword(p) => {
                self.advance();
                Ok(Type::identifier(p.name(), start))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Type::identifier(name, start))
            }
            _ => Err(crate::error::helpers::missing_token("a type", &self.current().lexeme, start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_ty(src: &str) -> Type {
        let toks = tokenize("t.argon", src).unwrap();
        let mut p = Parser::new(toks);
        p.parse_type().unwrap()
    }

    #[test]
    fn generic_type_parses_type_arguments() {
        let ty = parse_ty("Vec<i32>");
        assert!(matches!(ty, Type::Generic { ref base, ref args, .. } if base == "Vec" && args.len() == 1));
    }

    #[test]
    fn sum_and_intersection_bind_as_documented() {
        let ty = parse_ty("A | B & C");
        match ty {
            Type::Sum { members, .. } => {
                assert_eq!(members.len(), 2);
                assert!(matches!(&members[1], Type::Intersection { members, .. } if members.len() == 2));
            }
            other => panic!("expected sum type, got {other:?}"),
        }
    }

    #[test]
    fn prefixed_forms() {
        assert!(matches!(parse_ty("*i32"), Type::Prefixed { prefix: Prefix::Pointer, .. }));
        assert!(matches!(parse_ty("~i32"), Type::Prefixed { prefix: Prefix::Owned, .. }));
        assert!(matches!(parse_ty("&i32"), Type::Prefixed { prefix: Prefix::Reference, .. }));
        assert!(matches!(parse_ty("&&i32"), Type::Prefixed { prefix: Prefix::MutableReference, .. }));
    }

    #[test]
    fn array_type_with_size() {
        assert!(matches!(parse_ty("i32[4]"), Type::Array { size: 4, .. }));
    }

    #[test]
    fn function_and_closure_types() {
        assert!(matches!(parse_ty("func(i32, i32) i32"), Type::Function { .. }));
        assert!(matches!(parse_ty("func i32"), Type::Closure { .. }));
    }

    #[test]
    fn variadic_type() {
        assert!(matches!(parse_ty("...i32"), Type::Variadic { .. }));
    }
}
