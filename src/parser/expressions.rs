//! Expression parsing: the Pratt-style precedence chain, `assignment`
//! down to `primary`.
//!
//! The three lowest levels (`function_call → indexing → member_access`)
//! are implemented as a single shared postfix loop rather
//! than three strictly separate non-interacting levels: a real chain like
//! `a.b(x)[0].c` mixes all three in arbitrary order, which a hand-written
//! parser only gets right by looping once over whichever postfix form
//! comes next. Grounded on y-lang's `PostfixOp` enum (`src/ast/
//! postfix_op.rs`), which folds `Call`/`Indexing` into one postfix
//! variant family for exactly this reason; `member_access` is folded in
//! alongside them here since it is the third postfix form the grammar
//! lists as its own level.

use super::Parser;
use crate::ast::*;
use crate::error::{helpers, ArgonResult, WithFrame};
use crate::lexer::token::{PrimitiveType, TokenKind};

impl Parser {
    pub(crate) fn expression(&mut self) -> ArgonResult<Expression> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        let target = self.parse_parallel().trace("AssignmentExpression", start.clone())?;

        let op = match self.current_kind() {
            TokenKind::Assign => Some(AssignOp::Assign),
            TokenKind::PlusAssign => Some(AssignOp::Add),
            TokenKind::MinusAssign => Some(AssignOp::Sub),
            TokenKind::StarAssign => Some(AssignOp::Mul),
            TokenKind::SlashAssign => Some(AssignOp::Div),
            TokenKind::PercentAssign => Some(AssignOp::Rem),
            TokenKind::BitAndAssign => Some(AssignOp::BitAnd),
            TokenKind::BitOrAssign => Some(AssignOp::BitOr),
            TokenKind::BitXorAssign => Some(AssignOp::BitXor),
            TokenKind::ShiftLeftAssign => Some(AssignOp::ShiftLeft),
            TokenKind::ShiftRightAssign => Some(AssignOp::ShiftRight),
            TokenKind::FilterAssign => Some(AssignOp::FilterRange),
            TokenKind::MapAssign => Some(AssignOp::MapRange),
            TokenKind::ReduceAssign => Some(AssignOp::ReduceRange),
            TokenKind::PipeAssign => Some(AssignOp::Pipe),
            TokenKind::MapPipeAssign => Some(AssignOp::MapPipe),
            TokenKind::AccumulateAssign => Some(AssignOp::Accumulate),
            _ => None,
        };
        let Some(op) = op else { return Ok(target) };
        self.advance();
        let value = self.parse_assignment().trace("AssignmentExpression", start.clone())?;
        Ok(Expression::Assignment { op, target: Box::new(target), value: Box::new(value), position: start })
    }

    /// `par expr`
    fn parse_parallel(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        if self.take_exact(&TokenKind::Par) {
            let body = self.parse_await().trace("ParallelExpression", start.clone())?;
            return Ok(Expression::Parallel { body: Box::new(body), position: start });
        }
        self.parse_await()
    }

    /// `await expr`
    fn parse_await(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        if self.take_exact(&TokenKind::Await) {
            let future = self.parse_lazy().trace("AwaitExpression", start.clone())?;
            return Ok(Expression::Await { future: Box::new(future), position: start });
        }
        self.parse_lazy()
    }

    /// `$expr` — deferred/lazily-evaluated expression.
    fn parse_lazy(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        if self.take_exact(&TokenKind::Dollar) {
            let body = self.parse_struct_expr().trace("LazyExpression", start.clone())?;
            return Ok(Expression::Lazy { body: Box::new(body), position: start });
        }
        self.parse_struct_expr()
    }

    /// `struct { f: T = e }` / `struct Name { f = e }`, both anonymous and
    /// named forms live at this level since neither is an infix operator.
    fn parse_struct_expr(&mut self) -> ArgonResult<Expression> {
        if self.check(|k| matches!(k, TokenKind::Struct)) {
            return self.parse_struct_literal();
        }
        self.parse_match_expr()
    }

    fn parse_struct_literal(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        self.expect_exact(TokenKind::Struct, "'struct'")?;
        let name = match self.current_kind().clone() {
            TokenKind::Identifier(n) => {
                self.advance();
                Some(n)
            }
            _ => None,
        };
        self.expect_exact(TokenKind::LeftBrace, "'{'")?;
        let mut fields = Vec::new();
        if !self.check(|k| matches!(k, TokenKind::RightBrace)) {
            loop {
                let (fname, _) = self.expect_identifier()?;
                let ty = if self.take_exact(&TokenKind::Colon) { Some(self.parse_type()?) } else { None };
                self.expect_exact(TokenKind::Assign, "'='")?;
                let value = self.expression().trace("StructExpression", start.clone())?;
                fields.push(StructLiteralField { name: fname, ty, value });
                if !self.take_exact(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_exact(TokenKind::RightBrace, "'}'")?;
        Ok(Expression::StructLiteral { name, fields, position: start })
    }

    /// `match (expr) { pat -> body, pat if guard -> body, _ -> body }`
    fn parse_match_expr(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        if !self.take_exact(&TokenKind::Match) {
            let condition = self.parse_filter_range()?;
            if self.check(|k| matches!(k, TokenKind::QuestionMark)) {
                return self.parse_ternary_tail(condition, start);
            }
            return Ok(condition);
        }
        self.expect_exact(TokenKind::LeftParen, "'('")?;
        let scrutinee = self.expression().trace("MatchExpression", start.clone())?;
        self.expect_exact(TokenKind::RightParen, "')'")?;
        self.expect_exact(TokenKind::LeftBrace, "'{'")?;

        let mut arms = Vec::new();
        loop {
            if self.check(|k| matches!(k, TokenKind::RightBrace)) {
                break;
            }
            let arm_pos = self.position();
            let pattern = self.parse_pattern().trace("MatchExpression", start.clone())?;
            let guard = if self.check(|k| matches!(k, TokenKind::If)) {
                self.advance();
                Some(Box::new(self.expression()?))
            } else {
                None
            };
            self.expect_exact(TokenKind::MatchArrow, "'=>'")?;
            let body = self.expression().trace("MatchExpression", start.clone())?;
            arms.push(MatchArm { pattern, guard, body: Box::new(body), position: arm_pos });
            if !self.take_exact(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_exact(TokenKind::RightBrace, "'}'")?;
        Ok(Expression::Match { scrutinee: Box::new(scrutinee), arms, position: start })
    }

    /// `a | b` — range filter operator.
    fn parse_filter_range(&mut self) -> ArgonResult<Expression> {
        self.parse_left_assoc_binary(&[(TokenKind::FilterRange, BinaryOp::FilterRange)], Self::parse_map_range)
    }

    /// `a & b` — range map operator.
    fn parse_map_range(&mut self) -> ArgonResult<Expression> {
        self.parse_left_assoc_binary(&[(TokenKind::MapRange, BinaryOp::MapRange)], Self::parse_reduce_range)
    }

    /// `a ^ b` — range reduce operator.
    fn parse_reduce_range(&mut self) -> ArgonResult<Expression> {
        self.parse_left_assoc_binary(&[(TokenKind::ReduceRange, BinaryOp::ReduceRange)], Self::parse_logical_or)
    }

    fn parse_logical_or(&mut self) -> ArgonResult<Expression> {
        self.parse_left_assoc_binary(&[(TokenKind::LogicalOr, BinaryOp::LogicalOr)], Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> ArgonResult<Expression> {
        self.parse_left_assoc_binary(&[(TokenKind::LogicalAnd, BinaryOp::LogicalAnd)], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        let mut left = self.parse_relational().trace("ComparisonExpression", start.clone())?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Equal => ComparisonOp::Equal,
                TokenKind::NotEqual => ComparisonOp::NotEqual,
                _ => break,
            };
            self.advance();
            let right = self.parse_relational().trace("ComparisonExpression", start.clone())?;
            left = Expression::Comparison { op, left: Box::new(left), right: Box::new(right), position: start.clone() };
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        let mut left = self.parse_bitwise().trace("ComparisonExpression", start.clone())?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Less => ComparisonOp::Less,
                TokenKind::Greater => ComparisonOp::Greater,
                TokenKind::LessEqual => ComparisonOp::LessEqual,
                TokenKind::GreaterEqual => ComparisonOp::GreaterEqual,
                _ => break,
            };
            self.advance();
            let right = self.parse_bitwise().trace("ComparisonExpression", start.clone())?;
            left = Expression::Comparison { op, left: Box::new(left), right: Box::new(right), position: start.clone() };
        }
        Ok(left)
    }

    /// `*&`, `*|`, `*^`
    fn parse_bitwise(&mut self) -> ArgonResult<Expression> {
        self.parse_left_assoc_binary(
            &[
                (TokenKind::BitAnd, BinaryOp::BitAnd),
                (TokenKind::BitOr, BinaryOp::BitOr),
                (TokenKind::BitXor, BinaryOp::BitXor),
            ],
            Self::parse_shift,
        )
    }

    /// `*<`, `*>`
    fn parse_shift(&mut self) -> ArgonResult<Expression> {
        self.parse_left_assoc_binary(
            &[(TokenKind::ShiftLeft, BinaryOp::ShiftLeft), (TokenKind::ShiftRight, BinaryOp::ShiftRight)],
            Self::parse_to,
        )
    }

    /// `a to b` (exclusive) / `a to= b` (inclusive) — `to=` is recognized
    /// as `To` immediately followed by `Assign`, not a distinct lexer
    /// token.
    fn parse_to(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        let lo = self.parse_additive().trace("ToExpression", start.clone())?;
        if !self.take_exact(&TokenKind::To) {
            return Ok(lo);
        }
        let inclusive = self.take_exact(&TokenKind::Assign);
        let hi = self.parse_additive().trace("ToExpression", start.clone())?;
        Ok(Expression::Range { lo: Box::new(lo), hi: Box::new(hi), inclusive, position: start })
    }

    fn parse_additive(&mut self) -> ArgonResult<Expression> {
        self.parse_left_assoc_binary(
            &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)],
            Self::parse_multiplicative,
        )
    }

    fn parse_multiplicative(&mut self) -> ArgonResult<Expression> {
        self.parse_left_assoc_binary(
            &[
                (TokenKind::Star, BinaryOp::Mul),
                (TokenKind::Slash, BinaryOp::Div),
                (TokenKind::Percent, BinaryOp::Rem),
            ],
            Self::parse_bitwise_not,
        )
    }

    /// `*~expr`
    fn parse_bitwise_not(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        if self.take_exact(&TokenKind::BitNot) {
            let operand = self.parse_bitwise_not().trace("UnaryExpression", start.clone())?;
            return Ok(Expression::Unary { op: UnaryOp::BitNot, operand: Box::new(operand), position: start });
        }
        self.parse_logical_not()
    }

    /// `!expr`
    fn parse_logical_not(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        if self.take_exact(&TokenKind::LogicalNot) {
            let operand = self.parse_logical_not().trace("UnaryExpression", start.clone())?;
            return Ok(Expression::Unary { op: UnaryOp::Not, operand: Box::new(operand), position: start });
        }
        self.parse_unary_plus()
    }

    /// `+expr` (a no-op sign; still modeled as a distinct precedence level
    /// to mirror `unary_minus`'s literal-folding twin).
    fn parse_unary_plus(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        if self.take_exact(&TokenKind::Plus) {
            let operand = self.parse_unary_plus().trace("UnaryExpression", start.clone())?;
            return Ok(Expression::Unary { op: UnaryOp::Plus, operand: Box::new(operand), position: start });
        }
        self.parse_unary_minus()
    }

    /// `-expr`. A `-` directly in front of a numeric literal folds into
    /// the literal itself rather than producing a `UnaryExpression` —
    /// `-1` parses as an `IntegralLiteral` with value -1.
    fn parse_unary_minus(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        if self.check(|k| matches!(k, TokenKind::Minus)) {
            if let TokenKind::IntegralLiteral { value, ty, .. } = self.peek_kind_at(1).clone() {
                self.advance();
                self.advance();
                return Ok(Expression::IntegralLiteral { value: -value, ty, position: start });
            }
            if let TokenKind::FloatLiteral { value, ty, .. } = self.peek_kind_at(1).clone() {
                self.advance();
                self.advance();
                return Ok(Expression::FloatLiteral { value: -value, ty, position: start });
            }
            self.advance();
            let operand = self.parse_unary_minus().trace("UnaryExpression", start.clone())?;
            return Ok(Expression::Unary { op: UnaryOp::Neg, operand: Box::new(operand), position: start });
        }
        self.parse_increment()
    }

    /// Prefix `++x`/`--x`; postfix `x++`/`x--` is attached once the
    /// operand beneath has been parsed.
    fn parse_increment(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        if self.check(|k| matches!(k, TokenKind::Increment | TokenKind::Decrement)) {
            let op = if self.take_exact(&TokenKind::Increment) {
                self.advance();
                UnaryOp::PreIncrement
            } else {
                self.advance();
                UnaryOp::PreDecrement
            };
            let operand = self.parse_increment().trace("UnaryExpression", start.clone())?;
            return Ok(Expression::Unary { op, operand: Box::new(operand), position: start });
        }

        let mut operand = self.parse_reference().trace("UnaryExpression", start.clone())?;
        loop {
            if self.take_exact(&TokenKind::Increment) {
                operand = Expression::Unary { op: UnaryOp::PostIncrement, operand: Box::new(operand), position: start.clone() };
            } else if self.take_exact(&TokenKind::Decrement) {
                operand = Expression::Unary { op: UnaryOp::PostDecrement, operand: Box::new(operand), position: start.clone() };
            } else {
                break;
            }
        }
        Ok(operand)
    }

    /// `&expr` / `&&expr` — reference / mutable-reference creation, the
    /// expression-position twin of the `&T`/`&&T` type prefixes.
    fn parse_reference(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        if self.take_exact(&TokenKind::MapRange) {
            let operand = self.parse_reference().trace("UnaryExpression", start.clone())?;
            return Ok(Expression::Unary { op: UnaryOp::Reference, operand: Box::new(operand), position: start });
        }
        if self.take_exact(&TokenKind::LogicalAnd) {
            let operand = self.parse_reference().trace("UnaryExpression", start.clone())?;
            return Ok(Expression::Unary { op: UnaryOp::MutableReference, operand: Box::new(operand), position: start });
        }
        self.parse_deref()
    }

    /// `*expr`
    fn parse_deref(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        if self.take_exact(&TokenKind::Star) {
            let operand = self.parse_deref().trace("UnaryExpression", start.clone())?;
            return Ok(Expression::Unary { op: UnaryOp::Deref, operand: Box::new(operand), position: start });
        }
        // The grammar's standalone "range" level between `deref` and
        // `function_call` has no surface syntax of its own beyond what
        // `to`/`to=` already consume higher up the chain; it passes
        // through unchanged.
        self.parse_postfix()
    }

    /// The combined `function_call → indexing → member_access` postfix
    /// loop (see module doc comment).
    fn parse_postfix(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        let mut expr = self.parse_primary().trace("CallExpression", start.clone())?;
        loop {
            if self.check(|k| matches!(k, TokenKind::Dot)) {
                self.advance();
                let (member, _) = self.expect_identifier()?;
                expr = Expression::MemberAccess { target: Box::new(expr), member, position: start.clone() };
            } else if self.check(|k| matches!(k, TokenKind::LeftParen)) && self.is_callable(&expr) {
                expr = self.parse_call(expr, Vec::new(), start.clone())?;
            } else if self.check(|k| matches!(k, TokenKind::Less)) && self.is_callable(&expr) {
                match self.try_parse_explicit_type_args() {
                    Some(type_args) => {
                        expr = self.parse_call(expr, type_args, start.clone())?;
                    }
                    None => break,
                }
            } else if self.check(|k| matches!(k, TokenKind::LeftBracket)) {
                expr = self.parse_indexing(expr, start.clone())?;
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn is_callable(&self, expr: &Expression) -> bool {
        matches!(expr, Expression::Identifier { .. } | Expression::MemberAccess { .. })
    }

    /// `f<T1, T2>(args)` — bounded look-ahead disambiguation of `<` as a
    /// type-argument opener versus a comparison operator: a generic list
    /// parses successfully iff a balanced `>` is found followed
    /// immediately by `(`; otherwise the parser backtracks and `<` is left
    /// for the comparison level above.
    fn try_parse_explicit_type_args(&mut self) -> Option<Vec<Type>> {
        let checkpoint = self.pos;
        if !self.take_exact(&TokenKind::Less) {
            return None;
        }
        let mut depth = 1i32;
        let mut args = Vec::new();
        loop {
            if depth == 0 {
                break;
            }
            match self.parse_type() {
                Ok(ty) => args.push(ty),
                Err(_) => {
                    self.pos = checkpoint;
                    return None;
                }
            }
            if self.take_exact(&TokenKind::Comma) {
                continue;
            }
            if self.check(|k| matches!(k, TokenKind::Greater)) {
                self.advance();
                depth -= 1;
            } else {
                self.pos = checkpoint;
                return None;
            }
        }
        if self.check(|k| matches!(k, TokenKind::LeftParen)) {
            Some(args)
        } else {
            self.pos = checkpoint;
            None
        }
    }

    fn parse_call(&mut self, callee: Expression, type_args: Vec<Type>, position: crate::source::Position) -> ArgonResult<Expression> {
        self.expect_exact(TokenKind::LeftParen, "'('")?;
        let mut args = Vec::new();
        if !self.check(|k| matches!(k, TokenKind::RightParen)) {
            loop {
                args.push(self.expression().trace("CallExpression", position.clone())?);
                if !self.take_exact(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_exact(TokenKind::RightParen, "')'")?;
        Ok(Expression::Call { callee: Box::new(callee), type_args, args, position })
    }

    /// `a[x]` (single), `a[lo:hi]` (slice), `a[i, j, k]` (multiple).
    fn parse_indexing(&mut self, target: Expression, position: crate::source::Position) -> ArgonResult<Expression> {
        self.expect_exact(TokenKind::LeftBracket, "'['")?;
        let first = self.expression().trace("IndexExpression", position.clone())?;

        if self.take_exact(&TokenKind::Colon) {
            let hi = self.expression().trace("IndexExpression", position.clone())?;
            self.expect_exact(TokenKind::RightBracket, "']'")?;
            return Ok(Expression::Index {
                kind: IndexKind::Slice,
                target: Box::new(target),
                operands: vec![first, hi],
                position,
            });
        }

        if self.check(|k| matches!(k, TokenKind::Comma)) {
            let mut operands = vec![first];
            while self.take_exact(&TokenKind::Comma) {
                operands.push(self.expression().trace("IndexExpression", position.clone())?);
            }
            self.expect_exact(TokenKind::RightBracket, "']'")?;
            return Ok(Expression::Index { kind: IndexKind::Multiple, target: Box::new(target), operands, position });
        }

        self.expect_exact(TokenKind::RightBracket, "']'")?;
        Ok(Expression::Index { kind: IndexKind::Single, target: Box::new(target), operands: vec![first], position })
    }

    /// Identifiers, literals, `(expr)`, array literals, anonymous/named
    /// struct literals are handled one level up (`parse_struct_expr`) so
    /// that a bare `struct { ... }` isn't mistaken for a block; `null`;
    /// lambdas; `try expr`.
    fn parse_primary(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        match self.current_kind().clone() {
            TokenKind::StringLiteral(value) => {
                self.advance();
                Ok(Expression::StringLiteral { value, position: start })
            }
            TokenKind::CharLiteral(value) => {
                self.advance();
                Ok(Expression::CharLiteral { value, position: start })
            }
            TokenKind::IntegralLiteral { value, ty, .. } => {
                self.advance();
                Ok(Expression::IntegralLiteral { value, ty, position: start })
            }
            TokenKind::FloatLiteral { value, ty, .. } => {
                self.advance();
                Ok(Expression::FloatLiteral { value, ty, position: start })
            }
            TokenKind::BooleanLiteral(value) => {
                self.advance();
                Ok(Expression::BooleanLiteral { value, position: start })
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expression::Null { position: start })
            }
            TokenKind::Try => {
                self.advance();
                let body = self.expression().trace("TryExpression", start.clone())?;
                Ok(Expression::Try { body: Box::new(body), position: start })
            }
            TokenKind::LeftParen if self.looks_like_lambda() => self.parse_lambda(),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expression().trace("PrimaryExpression", start)?;
                self.expect_exact(TokenKind::RightParen, "')'")?;
                Ok(inner)
            }
            TokenKind::LeftBracket => self.parse_array_literal(),
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expression::Identifier { name, position: start })
            }
            TokenKind::PrimitiveKeyword(p) => {
                self.advance();
                Ok(Expression::Identifier { name: p.name().to_owned(), position: start })
            }
            _ => Err(helpers::unexpected_token(&self.current().lexeme, start)),
        }
    }

    fn parse_array_literal(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        self.expect_exact(TokenKind::LeftBracket, "'['")?;
        let mut elements = Vec::new();
        if !self.check(|k| matches!(k, TokenKind::RightBracket)) {
            loop {
                elements.push(self.expression().trace("ArrayLiteral", start.clone())?);
                if !self.take_exact(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_exact(TokenKind::RightBracket, "']'")?;
        // Array literals are represented as a `Call` to a synthetic
        // `__array` constructor so the emitter has one lowering path for
        // both array literals and the runtime's initializer-list helper;
        // see codegen::expressions.
        Ok(Expression::Call {
            callee: Box::new(Expression::Identifier { name: "__array".to_owned(), position: start.clone() }),
            type_args: Vec::new(),
            args: elements,
            position: start,
        })
    }

    /// Bounded look-ahead: `(` is a lambda opener iff, scanning forward
    /// from the matching `)`, the next non-type token is `=>`. This keeps
    /// `(expr)` parenthesization and `(a, b) => body` lambdas
    /// unambiguous without a separate grammar rule.
    fn looks_like_lambda(&self) -> bool {
        let mut depth = 0i32;
        let mut i = self.pos;
        loop {
            match self.tokens_kind_at(i) {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        return matches!(self.tokens_kind_at(i + 1), TokenKind::MatchArrow);
                    }
                }
                TokenKind::End => return false,
                _ => {}
            }
            i += 1;
        }
    }

    fn tokens_kind_at(&self, idx: usize) -> &TokenKind {
        let idx = idx.min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    /// `(a: T, b) => body`
    fn parse_lambda(&mut self) -> ArgonResult<Expression> {
        let start = self.position();
        self.expect_exact(TokenKind::LeftParen, "'('")?;
        let mut params = Vec::new();
        if !self.check(|k| matches!(k, TokenKind::RightParen)) {
            loop {
                let (name, _) = self.expect_identifier()?;
                let ty = if self.take_exact(&TokenKind::Colon) { Some(self.parse_type()?) } else { None };
                params.push(LambdaParam { name, ty });
                if !self.take_exact(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_exact(TokenKind::RightParen, "')'")?;
        let return_type = if self.take_exact(&TokenKind::Colon) { Some(self.parse_type()?) } else { None };
        self.expect_exact(TokenKind::MatchArrow, "'=>'")?;
        let body = self.expression().trace("LambdaExpression", start.clone())?;
        Ok(Expression::Lambda { params, return_type, body: Box::new(body), position: start })
    }

    /// Used by pattern parsing for literal/range bounds, which sit below
    /// assignment precedence.
    pub(crate) fn parse_unary_expression(&mut self) -> ArgonResult<Expression> {
        self.parse_unary_minus()
    }

    /// Shared left-associative binary-operator loop: parse one operand
    /// from `next`, then repeatedly consume a matching operator and
    /// another operand from `next`, building a left-leaning tree.
    fn parse_left_assoc_binary(
        &mut self,
        ops: &[(TokenKind, BinaryOp)],
        next: fn(&mut Self) -> ArgonResult<Expression>,
    ) -> ArgonResult<Expression> {
        let start = self.position();
        let mut left = next(self).trace("BinaryExpression", start.clone())?;
        loop {
            let matched = ops.iter().find(|(kind, _)| self.current_kind() == kind).map(|(_, op)| *op);
            let Some(op) = matched else { break };
            self.advance();
            let right = next(self).trace("BinaryExpression", start.clone())?;
            left = Expression::Binary { op, left: Box::new(left), right: Box::new(right), position: start.clone() };
        }
        Ok(left)
    }
}

/// Ternary (`cond ? then : else`) has no dedicated level in the documented
/// precedence chain, but the AST and emitter both carry a `Ternary`
/// expression kind. It is threaded in at assignment-adjacent precedence,
/// the conventional placement, as a thin wrapper parsed from
/// `parse_struct_expr`'s `?` continuation.
impl Parser {
    pub(crate) fn parse_ternary_tail(&mut self, condition: Expression, start: crate::source::Position) -> ArgonResult<Expression> {
        self.expect_exact(TokenKind::QuestionMark, "'?'")?;
        let then_branch = self.expression().trace("TernaryExpression", start.clone())?;
        self.expect_exact(TokenKind::Colon, "':'")?;
        let else_branch = self.expression().trace("TernaryExpression", start.clone())?;
        Ok(Expression::Ternary {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            position: start,
        })
    }
}
