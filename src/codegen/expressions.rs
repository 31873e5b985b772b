//! Expression lowering: operators, calls, indexing, lambdas, struct
//! literals, and the parallel/await/lazy/try wrappers.

use std::fmt::Write as _;

use super::CodeGenerator;
use crate::ast::{AssignOp, BinaryOp, ComparisonOp, Expression, StructLiteralField, UnaryOp};
use crate::error::ArgonResult;

impl CodeGenerator {
    pub(crate) fn emit_expression(&mut self, expr: &Expression) -> ArgonResult<String> {
        Ok(match expr {
            Expression::StringLiteral { value, .. } => {
                self.dependencies.insert("string");
                format!("{value:?}")
            }
            Expression::CharLiteral { value, .. } => format!("{value:?}"),
            Expression::IntegralLiteral { value, ty, .. } => {
                if matches!(ty, crate::lexer::token::PrimitiveType::I128 | crate::lexer::token::PrimitiveType::U128) {
                    self.dependencies.insert("i128");
                }
                format!("{value}")
            }
            Expression::FloatLiteral { value, .. } => format_float(*value),
            Expression::BooleanLiteral { value, .. } => value.to_string(),
            Expression::Null { .. } => "nullptr".to_owned(),
            Expression::Identifier { name, .. } => name.clone(),

            Expression::Binary { op, left, right, .. } => self.emit_binary(*op, left, right)?,
            Expression::Unary { op, operand, .. } => self.emit_unary(*op, operand)?,
            Expression::Comparison { op, left, right, .. } => {
                let l = self.emit_expression(left)?;
                let r = self.emit_expression(right)?;
                format!("({l} {} {r})", comparison_symbol(*op))
            }
            Expression::Assignment { op, target, value, .. } => self.emit_assignment(*op, target, value)?,

            Expression::Call { callee, type_args, args, .. } => self.emit_call(callee, type_args, args)?,
            Expression::MemberAccess { target, member, .. } => {
                let t = self.emit_expression(target)?;
                format!("{t}.{member}")
            }
            Expression::Index { kind, target, operands, .. } => self.emit_index(*kind, target, operands)?,
            Expression::Range { lo, hi, inclusive, .. } => {
                self.dependencies.insert("ranges");
                let lo_t = self.emit_expression(lo)?;
                let hi_t = self.emit_expression(hi)?;
                if *inclusive {
                    format!("std::views::iota({lo_t}, ({hi_t}) + 1)")
                } else {
                    format!("std::views::iota({lo_t}, {hi_t})")
                }
            }

            Expression::Lambda { params, return_type, body, .. } => self.emit_lambda(params, return_type.as_ref(), body)?,
            Expression::Match { scrutinee, arms, .. } => {
                if self.is_statement_context {
                    self.emit_match(scrutinee, arms, false)?
                } else {
                    let body = self.emit_match(scrutinee, arms, true)?;
                    format!("([&]() -> auto {{\n{body}}}())")
                }
            }
            Expression::Ternary { condition, then_branch, else_branch, .. } => {
                let c = self.emit_expression(condition)?;
                let t = self.emit_expression(then_branch)?;
                let e = self.emit_expression(else_branch)?;
                format!("({c} ? {t} : {e})")
            }
            Expression::StructLiteral { name, fields, .. } => self.emit_struct_literal(name.as_deref(), fields)?,

            Expression::Parallel { body, .. } => {
                self.dependencies.insert("futures");
                let b = self.with_expression_context(|g| g.emit_expression(body))?;
                format!("argon::par([&]() {{ return {b}; }})")
            }
            Expression::Await { future, .. } => {
                let f = self.emit_expression(future)?;
                format!("{f}.get()")
            }
            Expression::Lazy { body, .. } => {
                let b = self.with_expression_context(|g| g.emit_expression(body))?;
                format!("[&]() {{ return {b}; }}")
            }
            Expression::Try { body, .. } => {
                self.dependencies.insert("try");
                let b = self.with_expression_context(|g| g.emit_expression(body))?;
                format!("argon::try_catch([&]() {{ return {b}; }})")
            }
        })
    }

    fn emit_binary(&mut self, op: BinaryOp, left: &Expression, right: &Expression) -> ArgonResult<String> {
        let l = self.emit_expression(left)?;
        let r = self.emit_expression(right)?;
        Ok(match op {
            BinaryOp::Add => format!("({l} + {r})"),
            BinaryOp::Sub => format!("({l} - {r})"),
            BinaryOp::Mul => format!("({l} * {r})"),
            BinaryOp::Div => format!("({l} / {r})"),
            BinaryOp::Rem => format!("({l} % {r})"),
            BinaryOp::LogicalAnd => format!("({l} && {r})"),
            BinaryOp::LogicalOr => format!("({l} || {r})"),
            BinaryOp::BitAnd => format!("({l} & {r})"),
            BinaryOp::BitOr => format!("({l} | {r})"),
            BinaryOp::BitXor => format!("({l} ^ {r})"),
            BinaryOp::ShiftLeft => format!("({l} << {r})"),
            BinaryOp::ShiftRight => format!("({l} >> {r})"),
            // The ranged filter/map/reduce operators lower to the
            // runtime's corresponding free functions rather than to any
            // native infix operator.
            BinaryOp::FilterRange => {
                self.dependencies.insert("functional");
                format!("argon::filter({l}, {r})")
            }
            BinaryOp::MapRange => {
                self.dependencies.insert("functional");
                format!("argon::map({l}, {r})")
            }
            BinaryOp::ReduceRange => {
                self.dependencies.insert("functional");
                format!("argon::reduce({l}, {r})")
            }
            // `a |> f` applies `f` to `a`; not itself part of the named
            // filter/map/reduce family, but the natural reading of a pipe
            // operator once filter/map/reduce are taken.
            BinaryOp::Pipe => format!("{r}({l})"),
            // `||>` is the in-place `map_pipe(f)`.
            BinaryOp::MapPipe => {
                self.dependencies.insert("functional");
                format!("argon::map_pipe({l}, {r})")
            }
            // `^^` is not named among the documented functional ops;
            // grounded judgment call (recorded in DESIGN.md) treating it
            // as the running-scan sibling of `reduce`, kept in the same
            // runtime namespace.
            BinaryOp::Accumulate => {
                self.dependencies.insert("functional");
                format!("argon::accumulate({l}, {r})")
            }
        })
    }

    fn emit_unary(&mut self, op: UnaryOp, operand: &Expression) -> ArgonResult<String> {
        let o = self.emit_expression(operand)?;
        Ok(match op {
            UnaryOp::Not => format!("(!{o})"),
            UnaryOp::Neg => format!("(-{o})"),
            UnaryOp::Plus => format!("(+{o})"),
            UnaryOp::BitNot => format!("(~{o})"),
            UnaryOp::PreIncrement => format!("(++{o})"),
            UnaryOp::PreDecrement => format!("(--{o})"),
            UnaryOp::PostIncrement => format!("({o}++)"),
            UnaryOp::PostDecrement => format!("({o}--)"),
            // Ownership distinctions (immutable vs. mutable reference)
            // live at the type level; at expression position both forms
            // take the address the same way.
            UnaryOp::Reference | UnaryOp::MutableReference => format!("(&{o})"),
            UnaryOp::Deref => format!("(*{o})"),
        })
    }

    fn emit_assignment(&mut self, op: AssignOp, target: &Expression, value: &Expression) -> ArgonResult<String> {
        let t = self.emit_expression(target)?;
        let v = self.emit_expression(value)?;
        Ok(match op {
            AssignOp::Assign => format!("{t} = {v}"),
            AssignOp::Add => format!("{t} += {v}"),
            AssignOp::Sub => format!("{t} -= {v}"),
            AssignOp::Mul => format!("{t} *= {v}"),
            AssignOp::Div => format!("{t} /= {v}"),
            AssignOp::Rem => format!("{t} %= {v}"),
            AssignOp::BitAnd => format!("{t} &= {v}"),
            AssignOp::BitOr => format!("{t} |= {v}"),
            AssignOp::BitXor => format!("{t} ^= {v}"),
            AssignOp::ShiftLeft => format!("{t} <<= {v}"),
            AssignOp::ShiftRight => format!("{t} >>= {v}"),
            AssignOp::FilterRange => {
                self.dependencies.insert("functional");
                format!("{t} = argon::filter({t}, {v})")
            }
            AssignOp::MapRange => {
                self.dependencies.insert("functional");
                format!("{t} = argon::map({t}, {v})")
            }
            AssignOp::ReduceRange => {
                self.dependencies.insert("functional");
                format!("{t} = argon::reduce({t}, {v})")
            }
            AssignOp::Pipe => format!("{t} = {v}({t})"),
            AssignOp::MapPipe => {
                self.dependencies.insert("functional");
                format!("argon::map_pipe_assign({t}, {v})")
            }
            AssignOp::Accumulate => {
                self.dependencies.insert("functional");
                format!("{t} = argon::accumulate({t}, {v})")
            }
        })
    }

    /// `f(args...)` / `f<T1, T2>(args...)`, plus the synthetic `__array`
    /// callee used by `parser::expressions::parse_array_literal` to
    /// represent `[e1, e2, ...]` without a dedicated AST node.
    fn emit_call(&mut self, callee: &Expression, type_args: &[crate::ast::Type], args: &[Expression]) -> ArgonResult<String> {
        if let Expression::Identifier { name, .. } = callee {
            if name == "__array" {
                let elements = args.iter().map(|a| self.emit_expression(a)).collect::<ArgonResult<Vec<_>>>()?;
                return Ok(format!("{{ {} }}", elements.join(", ")));
            }
        }
        let callee_text = self.emit_expression(callee)?;
        let args_text = args.iter().map(|a| self.emit_expression(a)).collect::<ArgonResult<Vec<_>>>()?.join(", ");
        if type_args.is_empty() {
            Ok(format!("{callee_text}({args_text})"))
        } else {
            let type_args_text = type_args.iter().map(|t| self.emit_type(t)).collect::<Vec<_>>().join(", ");
            Ok(format!("{callee_text}<{type_args_text}>({args_text})"))
        }
    }

    /// Single, slice (end treated as inclusive per the open question
    /// recorded in DESIGN.md), and multiple index forms.
    fn emit_index(&mut self, kind: crate::ast::IndexKind, target: &Expression, operands: &[Expression]) -> ArgonResult<String> {
        use crate::ast::IndexKind;
        let t = self.emit_expression(target)?;
        match kind {
            IndexKind::Single => {
                let i = self.emit_expression(&operands[0])?;
                Ok(format!("{t}[{i}]"))
            }
            IndexKind::Slice => {
                self.dependencies.insert("slice");
                let lo = self.emit_expression(&operands[0])?;
                let hi = self.emit_expression(&operands[1])?;
                Ok(format!("subrange({t}.begin()+{lo}, {t}.begin()+({hi}+1))"))
            }
            IndexKind::Multiple => {
                let parts = operands.iter().map(|o| self.emit_expression(o)).collect::<ArgonResult<Vec<_>>>()?;
                let items = parts.iter().map(|o| format!("{t}[{o}]")).collect::<Vec<_>>().join(", ");
                Ok(format!("{{ {items} }}"))
            }
        }
    }

    /// Capture-by-reference, declared parameter types, return type
    /// inferred from the body when not explicit.
    fn emit_lambda(
        &mut self,
        params: &[crate::ast::LambdaParam],
        return_type: Option<&crate::ast::Type>,
        body: &Expression,
    ) -> ArgonResult<String> {
        let params_text = params
            .iter()
            .map(|p| match &p.ty {
                Some(ty) => format!("{} {}", self.emit_type(ty), p.name),
                None => format!("auto {}", p.name),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let ret_arrow = match return_type {
            Some(ty) => format!(" -> {}", self.emit_type(ty)),
            None => String::new(),
        };
        let body_text = self.with_expression_context(|g| g.emit_expression(body))?;
        Ok(format!("[&]({params_text}){ret_arrow} {{ return {body_text}; }}"))
    }

    /// A named struct literal emits a braced initializer; the anonymous
    /// form synthesizes a uniquely-named struct definition, hoisted to
    /// program scope, and is used once at the literal's site.
    fn emit_struct_literal(&mut self, name: Option<&str>, fields: &[StructLiteralField]) -> ArgonResult<String> {
        let field_inits = fields
            .iter()
            .map(|f| Ok(format!(".{} = {}", f.name, self.emit_expression(&f.value)?)))
            .collect::<ArgonResult<Vec<_>>>()?
            .join(", ");

        match name {
            Some(n) => Ok(format!("{n}{{ {field_inits} }}")),
            None => {
                let struct_name = self.next_anon_struct_name();
                let mut def = String::new();
                writeln!(def, "struct {struct_name} {{").ok();
                for f in fields {
                    let ty_text = match &f.ty {
                        Some(ty) => self.emit_type(ty),
                        None => "auto".to_owned(),
                    };
                    writeln!(def, "    {ty_text} {};", f.name).ok();
                }
                writeln!(def, "}};").ok();
                self.hoisted.push(def);
                Ok(format!("{struct_name}{{ {field_inits} }}"))
            }
        }
    }
}

fn comparison_symbol(op: ComparisonOp) -> &'static str {
    match op {
        ComparisonOp::Equal => "==",
        ComparisonOp::NotEqual => "!=",
        ComparisonOp::Less => "<",
        ComparisonOp::Greater => ">",
        ComparisonOp::LessEqual => "<=",
        ComparisonOp::GreaterEqual => ">=",
    }
}

fn format_float(value: f64) -> String {
    let mut s = format!("{value}");
    if !s.contains('.') && !s.contains('e') && !s.contains("inf") && !s.contains("nan") {
        s.push_str(".0");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse_program;

    fn emit_expr(src: &str) -> String {
        let tokens = tokenize("t.argon", &format!("func main() i32 {{ return {src}; }}")).unwrap();
        let program = parse_program("t.argon", tokens).unwrap();
        let mut g = CodeGenerator::new();
        let crate::ast::Statement::FunctionDeclaration { body, .. } = &program.declarations[0] else { panic!() };
        let crate::ast::Statement::Block { statements, .. } = body.as_ref() else { panic!() };
        let crate::ast::Statement::Return { value: Some(v), .. } = &statements[0] else { panic!() };
        g.emit_expression(v).unwrap()
    }

    #[test]
    fn negative_literal_folds_at_parse_time_and_emits_as_one_literal() {
        assert_eq!(emit_expr("-1"), "-1");
    }

    #[test]
    fn arithmetic_precedence_is_preserved_through_emission() {
        assert_eq!(emit_expr("1 + 2 * 3"), "(1 + (2 * 3))");
    }

    #[test]
    fn slice_index_emits_the_inclusive_upper_bound_form() {
        assert_eq!(emit_expr("arr[2:4]"), "subrange(arr.begin()+2, arr.begin()+(4+1))");
    }

    #[test]
    fn multiple_index_emits_an_initializer_list() {
        assert_eq!(emit_expr("arr[0, 1, 2]"), "{ arr[0], arr[1], arr[2] }");
    }
}
