//! Pattern-match lowering: wildcard → `true`, literal → equality, range →
//! inclusive/exclusive
//! bound test, array → length and element tests with rest absorbing the
//! tail, struct → a sequence of field tests and bindings, constructor →
//! tag check and argument destructure, type pattern → a runtime
//! `holds<T>(v)` test.

use std::fmt::Write as _;

use super::CodeGenerator;
use crate::ast::{Expression, MatchArm, Pattern};
use crate::error::ArgonResult;

/// `Enum::Variant` → `Enum_Variant`, matching the struct names
/// `emit_statement`'s `EnumDeclaration` arm synthesizes for each variant.
fn mangle_path(path: &str) -> String {
    path.replace("::", "_")
}

impl CodeGenerator {
    /// Lowers a `match` to an if/else-if chain over the scrutinee. When
    /// `as_value` is set each arm's body becomes a `return`, leaving the
    /// chain ready to sit inside the IIFE `codegen::expressions` wraps
    /// a value-position match in; otherwise each body is emitted as a
    /// plain expression-statement, matching a statement-position match.
    pub(crate) fn emit_match(&mut self, scrutinee: &Expression, arms: &[MatchArm], as_value: bool) -> ArgonResult<String> {
        let scrutinee_text = self.with_expression_context(|g| g.emit_expression(scrutinee))?;
        let var = "__argon_match_value";
        let mut out = String::new();
        writeln!(out, "auto {var} = {scrutinee_text};").ok();

        for (i, arm) in arms.iter().enumerate() {
            let test = self.emit_pattern_test(&arm.pattern, var)?;
            let bindings = self.emit_pattern_bindings(&arm.pattern, var)?;
            let full_test = match &arm.guard {
                Some(guard) => {
                    let guard_text = self.with_expression_context(|g| g.emit_expression(guard))?;
                    format!("({test}) && ({guard_text})")
                }
                None => test,
            };
            let branch_kw = if i == 0 { "if" } else { "else if" };
            writeln!(out, "{branch_kw} ({full_test}) {{").ok();
            for binding in &bindings {
                writeln!(out, "    {binding}").ok();
            }
            let body_text = self.with_expression_context(|g| g.emit_expression(&arm.body))?;
            if as_value {
                writeln!(out, "    return {body_text};").ok();
            } else {
                writeln!(out, "    {body_text};").ok();
            }
            writeln!(out, "}}").ok();
        }

        Ok(out)
    }

    fn emit_pattern_test(&mut self, pattern: &Pattern, scrutinee: &str) -> ArgonResult<String> {
        self.dependencies.insert("pattern");
        Ok(match pattern {
            Pattern::Wildcard { .. } => "argon::match_wildcard()".to_owned(),
            // An identifier pattern always matches; its guard (if any) is
            // ANDed in separately by the caller.
            Pattern::Identifier { .. } => "true".to_owned(),
            Pattern::Literal { value, .. } => {
                let lit = self.with_expression_context(|g| g.emit_expression(value))?;
                format!("argon::match_value({scrutinee}, {lit})")
            }
            Pattern::Range { lo, hi, inclusive, .. } => {
                let lo_t = self.with_expression_context(|g| g.emit_expression(lo))?;
                let hi_t = self.with_expression_context(|g| g.emit_expression(hi))?;
                format!("argon::match_range({scrutinee}, {lo_t}, {hi_t}, {inclusive})")
            }
            Pattern::Array { elements, rest, .. } => {
                let len_test = if rest.is_some() {
                    format!("argon::destructure_len({scrutinee}) >= {}", elements.len())
                } else {
                    format!("argon::destructure_len({scrutinee}) == {}", elements.len())
                };
                let mut parts = vec![len_test];
                for (i, element) in elements.iter().enumerate() {
                    let element_var = format!("argon::element_at({scrutinee}, {i})");
                    parts.push(self.emit_pattern_test(element, &element_var)?);
                }
                format!("({})", parts.join(" && "))
            }
            Pattern::Struct { fields, .. } => {
                let mut parts = Vec::new();
                for field in fields {
                    if let Some(sub) = &field.sub_pattern {
                        let field_var = format!("{scrutinee}.{}", field.name);
                        parts.push(self.emit_pattern_test(sub, &field_var)?);
                    }
                }
                if parts.is_empty() {
                    "true".to_owned()
                } else {
                    format!("({})", parts.join(" && "))
                }
            }
            Pattern::Constructor { path, args, .. } => {
                let mangled = mangle_path(path);
                let mut parts = vec![format!("argon::match_constructor<{mangled}>({scrutinee})")];
                for (i, arg) in args.iter().enumerate() {
                    let arg_var = format!("std::get<{mangled}>({scrutinee}).f{i}");
                    parts.push(self.emit_pattern_test(arg, &arg_var)?);
                }
                format!("({})", parts.join(" && "))
            }
            Pattern::TypePattern { ty, .. } => {
                let ty_text = self.emit_type(ty);
                format!("argon::holds<{ty_text}>({scrutinee})")
            }
        })
    }

    fn emit_pattern_bindings(&mut self, pattern: &Pattern, scrutinee: &str) -> ArgonResult<Vec<String>> {
        Ok(match pattern {
            Pattern::Wildcard { .. } | Pattern::Literal { .. } | Pattern::Range { .. } => Vec::new(),
            Pattern::Identifier { name, .. } => vec![format!("auto {name} = {scrutinee};")],
            Pattern::Array { elements, rest, .. } => {
                let mut out = Vec::new();
                for (i, element) in elements.iter().enumerate() {
                    let element_var = format!("argon::element_at({scrutinee}, {i})");
                    out.extend(self.emit_pattern_bindings(element, &element_var)?);
                }
                if let Some(rest_name) = rest {
                    out.push(format!(
                        "auto {rest_name} = argon::rest_from({scrutinee}, {});",
                        elements.len()
                    ));
                }
                out
            }
            Pattern::Struct { fields, .. } => {
                let mut out = Vec::new();
                for field in fields {
                    let field_var = format!("{scrutinee}.{}", field.name);
                    match &field.sub_pattern {
                        Some(sub) => out.extend(self.emit_pattern_bindings(sub, &field_var)?),
                        None => out.push(format!("auto {} = {};", field.name, field_var)),
                    }
                }
                out
            }
            Pattern::Constructor { path, args, .. } => {
                let mangled = mangle_path(path);
                let mut out = Vec::new();
                for (i, arg) in args.iter().enumerate() {
                    let arg_var = format!("std::get<{mangled}>({scrutinee}).f{i}");
                    out.extend(self.emit_pattern_bindings(arg, &arg_var)?);
                }
                out
            }
            Pattern::TypePattern { ty, binding, .. } => match binding {
                Some(name) => {
                    let ty_text = self.emit_type(ty);
                    vec![format!("auto {name} = argon::narrow<{ty_text}>({scrutinee});")]
                }
                None => Vec::new(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse_program;

    fn emit_match_body(src: &str) -> (String, std::collections::BTreeSet<&'static str>) {
        let tokens = tokenize("t.argon", &format!("func main() i32 {{ {src} return 0; }}")).unwrap();
        let program = parse_program("t.argon", tokens).unwrap();
        let mut g = CodeGenerator::new();
        let text = g.with_statement_context(|g| g.emit_statement(&program.declarations[0])).unwrap();
        (text, g.dependencies().clone())
    }

    #[test]
    fn wildcard_arm_tests_true() {
        let (text, _) = emit_match_body("match (1) { _ => 1 };");
        assert!(text.contains("argon::match_wildcard()"));
    }

    #[test]
    fn literal_arm_emits_an_equality_test() {
        let (text, deps) = emit_match_body("match (1) { 1 => 1, _ => 0 };");
        assert!(text.contains("argon::match_value(__argon_match_value, 1)"));
        assert!(deps.contains("pattern"));
    }

    #[test]
    fn range_arm_carries_the_inclusive_flag() {
        let (text, _) = emit_match_body("match (1) { 0 to=10 => 1, _ => 0 };");
        assert!(text.contains("argon::match_range(__argon_match_value, 0, 10, true)"));
    }

    #[test]
    fn identifier_arm_binds_the_scrutinee() {
        let (text, _) = emit_match_body("match (1) { x => x };");
        assert!(text.contains("auto x = __argon_match_value;"));
    }
}
