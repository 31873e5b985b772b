//! The code emitter: a visitor over the AST lowering it to
//! translation-target source text plus a set of runtime dependency tags.
//!
//! Grounded on y-lang's `compiler/mod.rs` (a struct holding emission
//! state, one `write_*`/`emit_*` method per AST shape, threading a
//! `Result` through every call) generalized from its
//! straight-to-`File` NASM writer to a straight-to-`String` writer — this
//! emitter's caller decides where the text ends up (stdout, a file, a
//! test assertion) rather than the emitter performing I/O itself.

mod expressions;
mod patterns;
pub mod runtime_template;
mod statements;
mod types;

use std::collections::BTreeSet;

use crate::ast::Program;
use crate::error::ArgonResult;

/// Concepts the emitter always makes available, independent of whether any
/// generic declaration in the program actually references them: the
/// built-in concepts are emitted once at program start regardless.
const BUILTIN_CONCEPTS: &str = "\
template<typename T>
concept Number = std::integral<T> || std::floating_point<T>;

template<typename T>
concept Type = true;

";

/// A visitor-style emitter. `is_statement_context` is the one piece of
/// contextual state named explicitly by the lowering rules; `current_class`
/// and `hoisted` are this crate's own bookkeeping for constructor
/// initializer lists and anonymous struct-literal synthesis, needed to
/// make those two lowering rules concrete.
pub struct CodeGenerator {
    dependencies: BTreeSet<&'static str>,
    is_statement_context: bool,
    current_class: Option<String>,
    hoisted: Vec<String>,
    anon_struct_counter: usize,
}

impl CodeGenerator {
    pub fn new() -> Self {
        CodeGenerator {
            dependencies: BTreeSet::new(),
            is_statement_context: false,
            current_class: None,
            hoisted: Vec::new(),
            anon_struct_counter: 0,
        }
    }

    pub fn dependencies(&self) -> &BTreeSet<&'static str> {
        &self.dependencies
    }

    /// Runs `f` with `is_statement_context` cleared, restoring the previous
    /// value afterwards — a scoped guard around statement-position
    /// expressions so a nested value-producing expression (e.g. a match arm
    /// inside a match used as a statement) isn't mistaken for one.
    fn with_expression_context<T>(&mut self, f: impl FnOnce(&mut Self) -> ArgonResult<T>) -> ArgonResult<T> {
        let prev = self.is_statement_context;
        self.is_statement_context = false;
        let result = f(self);
        self.is_statement_context = prev;
        result
    }

    fn with_statement_context<T>(&mut self, f: impl FnOnce(&mut Self) -> ArgonResult<T>) -> ArgonResult<T> {
        let prev = self.is_statement_context;
        self.is_statement_context = true;
        let result = f(self);
        self.is_statement_context = prev;
        result
    }

    fn next_anon_struct_name(&mut self) -> String {
        self.anon_struct_counter += 1;
        format!("__AnonStruct{}", self.anon_struct_counter)
    }

    pub fn emit_program(&mut self, program: &Program) -> ArgonResult<String> {
        let mut declarations_text = String::new();
        for decl in &program.declarations {
            let text = self.with_statement_context(|g| g.emit_statement(decl))?;
            declarations_text.push_str(&text);
            declarations_text.push('\n');
        }

        let mut out = String::new();
        out.push_str(BUILTIN_CONCEPTS);
        for anon in &self.hoisted {
            out.push_str(anon);
            out.push('\n');
        }
        out.push_str(&declarations_text);
        Ok(out)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the whole emitter over a parsed program, returning the emitted
/// translation-target text (without the runtime-header prelude) and the
/// set of dependency tags the caller should resolve via
/// `runtime_template::assemble`.
pub fn generate(program: &Program) -> ArgonResult<(String, BTreeSet<&'static str>)> {
    let mut generator = CodeGenerator::new();
    let body = generator.emit_program(program)?;
    Ok((body, generator.dependencies().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse_program;

    fn emit(src: &str) -> (String, BTreeSet<&'static str>) {
        let tokens = tokenize("t.argon", src).unwrap();
        let program = parse_program("t.argon", tokens).unwrap();
        generate(&program).unwrap()
    }

    #[test]
    fn emits_builtin_concepts_once() {
        let (text, _) = emit("func main() i32 -> 0;");
        assert_eq!(text.matches("concept Number").count(), 1);
        assert_eq!(text.matches("concept Type").count(), 1);
    }

    #[test]
    fn function_declaration_emits_a_block_with_a_scope_guard() {
        let (text, deps) = emit("func main() i32 -> 0;");
        assert!(text.contains("int32_t main("));
        assert!(text.contains("ArgonScopeGuard"));
        assert!(deps.contains("futures"));
    }

    #[test]
    fn generic_function_emits_template_requires_header_with_matching_arity() {
        let (text, _) = emit("func id<T: Number>(x: T) T -> x; func main() i32 -> 0;");
        assert!(text.contains("template<typename T>"));
        assert!(text.contains("requires Number<T>"));
    }
}
