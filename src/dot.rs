//! Best-effort Graphviz DOT dump of the AST: an ambient CLI convenience
//! rather than a full visitor-based dumper. It cannot fail a compilation —
//! any problem building or writing the graph is logged as a warning and
//! the file is simply skipped.

use crate::ast::{Program, Statement};

/// Writes a DOT graph of `program` to `path`, or logs a warning and does
/// nothing on any failure. Never returns an error to its caller: the `-d`
/// flag is a convenience, not part of the compiler's success/failure
/// contract.
pub fn emit(program: &Program, path: &std::path::Path) {
    let graph = render(program);
    if let Err(err) = std::fs::write(path, graph) {
        log::warn!("could not write dot graph to {}: {err}", path.display());
    }
}

fn render(program: &Program) -> String {
    let mut out = String::new();
    out.push_str("digraph Ast {\n");
    let mut next_id = 0usize;
    let root = fresh_id(&mut next_id);
    out.push_str(&format!("  n{root} [label=\"Program\"];\n"));
    for decl in &program.declarations {
        let child = render_statement(decl, &mut next_id, &mut out);
        out.push_str(&format!("  n{root} -> n{child};\n"));
    }
    out.push_str("}\n");
    out
}

fn fresh_id(next_id: &mut usize) -> usize {
    let id = *next_id;
    *next_id += 1;
    id
}

/// Renders one statement node plus (best-effort, shallow) its directly
/// nested statement bodies, returning the id of the node just added.
/// Expression/Type/Pattern subtrees are not descended into: a one-level
/// statement skeleton is enough for the diagnostic convenience this is.
fn render_statement(stmt: &Statement, next_id: &mut usize, out: &mut String) -> usize {
    let id = fresh_id(next_id);
    out.push_str(&format!("  n{id} [label=\"{}\"];\n", stmt.kind_name()));

    let mut link_child = |child: &Statement, out: &mut String, next_id: &mut usize| {
        let child_id = render_statement(child, next_id, out);
        out.push_str(&format!("  n{id} -> n{child_id};\n"));
    };

    match stmt {
        Statement::FunctionDeclaration { body, .. } => link_child(body, out, next_id),
        Statement::Constructor { body, .. } => link_child(body, out, next_id),
        Statement::Block { statements, .. } => {
            for s in statements {
                link_child(s, out, next_id);
            }
        }
        Statement::If { then_branch, else_branch, .. } => {
            link_child(then_branch, out, next_id);
            if let Some(else_branch) = else_branch {
                link_child(else_branch, out, next_id);
            }
        }
        Statement::While { body, .. } => link_child(body, out, next_id),
        Statement::For { body, .. } => link_child(body, out, next_id),
        Statement::ClassDeclaration { members, .. } => {
            for member in members {
                use crate::ast::ClassMemberItem;
                match &member.item {
                    ClassMemberItem::Method(m) | ClassMemberItem::Constructor(m) => link_child(m, out, next_id),
                    ClassMemberItem::Field { .. } => {}
                }
            }
        }
        Statement::ImplBlock { methods, .. } => {
            for method in methods {
                link_child(method, out, next_id);
            }
        }
        _ => {}
    }

    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse_program;

    fn parse(src: &str) -> Program {
        let tokens = tokenize("t.argon", src).unwrap();
        parse_program("t.argon", tokens).unwrap()
    }

    #[test]
    fn renders_a_digraph_with_one_node_per_top_level_declaration() {
        let program = parse("func main() i32 { return 0; }");
        let text = render(&program);
        assert!(text.starts_with("digraph Ast {"));
        assert!(text.contains("label=\"Program\""));
        assert!(text.contains("label=\"FunctionDeclaration\""));
    }

    #[test]
    fn descends_into_nested_block_bodies() {
        let program = parse("func main() i32 { if (true) { return 0; } return 1; }");
        let text = render(&program);
        assert!(text.contains("label=\"If\""));
        assert!(text.contains("label=\"Block\""));
    }
}
