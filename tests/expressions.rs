//! End-to-end lex -> parse -> emit checks for expression forms: operator
//! precedence, assignment, calls, indexing, member access, and ranges.

use std::collections::BTreeSet;

use argonc::codegen::generate;
use argonc::lexer::tokenize;
use argonc::parser::parse_program;

fn emit(src: &str) -> (String, BTreeSet<&'static str>) {
    let tokens = tokenize("expressions.argon", src).expect("tokenize");
    let program = parse_program("expressions.argon", tokens).expect("parse");
    generate(&program).expect("emit")
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let (text, _) = emit("func main() i32 { return 1 + 2 * 3; }");
    assert!(text.contains("(1 + (2 * 3))"));
}

#[test]
fn comparison_binds_looser_than_logical_and_keeps_and_rightmost() {
    let (text, _) = emit("func main() bool { def a = 1; def b = 2; def c = true; return a == b && c; }");
    assert!(text.contains("((a == b) && c)"));
}

#[test]
fn to_forms_an_exclusive_range_not_a_comparison_chain() {
    let (text, deps) = emit("func main() i32 { def r = 0 to 10; return 0; }");
    assert!(text.contains("std::views::iota(0, 10)"));
    assert!(deps.contains("ranges"));
}

#[test]
fn to_equals_forms_an_inclusive_range() {
    let (text, _) = emit("func main() i32 { def r = 0 to=10; return 0; }");
    assert!(text.contains("std::views::iota(0, (10) + 1)"));
}

#[test]
fn multiple_index_operands_emit_as_separate_subscripts_not_one_expression() {
    let (text, _) = emit("func main() i32 { def arr = [1, 2, 3]; def x = arr[0, 1, 2]; return 0; }");
    assert!(text.contains("{ arr[0], arr[1], arr[2] }"));
}

#[test]
fn function_call_with_explicit_type_arguments_emits_angle_bracket_syntax() {
    let (text, _) = emit("func id<T: Number>(x: T) T -> x; func main() i32 { return id<i32>(1); }");
    assert!(text.contains("id<int32_t>(1)"));
}

#[test]
fn member_access_chains_emit_dotted_paths() {
    let (text, _) = emit(
        "class Point { x: i32; y: i32; } func main() i32 { def p: Point; return p.x; }",
    );
    assert!(text.contains("return p.x;"));
}

#[test]
fn ternary_emits_the_c_style_conditional_operator() {
    let (text, _) = emit("func main() i32 { return true ? 1 : 2; }");
    assert!(text.contains("(true ? 1 : 2)"));
}

#[test]
fn assignment_with_a_compound_range_operator_routes_through_the_functional_runtime() {
    let (text, deps) = emit("func main() i32 { def xs = [1, 2, 3]; xs &= (x) => x; return 0; }");
    assert!(deps.contains("functional"));
    assert!(text.contains("xs = argon::map(xs,"));
}
