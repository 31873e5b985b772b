//! End-to-end lex -> parse -> emit checks for the concurrency-flavored
//! expressions: `par`, `await`, `$` (lazy), and `try`.

use std::collections::BTreeSet;

use argonc::codegen::generate;
use argonc::lexer::tokenize;
use argonc::parser::parse_program;

fn emit(src: &str) -> (String, BTreeSet<&'static str>) {
    let tokens = tokenize("parallel.argon", src).expect("tokenize");
    let program = parse_program("parallel.argon", tokens).expect("parse");
    generate(&program).expect("emit")
}

#[test]
fn par_expression_wraps_its_operand_in_a_lambda_passed_to_the_runtime_par() {
    let (text, deps) = emit("func compute() i32 -> 21; func main() i32 { return par compute(); }");
    assert!(text.contains("argon::par([&]() { return compute(); })"));
    assert!(deps.contains("futures"));
}

#[test]
fn every_function_body_opens_with_the_scope_guard_regardless_of_parallel_use() {
    let (text, deps) = emit("func main() i32 { def x = 1; return x; }");
    assert!(text.contains("ArgonScopeGuard __argon_scope_guard;"));
    assert!(deps.contains("futures"));
}

#[test]
fn await_unwraps_a_future_handle_via_get() {
    let (text, _) = emit(
        "func compute() i32 -> 21; func main() i32 { def f = par compute(); return await f; }",
    );
    assert!(text.contains("return f.get();"));
}

#[test]
fn lazy_expression_becomes_a_zero_argument_deferred_lambda() {
    let (text, _) = emit("func main() i32 { def f = $ (1 + 2); return 0; }");
    assert!(text.contains("[&]() { return (1 + 2); }"));
}

#[test]
fn try_expression_routes_through_the_try_catch_runtime_helper_and_pulls_in_try() {
    let (text, deps) = emit("func risky() i32 -> 1; func main() i32 { def r = try risky(); return 0; }");
    assert!(text.contains("argon::try_catch([&]() { return risky(); })"));
    assert!(deps.contains("try"));
}
