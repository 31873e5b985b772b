//! End-to-end lex -> parse -> emit checks for `match`: wildcard, literal,
//! range, identifier-binding, and guarded arms lowered to an if/else-if
//! chain over the scrutinee.

use argonc::codegen::generate;
use argonc::lexer::tokenize;
use argonc::parser::parse_program;

fn emit(src: &str) -> (String, std::collections::BTreeSet<&'static str>) {
    let full = format!("func main() i32 {{ {src} return 0; }}");
    let tokens = tokenize("pattern_matching.argon", &full).expect("tokenize");
    let program = parse_program("pattern_matching.argon", tokens).expect("parse");
    generate(&program).expect("emit")
}

#[test]
fn wildcard_arm_becomes_the_catchall_test() {
    let (text, _) = emit("match (1) { _ => 0 };");
    assert!(text.contains("argon::match_wildcard()"));
}

#[test]
fn literal_arm_becomes_an_equality_test_and_pulls_in_pattern_helpers() {
    let (text, deps) = emit("match (1) { 1 => 10, _ => 0 };");
    assert!(text.contains("argon::match_value(__argon_match_value, 1)"));
    assert!(deps.contains("pattern"));
}

#[test]
fn range_arm_carries_the_inclusive_flag_through_to_emitted_code() {
    let (text, _) = emit("match (5) { 0 to=10 => 1, _ => 0 };");
    assert!(text.contains("argon::match_range(__argon_match_value, 0, 10, true)"));
}

#[test]
fn exclusive_range_arm_carries_false_for_the_inclusive_flag() {
    let (text, _) = emit("match (5) { 0 to 10 => 1, _ => 0 };");
    assert!(text.contains("argon::match_range(__argon_match_value, 0, 10, false)"));
}

#[test]
fn identifier_arm_binds_the_whole_scrutinee_to_a_new_name() {
    let (text, _) = emit("match (1) { x => x };");
    assert!(text.contains("auto x = __argon_match_value;"));
}

#[test]
fn guarded_arm_conjuncts_the_pattern_test_with_the_guard_expression() {
    let (text, _) = emit("match (1) { x if x > 0 => x, _ => 0 };");
    assert!(text.contains("&& ((x > 0))"));
}

#[test]
fn match_used_in_value_position_wraps_the_chain_in_an_immediately_invoked_lambda() {
    let (text, _) = emit("def r = match (1) { 1 => 10, _ => 0 };");
    assert!(text.contains("([&]() -> auto {"));
    assert!(text.contains("return 10;"));
}

#[test]
fn earlier_arms_take_precedence_via_else_if_chaining() {
    let (text, _) = emit("match (1) { 1 => 10, _ => 0 };");
    let first = text.find("if (argon::match_value").unwrap();
    let second = text.find("else if (argon::match_wildcard").unwrap();
    assert!(first < second);
}
