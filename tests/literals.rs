//! End-to-end lex -> parse -> emit checks for literal forms: integers with
//! width suffixes, floats, strings, chars, booleans, and array literals.

use std::collections::BTreeSet;

use argonc::codegen::generate;
use argonc::lexer::tokenize;
use argonc::parser::parse_program;

fn emit(src: &str) -> (String, BTreeSet<&'static str>) {
    let tokens = tokenize("literals.argon", src).expect("tokenize");
    let program = parse_program("literals.argon", tokens).expect("parse");
    generate(&program).expect("emit")
}

#[test]
fn integer_suffixes_select_fixed_width_types_through_the_whole_pipeline() {
    let (text, _) = emit("func main() i32 { def a: i64 = 7i64; return 0; }");
    assert!(text.contains("int64_t a = 7;"));
}

#[test]
fn i128_literal_pulls_in_the_runtime_dependency_end_to_end() {
    let (text, deps) = emit("func main() i32 { def a: i128 = 9i128; return 0; }");
    assert!(text.contains("argon::i128 a = 9;"));
    assert!(deps.contains("i128"));
}

#[test]
fn float_without_a_fractional_digit_still_prints_a_decimal_point() {
    let (text, _) = emit("func main() f64 { return 5.0; }");
    assert!(text.contains("return 5.0;"));
}

#[test]
fn string_literal_emits_a_quoted_escaped_string_and_pulls_in_std_string() {
    let (text, deps) = emit(r#"func main() i32 { def s: str = "a\nb"; return 0; }"#);
    assert!(text.contains(r#""a\nb""#));
    assert!(deps.contains("string"));
}

#[test]
fn char_literal_emits_a_quoted_char() {
    let (text, _) = emit(r"func main() i32 { def c: chr = '\t'; return 0; }");
    assert!(text.contains("'\\t'"));
}

#[test]
fn boolean_literals_emit_as_bare_true_false() {
    let (text, _) = emit("func main() bool { return true; }");
    assert!(text.contains("return true;"));
}

#[test]
fn negative_integer_literal_folds_into_one_literal_not_a_unary_expression() {
    let (text, _) = emit("func main() i32 { return -1; }");
    assert!(text.contains("return -1;"));
    assert!(!text.contains("-(1)"));
}

#[test]
fn array_literal_lowers_to_a_braced_initializer_list() {
    let (text, _) = emit("func main() i32 { def a = [1, 2, 3]; return 0; }");
    assert!(text.contains("{ 1, 2, 3 }"));
}
