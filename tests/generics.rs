//! End-to-end lex -> parse -> emit checks for generic functions, classes,
//! and constraint declarations.

use argonc::codegen::generate;
use argonc::lexer::tokenize;
use argonc::parser::parse_program;

fn emit(src: &str) -> String {
    let tokens = tokenize("generics.argon", src).expect("tokenize");
    let program = parse_program("generics.argon", tokens).expect("parse");
    generate(&program).expect("emit").0
}

#[test]
fn generic_function_emits_a_requires_clause_with_matching_arity() {
    let text = emit("func id<T: Number>(x: T) T -> x; func main() i32 { return 0; }");
    assert!(text.contains("template<typename T>"));
    assert!(text.contains("requires Number<T>"));
}

#[test]
fn two_generic_parameters_conjunct_their_constraints_with_and() {
    let text = emit(
        "func pair<T: Number, U: Type>(a: T, b: U) T -> a; func main() i32 { return 0; }",
    );
    assert!(text.contains("template<typename T, typename U>"));
    assert!(text.contains("Number<T> && true"));
}

#[test]
fn unconstrained_generic_parameter_defaults_to_the_universal_type_concept() {
    let text = emit("func id<T>(x: T) T -> x; func main() i32 { return 0; }");
    assert!(text.contains("requires true"));
}

#[test]
fn generic_class_threads_its_template_header_ahead_of_the_class_body() {
    let text = emit(
        "class Box<T: Type> { value: T; } func main() i32 { return 0; }",
    );
    assert!(text.contains("template<typename T>\nrequires true\nclass Box"));
}

#[test]
fn concrete_primitive_constraint_conjuncts_as_same_as() {
    let text = emit("func id<T: i32>(x: T) T -> x; func main() i32 { return 0; }");
    assert!(text.contains("std::same_as<T, int32_t>"));
}

#[test]
fn user_defined_constraint_conjuncts_as_a_concept_applied_to_the_parameter() {
    let text = emit(
        "constraint Summable<T> = true; \
         func total<T: Summable>(a: T, b: T) T -> a; \
         func main() i32 { return 0; }",
    );
    assert!(text.contains("Summable<T>"));
}

#[test]
fn generic_function_call_with_explicit_type_argument_emits_angle_brackets() {
    let text = emit(
        "func id<T: Number>(x: T) T -> x; func main() i32 { return id<i64>(1i64); }",
    );
    assert!(text.contains("id<int64_t>(1)"));
}
