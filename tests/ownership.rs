//! End-to-end lex -> parse -> emit checks for ownership-qualified types:
//! pointer, owned (`~`), reference, and mutable-reference prefixes, plus
//! class member visibility.

use std::collections::BTreeSet;

use argonc::codegen::generate;
use argonc::lexer::tokenize;
use argonc::parser::parse_program;

fn emit(src: &str) -> (String, BTreeSet<&'static str>) {
    let tokens = tokenize("ownership.argon", src).expect("tokenize");
    let program = parse_program("ownership.argon", tokens).expect("parse");
    generate(&program).expect("emit")
}

#[test]
fn pointer_prefix_emits_a_raw_pointer_type() {
    let (text, _) = emit("func main() i32 { def p: *i32; return 0; }");
    assert!(text.contains("int32_t* p;"));
}

#[test]
fn owned_prefix_emits_a_unique_ptr_and_pulls_in_the_owned_runtime_dependency() {
    let (text, deps) = emit("func main() i32 { def b: ~i32; return 0; }");
    assert!(text.contains("std::unique_ptr<int32_t> b;"));
    assert!(deps.contains("owned"));
}

#[test]
fn reference_prefix_emits_a_const_reference() {
    let (text, _) = emit("func main() i32 { def r: &i32; return 0; }");
    assert!(text.contains("const int32_t& r;"));
}

#[test]
fn mutable_reference_prefix_emits_a_plain_reference() {
    let (text, _) = emit("func main() i32 { def r: &&i32; return 0; }");
    assert!(text.contains("int32_t& r;"));
    assert!(!text.contains("const int32_t& r;"));
}

#[test]
fn class_with_an_owned_field_emits_a_private_by_default_member_and_pulls_in_owned() {
    let (text, deps) = emit(
        "class Box { data: ~i32; } func main() i32 { return 0; }",
    );
    assert!(text.contains("private:"));
    assert!(text.contains("std::unique_ptr<int32_t> data;"));
    assert!(deps.contains("owned"));
}

#[test]
fn explicit_public_member_overrides_the_private_default() {
    let (text, _) = emit("class Box { pub data: i32; } func main() i32 { return 0; }");
    assert!(text.contains("public:"));
}

#[test]
fn constructor_initializer_list_threads_field_initializers_through_the_member_list() {
    let (text, _) = emit(
        "class Box { pri data: i32; constructor(v: i32) : data = v {} } func main() i32 { return 0; }",
    );
    assert!(text.contains("Box(int32_t v) : data(v)"));
}
