//! Type-expression nodes.
//!
//! Grounded on y-lang's `src/ast/types.rs` (a small tagged enum with a
//! `from_pair`/`position` pair of methods), generalized from its three
//! variants (Literal/Function/Array) to the full set the grammar names:
//! sum, intersection, prefixed (pointer/owned/reference/mutable-
//! reference), sized array, function and closure forms, and variadic.

use crate::source::Position;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// `*T`
    Pointer,
    /// `~T`
    Owned,
    /// `&T`
    Reference,
    /// `&&T`
    MutableReference,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// A bare name: `i32`, `MyStruct`, a generic parameter name.
    Identifier { name: String, position: Position },
    /// `Base<Arg1, Arg2, ...>`
    Generic { base: String, args: Vec<Type>, position: Position },
    /// `A | B | C`
    Sum { members: Vec<Type>, position: Position },
    /// `A & B & C`
    Intersection { members: Vec<Type>, position: Position },
    /// `*T`, `~T`, `&T`, `&&T`
    Prefixed { prefix: Prefix, inner: Box<Type>, position: Position },
    /// `T[N]`
    Array { element: Box<Type>, size: u64, position: Position },
    /// `func(A, B) R`
    Function { params: Vec<Type>, ret: Box<Type>, position: Position },
    /// `func R` — a closure type, distinguished from `Function` by arity of
    /// the parameter list only by the parser's call site (a closure type
    /// appears after a colon with no parenthesized parameter list).
    Closure { ret: Box<Type>, position: Position },
    /// `...T`
    Variadic { inner: Box<Type>, position: Position },
}

impl Type {
    pub fn position(&self) -> &Position {
        match self {
            Type::Identifier { position, .. }
            | Type::Generic { position, .. }
            | Type::Sum { position, .. }
            | Type::Intersection { position, .. }
            | Type::Prefixed { position, .. }
            | Type::Array { position, .. }
            | Type::Function { position, .. }
            | Type::Closure { position, .. }
            | Type::Variadic { position, .. } => position,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Identifier { .. } => "IdentifierType",
            Type::Generic { .. } => "GenericType",
            Type::Sum { .. } => "SumType",
            Type::Intersection { .. } => "IntersectionType",
            Type::Prefixed { .. } => "PrefixedType",
            Type::Array { .. } => "ArrayType",
            Type::Function { .. } => "FunctionType",
            Type::Closure { .. } => "ClosureType",
            Type::Variadic { .. } => "VariadicType",
        }
    }

    pub fn identifier(name: impl Into<String>, position: Position) -> Type {
        Type::Identifier { name: name.into(), position }
    }
}

/// A source-language-shaped rendering, used by tests and by error messages
/// (`Expected: i32, Actual: str`-style diagnostics); not the emitted
/// translation-target spelling, which lives in `codegen::types`.
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Identifier { name, .. } => write!(f, "{name}"),
            Type::Generic { base, args, .. } => {
                write!(f, "{base}<")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ">")
            }
            Type::Sum { members, .. } => {
                write!(f, "{}", members.iter().map(Type::to_string).collect::<Vec<_>>().join(" | "))
            }
            Type::Intersection { members, .. } => {
                write!(f, "{}", members.iter().map(Type::to_string).collect::<Vec<_>>().join(" & "))
            }
            Type::Prefixed { prefix, inner, .. } => {
                let glyph = match prefix {
                    Prefix::Pointer => "*",
                    Prefix::Owned => "~",
                    Prefix::Reference => "&",
                    Prefix::MutableReference => "&&",
                };
                write!(f, "{glyph}{inner}")
            }
            Type::Array { element, size, .. } => write!(f, "{element}[{size}]"),
            Type::Function { params, ret, .. } => {
                write!(f, "func(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ") {ret}")
            }
            Type::Closure { ret, .. } => write!(f, "func {ret}"),
            Type::Variadic { inner, .. } => write!(f, "...{inner}"),
        }
    }
}
