//! Shapes shared across the Expression/Statement/Type/Pattern groups:
//! the group/kind classification itself, generic parameters, and member
//! visibility (supplemented from the original source's token set).

use crate::lexer::token::Visibility;
use std::fmt;

/// One of the four orthogonal node families. Every AST node belongs to
/// exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Expression,
    Statement,
    Type,
    Pattern,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Group::Expression => "expression",
            Group::Statement => "statement",
            Group::Type => "type",
            Group::Pattern => "pattern",
        };
        write!(f, "{s}")
    }
}

/// A generic parameter: a name plus the constraint type-expression it must
/// satisfy (`T: Number`). The constraint is itself a `Type`, so built-in
/// constraints (`Number`, `Type`) and user constraint declarations are
/// represented uniformly — the emitter is what tells them apart.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericParam {
    pub name: String,
    pub constraint: super::type_expr::Type,
}

/// Member visibility on class/trait members (`pub`/`pri`/`pro`), present in
/// the original token set but only implicit in "ordered members with
/// visibility". Defaults to `Private` when a member declaration carries no
/// explicit visibility keyword — the original's own `parseClassDeclaration`
/// is an unfinished stub with no default to match, so this is this crate's
/// own judgment call, not an attributed original behavior.
pub type MemberVisibility = Visibility;

pub fn default_visibility() -> MemberVisibility {
    Visibility::Private
}

/// A nullable owned child: a "nullable owned carrier" so that optional
/// children still participate in the unique-ownership tree without
/// reaching for `Option<Box<T>>` at every call site with different
/// ergonomics.
pub type Opt<T> = Option<Box<T>>;

pub fn opt<T>(value: T) -> Opt<T> {
    Some(Box::new(value))
}
