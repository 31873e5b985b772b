//! AST data model: tagged-variant nodes for the four orthogonal groups —
//! Expression, Statement, Type, Pattern — each exposing its kind name,
//! its `Group`, and its origin `Position`.
//!
//! Grounded on y-lang's `src/ast/*.rs` layout (one small file per
//! node family, re-exported from `mod.rs`), generalized from its
//! per-struct files to one file per group since these groups
//! are themselves large tagged enums rather than single structs.

pub mod common;
pub mod expression;
pub mod pattern;
pub mod statement;
pub mod type_expr;

pub use common::{opt, default_visibility, GenericParam, Group, MemberVisibility, Opt};
pub use expression::{
    AssignOp, BinaryOp, ComparisonOp, Expression, IndexKind, LambdaParam, MatchArm,
    StructLiteralField, UnaryOp,
};
pub use pattern::{FieldPattern, Pattern};
pub use statement::{
    ClassMember, ClassMemberItem, EnumVariant, FunctionSignature, Initializer, Param, Statement,
    TraitMethod,
};
pub use type_expr::{Prefix, Type};

impl Expression {
    pub fn group(&self) -> Group {
        Group::Expression
    }
}

impl Statement {
    pub fn group(&self) -> Group {
        Group::Statement
    }
}

impl Type {
    pub fn group(&self) -> Group {
        Group::Type
    }
}

impl Pattern {
    pub fn group(&self) -> Group {
        Group::Pattern
    }
}

/// The AST root: an ordered sequence of top-level declarations, plus the
/// file name it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub file: String,
    pub declarations: Vec<Statement>,
}

impl Program {
    pub fn new(file: impl Into<String>, declarations: Vec<Statement>) -> Self {
        Program { file: file.into(), declarations }
    }

    /// Count of top-level `func main` definitions — the invariant checked
    /// by the parser after a full parse.
    pub fn main_function_count(&self) -> usize {
        self.declarations
            .iter()
            .filter(|decl| matches!(decl, Statement::FunctionDeclaration { signature, .. } if signature.name == "main"))
            .count()
    }
}
