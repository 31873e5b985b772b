//! Statement nodes, including the top-level declaration forms (function,
//! class, enum, trait, module, import, constraint) that the parser
//! restricts the program root to.

use super::common::{default_visibility, GenericParam, MemberVisibility};
use super::expression::Expression;
use super::type_expr::Type;
use crate::source::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

/// A function's signature, shared between `FunctionDeclaration` (with a
/// body) and `FunctionDefinition` (prototype-only, for interface-like
/// declarations).
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub generics: Vec<GenericParam>,
    pub params: Vec<Param>,
    pub return_type: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    pub visibility: MemberVisibility,
    pub item: ClassMemberItem,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMemberItem {
    Field { name: String, ty: Type, initializer: Option<Expression> },
    Method(Box<Statement>),
    Constructor(Box<Statement>),
}

/// A single `name = value` initializer in a constructor's initializer
/// list: `constructor(x: i32) : field = x { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Initializer {
    pub name: String,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: String,
    /// `Some(types)` when the variant carries values: `Variant(i32, str)`.
    pub fields: Option<Vec<Type>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraitMethod {
    pub signature: FunctionSignature,
    /// `None` for a prototype-only trait method, `Some` for a default
    /// implementation.
    pub default_body: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `def name: Type = expr;` or `const name: Type = expr;`; `is_const`
    /// distinguishes them at the node level since both spellings lex to
    /// the same token kind and only the lexeme tells them apart.
    VariableDeclaration {
        name: String,
        is_const: bool,
        declared_type: Option<Type>,
        initializer: Option<Box<Expression>>,
        position: Position,
    },
    /// Signature + body.
    FunctionDeclaration { signature: FunctionSignature, body: Box<Statement>, position: Position },
    /// Signature only, no body — for interface-like declarations.
    FunctionDefinition { signature: FunctionSignature, position: Position },
    ClassDeclaration {
        name: String,
        generics: Vec<GenericParam>,
        base_classes: Vec<String>,
        members: Vec<ClassMember>,
        position: Position,
    },
    ImplBlock { target: String, trait_name: Option<String>, methods: Vec<Statement>, position: Position },
    Constructor { params: Vec<Param>, initializers: Vec<Initializer>, body: Box<Statement>, position: Position },
    If {
        condition: Box<Expression>,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
        position: Position,
    },
    /// `while (cond) { ... }`; `is_do_while` distinguishes the post-condition
    /// form (both keywords lex to the same token kind).
    While { condition: Box<Expression>, body: Box<Statement>, is_do_while: bool, position: Position },
    /// `for (name: Type -> iterator) { ... }`
    For { binding: String, binding_type: Option<Type>, iterator: Box<Expression>, body: Box<Statement>, position: Position },
    Break { position: Position },
    Continue { position: Position },
    /// `return expr;` (`is_super` marks a `super return`).
    Return { value: Option<Box<Expression>>, is_super: bool, position: Position },
    Yield { value: Box<Expression>, position: Position },
    Block { statements: Vec<Statement>, position: Position },
    TypeAlias { name: String, aliased: Type, position: Position },
    UnionDeclaration { name: String, members: Vec<Type>, position: Position },
    EnumDeclaration { name: String, variants: Vec<EnumVariant>, position: Position },
    TraitDeclaration {
        name: String,
        generics: Vec<GenericParam>,
        methods: Vec<TraitMethod>,
        where_clause: Vec<GenericParam>,
        position: Position,
    },
    ModuleDeclaration { name: String, position: Position },
    Import { path: String, items: Vec<String>, position: Position },
    /// `constraint <Name><GenericParams> = <expression>;`
    ConstraintDeclaration {
        name: String,
        generics: Vec<GenericParam>,
        expression: Box<Expression>,
        position: Position,
    },
    ExpressionStatement { expression: Box<Expression>, position: Position },
}

impl Statement {
    pub fn position(&self) -> &Position {
        match self {
            Statement::VariableDeclaration { position, .. }
            | Statement::FunctionDeclaration { position, .. }
            | Statement::FunctionDefinition { position, .. }
            | Statement::ClassDeclaration { position, .. }
            | Statement::ImplBlock { position, .. }
            | Statement::Constructor { position, .. }
            | Statement::If { position, .. }
            | Statement::While { position, .. }
            | Statement::For { position, .. }
            | Statement::Break { position }
            | Statement::Continue { position }
            | Statement::Return { position, .. }
            | Statement::Yield { position, .. }
            | Statement::Block { position, .. }
            | Statement::TypeAlias { position, .. }
            | Statement::UnionDeclaration { position, .. }
            | Statement::EnumDeclaration { position, .. }
            | Statement::TraitDeclaration { position, .. }
            | Statement::ModuleDeclaration { position, .. }
            | Statement::Import { position, .. }
            | Statement::ConstraintDeclaration { position, .. }
            | Statement::ExpressionStatement { position, .. } => position,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::VariableDeclaration { .. } => "VariableDeclaration",
            Statement::FunctionDeclaration { .. } => "FunctionDeclaration",
            Statement::FunctionDefinition { .. } => "FunctionDefinition",
            Statement::ClassDeclaration { .. } => "ClassDeclaration",
            Statement::ImplBlock { .. } => "ImplBlock",
            Statement::Constructor { .. } => "ConstructorDeclaration",
            Statement::If { .. } => "IfStatement",
            Statement::While { .. } => "WhileStatement",
            Statement::For { .. } => "ForStatement",
            Statement::Break { .. } => "BreakStatement",
            Statement::Continue { .. } => "ContinueStatement",
            Statement::Return { .. } => "ReturnStatement",
            Statement::Yield { .. } => "YieldStatement",
            Statement::Block { .. } => "BlockStatement",
            Statement::TypeAlias { .. } => "TypeAliasDeclaration",
            Statement::UnionDeclaration { .. } => "UnionDeclaration",
            Statement::EnumDeclaration { .. } => "EnumDeclaration",
            Statement::TraitDeclaration { .. } => "TraitDeclaration",
            Statement::ModuleDeclaration { .. } => "ModuleDeclaration",
            Statement::Import { .. } => "ImportStatement",
            Statement::ConstraintDeclaration { .. } => "ConstraintDeclaration",
            Statement::ExpressionStatement { .. } => "ExpressionStatement",
        }
    }

    /// Whether this statement kind is permitted at the program root. Also
    /// admits `ImplBlock`, a judgment call recorded in DESIGN.md's open
    /// questions: neither the grammar's top-level list nor the original
    /// source settles whether `impl` blocks may stand alone at the root.
    pub fn allowed_at_top_level(&self) -> bool {
        matches!(
            self,
            Statement::VariableDeclaration { .. }
                | Statement::FunctionDeclaration { .. }
                | Statement::FunctionDefinition { .. }
                | Statement::ModuleDeclaration { .. }
                | Statement::Import { .. }
                | Statement::TypeAlias { .. }
                | Statement::EnumDeclaration { .. }
                | Statement::TraitDeclaration { .. }
                | Statement::ClassDeclaration { .. }
                | Statement::UnionDeclaration { .. }
                | Statement::ConstraintDeclaration { .. }
                | Statement::ImplBlock { .. }
        )
    }
}

pub fn field_visibility(member: &ClassMember) -> MemberVisibility {
    member.visibility
}

pub fn default_member_visibility() -> MemberVisibility {
    default_visibility()
}
