//! Pattern nodes, matched in the `match` expression's arms.
//!
//! Every pattern both tests a value and optionally binds names; an
//! `Identifier` pattern's `guard` is an arbitrary boolean expression that
//! may reference those bindings, matching the grammar's
//! `match (expr) { pat if guard -> body, ... }` arm shape.

use super::expression::Expression;
use super::type_expr::Type;
use crate::source::Position;

/// A single field inside a struct pattern: `name` (shorthand, binds `name`)
/// or `name: sub_pattern`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPattern {
    pub name: String,
    pub sub_pattern: Option<Box<Pattern>>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// `_`
    Wildcard { position: Position },
    /// A literal value used as a test: `1`, `"str"`, `true`.
    Literal { value: Box<Expression>, position: Position },
    /// `name` or `name && guard`.
    Identifier { name: String, guard: Option<Box<Expression>>, position: Position },
    /// `[p1, p2, ...tail]` — `rest` names the binding absorbing the tail,
    /// if present.
    Array { elements: Vec<Pattern>, rest: Option<String>, position: Position },
    /// `{ f1, f2: sub }`
    Struct { fields: Vec<FieldPattern>, position: Position },
    /// `Enum::Variant(p1, p2)` or a bare `Variant(p1, p2)`.
    Constructor { path: String, args: Vec<Pattern>, position: Position },
    /// `i32(x)` — tests the runtime type and binds `x` to the narrowed
    /// value.
    TypePattern { ty: Type, binding: Option<String>, position: Position },
    /// `lo to hi` (exclusive) or `lo to= hi` (inclusive).
    Range { lo: Box<Expression>, hi: Box<Expression>, inclusive: bool, position: Position },
}

impl Pattern {
    pub fn position(&self) -> &Position {
        match self {
            Pattern::Wildcard { position }
            | Pattern::Literal { position, .. }
            | Pattern::Identifier { position, .. }
            | Pattern::Array { position, .. }
            | Pattern::Struct { position, .. }
            | Pattern::Constructor { position, .. }
            | Pattern::TypePattern { position, .. }
            | Pattern::Range { position, .. } => position,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Pattern::Wildcard { .. } => "WildcardPattern",
            Pattern::Literal { .. } => "LiteralPattern",
            Pattern::Identifier { .. } => "IdentifierPattern",
            Pattern::Array { .. } => "ArrayPattern",
            Pattern::Struct { .. } => "StructPattern",
            Pattern::Constructor { .. } => "ConstructorPattern",
            Pattern::TypePattern { .. } => "TypePattern",
            Pattern::Range { .. } => "RangePattern",
        }
    }

    /// Every binding name this pattern introduces, in left-to-right order.
    /// Used by the emitter to produce the arm's destructuring prologue.
    pub fn bound_names(&self) -> Vec<String> {
        match self {
            Pattern::Wildcard { .. } | Pattern::Literal { .. } | Pattern::Range { .. } => Vec::new(),
            Pattern::Identifier { name, .. } => vec![name.clone()],
            Pattern::Array { elements, rest, .. } => {
                let mut names: Vec<String> = elements.iter().flat_map(Pattern::bound_names).collect();
                if let Some(rest) = rest {
                    names.push(rest.clone());
                }
                names
            }
            Pattern::Struct { fields, .. } => fields
                .iter()
                .flat_map(|f| match &f.sub_pattern {
                    Some(p) => p.bound_names(),
                    None => vec![f.name.clone()],
                })
                .collect(),
            Pattern::Constructor { args, .. } => args.iter().flat_map(Pattern::bound_names).collect(),
            Pattern::TypePattern { binding, .. } => binding.iter().cloned().collect(),
        }
    }
}
