//! Type lowering: primitive types, intersection types, generic functions
//! and classes, ownership qualifiers.

use super::CodeGenerator;
use crate::ast::{GenericParam, Prefix, Type};
use crate::lexer::token::PrimitiveType;

impl CodeGenerator {
    pub(crate) fn emit_type(&mut self, ty: &Type) -> String {
        match ty {
            Type::Identifier { name, .. } => self.emit_named_type(name),
            Type::Generic { base, args, .. } => {
                let base_text = self.emit_named_type(base);
                let args_text = args.iter().map(|a| self.emit_type(a)).collect::<Vec<_>>().join(", ");
                format!("{base_text}<{args_text}>")
            }
            // A sum type has no first-class C++ equivalent; lowered to a
            // tagged union via the standard library.
            Type::Sum { members, .. } => {
                self.dependencies.insert("variant");
                let parts = members.iter().map(|m| self.emit_type(m)).collect::<Vec<_>>().join(", ");
                format!("std::variant<{parts}>")
            }
            // Erased to the nominal base type at lowering: the
            // intersecting constraints were already enforced at the
            // generic's `requires` clause, so only the first member's
            // shape is kept here.
            Type::Intersection { members, .. } => {
                self.emit_type(&members[0])
            }
            Type::Prefixed { prefix, inner, .. } => {
                let inner_text = self.emit_type(inner);
                match prefix {
                    Prefix::Pointer => format!("{inner_text}*"),
                    Prefix::Owned => {
                        self.dependencies.insert("owned");
                        format!("std::unique_ptr<{inner_text}>")
                    }
                    Prefix::Reference => format!("const {inner_text}&"),
                    Prefix::MutableReference => format!("{inner_text}&"),
                }
            }
            Type::Array { element, size, .. } => {
                let element_text = self.emit_type(element);
                format!("std::array<{element_text}, {size}>")
            }
            Type::Function { params, ret, .. } => {
                let ret_text = self.emit_type(ret);
                let params_text = params.iter().map(|p| self.emit_type(p)).collect::<Vec<_>>().join(", ");
                format!("std::function<{ret_text}({params_text})>")
            }
            Type::Closure { ret, .. } => {
                let ret_text = self.emit_type(ret);
                format!("std::function<{ret_text}()>")
            }
            Type::Variadic { inner, .. } => {
                let inner_text = self.emit_type(inner);
                format!("{inner_text}...")
            }
        }
    }

    fn emit_named_type(&mut self, name: &str) -> String {
        match PrimitiveType::from_keyword(name) {
            Some(p) => self.emit_primitive(p),
            None => name.to_owned(),
        }
    }

    fn emit_primitive(&mut self, p: PrimitiveType) -> String {
        use PrimitiveType::*;
        match p {
            I8 => "int8_t".to_owned(),
            I16 => "int16_t".to_owned(),
            I32 => "int32_t".to_owned(),
            I64 => "int64_t".to_owned(),
            I128 => {
                self.dependencies.insert("i128");
                "argon::i128".to_owned()
            }
            U8 => "uint8_t".to_owned(),
            U16 => "uint16_t".to_owned(),
            U32 => "uint32_t".to_owned(),
            U64 => "uint64_t".to_owned(),
            U128 => {
                self.dependencies.insert("i128");
                "argon::u128".to_owned()
            }
            F32 => "float".to_owned(),
            F64 => "double".to_owned(),
            // No dedicated 128-bit float runtime helper exists (only
            // integers get one); `long double` is the closest native
            // approximation.
            F128 => "long double".to_owned(),
            Bool => "bool".to_owned(),
            Str => {
                self.dependencies.insert("string");
                "std::string".to_owned()
            }
            Chr => "char".to_owned(),
        }
    }

    /// `template<typename T, ...>\nrequires <conjuncts>\n`, or an empty
    /// string when `generics` is empty.
    pub(crate) fn emit_generic_header(&mut self, generics: &[GenericParam]) -> String {
        if generics.is_empty() {
            return String::new();
        }
        let names = generics.iter().map(|g| format!("typename {}", g.name)).collect::<Vec<_>>().join(", ");
        let conjuncts = generics
            .iter()
            .map(|g| self.emit_constraint_conjunct(&g.name, &g.constraint))
            .collect::<Vec<_>>()
            .join(" && ");
        format!("template<{names}>\nrequires {conjuncts}\n")
    }

    /// A `template<typename T, ...>` header with no `requires` clause, used
    /// by `concept` definitions.
    pub(crate) fn emit_generic_template_only(&mut self, generics: &[GenericParam]) -> String {
        if generics.is_empty() {
            return String::new();
        }
        let names = generics.iter().map(|g| format!("typename {}", g.name)).collect::<Vec<_>>().join(", ");
        format!("template<{names}>\n")
    }

    /// One `requires`-clause conjunct for a single generic parameter's
    /// constraint: a built-in trait name conjuncts as `Trait<T>`, a
    /// concrete primitive type `K` conjuncts as `same-type-as<T, K>`, and
    /// a user-defined constraint name conjuncts as that concept applied
    /// to `T`.
    fn emit_constraint_conjunct(&mut self, param: &str, constraint: &Type) -> String {
        match constraint {
            Type::Identifier { name, .. } if name == "Type" => "true".to_owned(),
            Type::Identifier { name, .. } if PrimitiveType::from_keyword(name).is_some() => {
                let target = self.emit_named_type(name);
                format!("std::same_as<{param}, {target}>")
            }
            Type::Identifier { name, .. } => format!("{name}<{param}>"),
            Type::Intersection { members, .. } => members
                .iter()
                .map(|m| self.emit_constraint_conjunct(param, m))
                .collect::<Vec<_>>()
                .join(" && "),
            other => {
                let text = self.emit_type(other);
                format!("{text}<{param}>")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Position;

    fn pos() -> Position {
        Position::synthetic()
    }

    #[test]
    fn primitive_widths_map_to_fixed_width_integers() {
        let mut g = CodeGenerator::new();
        assert_eq!(g.emit_type(&Type::identifier("i8", pos())), "int8_t");
        assert_eq!(g.emit_type(&Type::identifier("u64", pos())), "uint64_t");
    }

    #[test]
    fn i128_pulls_in_the_runtime_dependency() {
        let mut g = CodeGenerator::new();
        g.emit_type(&Type::identifier("i128", pos()));
        assert!(g.dependencies().contains("i128"));
    }

    #[test]
    fn intersection_type_erases_to_first_member() {
        let mut g = CodeGenerator::new();
        let ty = Type::Intersection {
            members: vec![Type::identifier("T", pos()), Type::identifier("Display", pos())],
            position: pos(),
        };
        assert_eq!(g.emit_type(&ty), "T");
    }

    #[test]
    fn generic_header_builds_one_conjunct_per_parameter() {
        let mut g = CodeGenerator::new();
        let generics = vec![
            GenericParam { name: "T".to_owned(), constraint: Type::identifier("Number", pos()) },
            GenericParam { name: "U".to_owned(), constraint: Type::identifier("Type", pos()) },
        ];
        let header = g.emit_generic_header(&generics);
        assert!(header.contains("template<typename T, typename U>"));
        assert!(header.contains("Number<T>"));
        assert!(header.contains("true"));
    }
}
