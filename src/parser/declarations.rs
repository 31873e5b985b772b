//! Top-level declaration forms (the statement dispatch list restricted to
//! the top-level-permitted subset) plus the generic-parameter/constraint
//! grammar shared by functions, classes and traits.

use super::Parser;
use crate::ast::*;
use crate::error::{ArgonResult, WithFrame};
use crate::lexer::token::TokenKind;

impl Parser {
    /// Dispatches on the leading token, same family as `statement()` but
    /// called only at the program root (and, through `statement()`, from
    /// inside blocks too — the top-level *restriction* is enforced by the
    /// caller via `Statement::allowed_at_top_level`, not by this method
    /// refusing to parse anything else).
    pub(crate) fn top_level_declaration(&mut self) -> ArgonResult<Statement> {
        self.statement()
    }

    /// `func name<T: C, ...>(a: A, b: B) R -> expr;` or `{ ... }`, or a
    /// bodyless `func name(...) R;` (FunctionDefinition).
    pub(crate) fn parse_function(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        self.expect_exact(TokenKind::Func, "'func'")?;
        let (name, _) = self.expect_identifier()?;
        let generics = self.parse_optional_generic_params().trace("FunctionDeclaration", start.clone())?;
        self.expect_exact(TokenKind::LeftParen, "'('")?;
        let params = self.parse_param_list()?;
        self.expect_exact(TokenKind::RightParen, "')'")?;
        let return_type = self.parse_type().trace("FunctionDeclaration", start.clone())?;

        let signature = FunctionSignature { name, generics, params, return_type };

        if self.take_exact(&TokenKind::Semicolon) {
            return Ok(Statement::FunctionDefinition { signature, position: start });
        }

        let body = if self.check(|k| matches!(k, TokenKind::Arrow)) {
            self.advance();
            let expr = self.expression().trace("FunctionDeclaration", start.clone())?;
            self.expect_exact(TokenKind::Semicolon, "';'")?;
            let pos = expr.position().clone();
            Statement::Block { statements: vec![Statement::ExpressionStatement { expression: Box::new(expr), position: pos.clone() }], position: pos }
        } else {
            self.parse_block()?
        };

        Ok(Statement::FunctionDeclaration { signature, body: Box::new(body), position: start })
    }

    pub(crate) fn parse_param_list(&mut self) -> ArgonResult<Vec<Param>> {
        let mut params = Vec::new();
        if self.check(|k| matches!(k, TokenKind::RightParen)) {
            return Ok(params);
        }
        loop {
            let (name, _) = self.expect_identifier()?;
            self.expect_exact(TokenKind::Colon, "':'")?;
            let ty = self.parse_type()?;
            params.push(Param { name, ty });
            if !self.take_exact(&TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    /// `<T: Constraint, U: Other>`, absent entirely if there is no `<`.
    pub(crate) fn parse_optional_generic_params(&mut self) -> ArgonResult<Vec<GenericParam>> {
        if !self.take_exact(&TokenKind::Less) {
            return Ok(Vec::new());
        }
        let mut params = Vec::new();
        loop {
            let (name, _) = self.expect_identifier()?;
            let constraint = if self.take_exact(&TokenKind::Colon) {
                self.parse_type()?
            } else {
                Type::identifier("Type", self.position())
            };
            params.push(GenericParam { name, constraint });
            if !self.take_exact(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_exact(TokenKind::Greater, "'>'")?;
        Ok(params)
    }

    /// `class Name<T> : Base1, Base2 { members }`
    pub(crate) fn parse_class(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        self.expect_exact(TokenKind::Class, "'class'")?;
        let (name, _) = self.expect_identifier()?;
        let generics = self.parse_optional_generic_params()?;

        let mut base_classes = Vec::new();
        if self.take_exact(&TokenKind::Colon) {
            loop {
                let (base, _) = self.expect_identifier()?;
                base_classes.push(base);
                if !self.take_exact(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_exact(TokenKind::LeftBrace, "'{'")?;
        let mut members = Vec::new();
        while !self.check(|k| matches!(k, TokenKind::RightBrace)) && !self.is_at_end() {
            members.push(self.parse_class_member().trace("ClassDeclaration", start.clone())?);
        }
        self.expect_exact(TokenKind::RightBrace, "'}'")?;

        Ok(Statement::ClassDeclaration { name, generics, base_classes, members, position: start })
    }

    fn parse_visibility(&mut self) -> crate::ast::MemberVisibility {
        match self.current_kind().clone() {
            TokenKind::Visibility(v) => {
                self.advance();
                v
            }
            _ => crate::ast::default_visibility(),
        }
    }

    fn parse_class_member(&mut self) -> ArgonResult<ClassMember> {
        let visibility = self.parse_visibility();
        if self.check(|k| matches!(k, TokenKind::Func)) {
            let method = self.parse_function()?;
            return Ok(ClassMember { visibility, item: ClassMemberItem::Method(Box::new(method)) });
        }
        if self.check(|k| matches!(k, TokenKind::Constructor)) {
            let ctor = self.parse_constructor()?;
            return Ok(ClassMember { visibility, item: ClassMemberItem::Constructor(Box::new(ctor)) });
        }
        // Field: `name: Type = init;`
        let (name, _) = self.expect_identifier()?;
        self.expect_exact(TokenKind::Colon, "':'")?;
        let ty = self.parse_type()?;
        let initializer = if self.take_exact(&TokenKind::Assign) { Some(self.expression()?) } else { None };
        self.expect_exact(TokenKind::Semicolon, "';'")?;
        Ok(ClassMember { visibility, item: ClassMemberItem::Field { name, ty, initializer } })
    }

    /// `constructor(params) : field1 = e1, field2 = e2 { body }`
    pub(crate) fn parse_constructor(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        self.expect_exact(TokenKind::Constructor, "'constructor'")?;
        self.expect_exact(TokenKind::LeftParen, "'('")?;
        let params = self.parse_param_list()?;
        self.expect_exact(TokenKind::RightParen, "')'")?;

        let mut initializers = Vec::new();
        if self.take_exact(&TokenKind::Colon) {
            loop {
                let (name, _) = self.expect_identifier()?;
                self.expect_exact(TokenKind::Assign, "'='")?;
                let value = self.expression()?;
                initializers.push(Initializer { name, value });
                if !self.take_exact(&TokenKind::Comma) {
                    break;
                }
            }
        }

        let body = self.parse_block()?;
        Ok(Statement::Constructor { params, initializers, body: Box::new(body), position: start })
    }

    /// `impl [Trait for] Target { methods }`
    pub(crate) fn parse_impl(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        self.expect_exact(TokenKind::Impl, "'impl'")?;
        let (first, _) = self.expect_identifier()?;
        let (trait_name, target) = if self.take_exact(&TokenKind::For) {
            let (target, _) = self.expect_identifier()?;
            (Some(first), target)
        } else {
            (None, first)
        };
        self.expect_exact(TokenKind::LeftBrace, "'{'")?;
        let mut methods = Vec::new();
        while !self.check(|k| matches!(k, TokenKind::RightBrace)) && !self.is_at_end() {
            methods.push(self.parse_function().trace("ImplBlock", start.clone())?);
        }
        self.expect_exact(TokenKind::RightBrace, "'}'")?;
        Ok(Statement::ImplBlock { target, trait_name, methods, position: start })
    }

    /// `using Name = Type;`
    pub(crate) fn parse_type_alias(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        self.expect_exact(TokenKind::Using, "'using'")?;
        let (name, _) = self.expect_identifier()?;
        self.expect_exact(TokenKind::Assign, "'='")?;
        let aliased = self.parse_type()?;
        self.expect_exact(TokenKind::Semicolon, "';'")?;
        Ok(Statement::TypeAlias { name, aliased, position: start })
    }

    /// `union Name = A | B | C;`
    pub(crate) fn parse_union(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        self.expect_exact(TokenKind::Union, "'union'")?;
        let (name, _) = self.expect_identifier()?;
        self.expect_exact(TokenKind::Assign, "'='")?;
        let mut members = vec![self.parse_type()?];
        while self.take_exact(&TokenKind::FilterRange) {
            members.push(self.parse_type()?);
        }
        self.expect_exact(TokenKind::Semicolon, "';'")?;
        Ok(Statement::UnionDeclaration { name, members, position: start })
    }

    /// `enum Name { Variant, Other(i32, str) }`
    pub(crate) fn parse_enum(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        self.expect_exact(TokenKind::Enum, "'enum'")?;
        let (name, _) = self.expect_identifier()?;
        self.expect_exact(TokenKind::LeftBrace, "'{'")?;
        let mut variants = Vec::new();
        while !self.check(|k| matches!(k, TokenKind::RightBrace)) && !self.is_at_end() {
            let (vname, _) = self.expect_identifier()?;
            let fields = if self.take_exact(&TokenKind::LeftParen) {
                let mut types = Vec::new();
                if !self.check(|k| matches!(k, TokenKind::RightParen)) {
                    loop {
                        types.push(self.parse_type()?);
                        if !self.take_exact(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect_exact(TokenKind::RightParen, "')'")?;
                Some(types)
            } else {
                None
            };
            variants.push(EnumVariant { name: vname, fields });
            if !self.take_exact(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_exact(TokenKind::RightBrace, "'}'")?;
        Ok(Statement::EnumDeclaration { name, variants, position: start })
    }

    /// `trait Name<T> where W { method signatures/defaults }`
    pub(crate) fn parse_trait(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        self.expect_exact(TokenKind::Trait, "'trait'")?;
        let (name, _) = self.expect_identifier()?;
        let generics = self.parse_optional_generic_params()?;
        let where_clause = if self.take_exact(&TokenKind::Where) {
            // `where` introduces a bare comma-separated list, unlike the
            // angle-bracketed `<T: C, ...>` generic-parameter list.
            self.parse_where_params()?
        } else {
            Vec::new()
        };

        self.expect_exact(TokenKind::LeftBrace, "'{'")?;
        let mut methods = Vec::new();
        while !self.check(|k| matches!(k, TokenKind::RightBrace)) && !self.is_at_end() {
            methods.push(self.parse_trait_method().trace("TraitDeclaration", start.clone())?);
        }
        self.expect_exact(TokenKind::RightBrace, "'}'")?;

        Ok(Statement::TraitDeclaration { name, generics, methods, where_clause, position: start })
    }

    /// A bare (no angle brackets) `T: Constraint, U: Other` list, used
    /// after `where`.
    fn parse_where_params(&mut self) -> ArgonResult<Vec<GenericParam>> {
        let mut params = Vec::new();
        loop {
            let (name, _) = self.expect_identifier()?;
            self.expect_exact(TokenKind::Colon, "':'")?;
            let constraint = self.parse_type()?;
            params.push(GenericParam { name, constraint });
            if !self.take_exact(&TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    fn parse_trait_method(&mut self) -> ArgonResult<TraitMethod> {
        let start = self.position();
        self.expect_exact(TokenKind::Func, "'func'")?;
        let (name, _) = self.expect_identifier()?;
        let generics = self.parse_optional_generic_params()?;
        self.expect_exact(TokenKind::LeftParen, "'('")?;
        let params = self.parse_param_list()?;
        self.expect_exact(TokenKind::RightParen, "')'")?;
        let return_type = self.parse_type()?;
        let signature = FunctionSignature { name, generics, params, return_type };

        let default_body = if self.take_exact(&TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_block().trace("TraitDeclaration", start)?))
        };
        Ok(TraitMethod { signature, default_body })
    }

    /// `module Name;`
    pub(crate) fn parse_module(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        self.expect_exact(TokenKind::Module, "'module'")?;
        let (name, _) = self.expect_identifier()?;
        self.expect_exact(TokenKind::Semicolon, "';'")?;
        Ok(Statement::ModuleDeclaration { name, position: start })
    }

    /// `import path::to::module;` or `import path::to::module::{a, b};`
    pub(crate) fn parse_import(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        self.expect_exact(TokenKind::Import, "'import'")?;
        let mut segments = vec![self.expect_identifier()?.0];
        while self.take_exact(&TokenKind::DoubleColon) {
            if self.take_exact(&TokenKind::LeftBrace) {
                let mut items = Vec::new();
                loop {
                    items.push(self.expect_identifier()?.0);
                    if !self.take_exact(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect_exact(TokenKind::RightBrace, "'}'")?;
                self.expect_exact(TokenKind::Semicolon, "';'")?;
                return Ok(Statement::Import { path: segments.join("::"), items, position: start });
            }
            segments.push(self.expect_identifier()?.0);
        }
        self.expect_exact(TokenKind::Semicolon, "';'")?;
        Ok(Statement::Import { path: segments.join("::"), items: Vec::new(), position: start })
    }

    /// `constraint <Name><T, ...> = expr;`
    pub(crate) fn parse_constraint(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        self.expect_exact(TokenKind::Constraint, "'constraint'")?;
        let (name, _) = self.expect_identifier()?;
        let generics = self.parse_optional_generic_params()?;
        self.expect_exact(TokenKind::Assign, "'='")?;
        let expression = self.expression().trace("ConstraintDeclaration", start.clone())?;
        self.expect_exact(TokenKind::Semicolon, "';'")?;
        Ok(Statement::ConstraintDeclaration { name, generics, expression: Box::new(expression), position: start })
    }

    pub(crate) fn parse_variable_declaration(&mut self) -> ArgonResult<Statement> {
        let start = self.position();
        let keyword = self.expect_exact(TokenKind::Def, "'def' or 'const'")?;
        // `const`/`def` both lex to `Def`; constness follows which spelling
        // was actually written, not a trailing `mut`.
        let is_const = keyword.lexeme == "const";
        let (name, _) = self.expect_identifier()?;
        let declared_type = if self.take_exact(&TokenKind::Colon) { Some(self.parse_type()?) } else { None };
        let initializer = if self.take_exact(&TokenKind::Assign) {
            Some(Box::new(self.expression().trace("VariableDeclaration", start.clone())?))
        } else {
            None
        };
        self.expect_exact(TokenKind::Semicolon, "';'")?;
        Ok(Statement::VariableDeclaration { name, is_const, declared_type, initializer, position: start })
    }
}
