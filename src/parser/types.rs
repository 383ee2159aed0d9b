//! Type grammar
//!
//! Parses TinyC types and the two type-shaped top-level declarations:
//!
//! - `TYPE -> BASE_TYPE STAR_SEQ | void STAR_PLUS | struct identifier
//!   STAR_SEQ | identifier STAR_SEQ`
//! - struct declarations/definitions (`struct Name;` / `struct Name { ... };`)
//! - function-pointer typedefs (`typedef RET (*Name)(TYPE, ...);`)
//!
//! `STAR_SEQ` wraps the base type left to right, so `int**` builds
//! `Pointer(Pointer(Primitive(int)))`. A bare `void` is only legal as a
//! function return type; everywhere else `void` must be followed by at least
//! one `*` (`STAR_PLUS`). `struct Name` in type position becomes
//! `Named("struct:Name")`.

use crate::parser::ast::{Declaration, PrimitiveKind, Type, VariableDecl};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Error, Parser};

impl Parser {
    /// TYPE — any type usable for variables, fields, and parameters.
    pub(crate) fn parse_type(&mut self) -> Result<Type, Error> {
        match self.peek().kind {
            TokenKind::KwInt | TokenKind::KwDouble | TokenKind::KwChar => {
                let base = self.parse_base_type()?;
                self.parse_star_seq(base)
            }
            TokenKind::KwVoid => {
                let void_token = self.consume()?;
                let base = Type::Primitive {
                    kind: PrimitiveKind::Void,
                    location: void_token.location,
                };
                self.parse_star_plus(base)
            }
            TokenKind::KwStruct => {
                let struct_token = self.consume()?;
                let ident = self.expect(TokenKind::Identifier, "Expected struct name in type")?;
                let base = Type::Named {
                    identifier: format!("struct:{}", ident.lexeme),
                    location: struct_token.location,
                };
                self.parse_star_seq(base)
            }
            TokenKind::Identifier => {
                let ident = self.consume()?;
                let base = Type::Named {
                    identifier: ident.lexeme,
                    location: ident.location,
                };
                self.parse_star_seq(base)
            }
            _ => self.error("Expected type (int, double, char, void)"),
        }
    }

    /// NON_VOID_TYPE — the type of a non-void top-level declaration.
    pub(crate) fn parse_non_void_type(&mut self) -> Result<Type, Error> {
        match self.peek().kind {
            TokenKind::KwInt | TokenKind::KwDouble | TokenKind::KwChar => {
                let base = self.parse_base_type()?;
                self.parse_star_seq(base)
            }
            _ => self.error("Expected non-void type (int, double, char)"),
        }
    }

    /// TYPE_FUN_RET — function return types, where bare `void` is legal.
    pub(crate) fn parse_type_fun_ret(&mut self) -> Result<Type, Error> {
        match self.peek().kind {
            TokenKind::KwVoid => {
                let void_token = self.consume()?;
                let base = Type::Primitive {
                    kind: PrimitiveKind::Void,
                    location: void_token.location,
                };
                self.parse_star_seq(base)
            }
            TokenKind::KwInt | TokenKind::KwDouble | TokenKind::KwChar => {
                let base = self.parse_base_type()?;
                self.parse_star_seq(base)
            }
            _ => self.error("Expected function return type (void, int, double, char)"),
        }
    }

    fn parse_base_type(&mut self) -> Result<Type, Error> {
        let kind = match self.peek().kind {
            TokenKind::KwInt => PrimitiveKind::Int,
            TokenKind::KwDouble => PrimitiveKind::Double,
            TokenKind::KwChar => PrimitiveKind::Char,
            _ => return self.error("Expected base type (int, double, char)"),
        };
        let token = self.consume()?;
        Ok(Type::Primitive {
            kind,
            location: token.location,
        })
    }

    /// STAR_PLUS -> * STAR_SEQ
    pub(crate) fn parse_star_plus(&mut self, base: Type) -> Result<Type, Error> {
        let star = self.expect(TokenKind::Star, "Expected '*' for pointer type")?;
        let pointer = Type::Pointer {
            base: Box::new(base),
            location: star.location,
        };
        self.parse_star_seq(pointer)
    }

    /// STAR_SEQ -> * STAR_SEQ | ε
    fn parse_star_seq(&mut self, mut ty: Type) -> Result<Type, Error> {
        while self.check(TokenKind::Star) {
            let star = self.consume()?;
            ty = Type::Pointer {
                base: Box::new(ty),
                location: star.location,
            };
        }
        Ok(ty)
    }

    /// STRUCT_DECL -> struct identifier [ '{' { TYPE identifier ';' } '}' ] ';'
    pub(crate) fn parse_struct_decl(&mut self) -> Result<Declaration, Error> {
        let struct_token = self.expect(TokenKind::KwStruct, "Expected 'struct'")?;
        let ident = self.expect(TokenKind::Identifier, "Expected struct name")?;

        let mut fields = Vec::new();
        if self.match_token(TokenKind::LBrace)? {
            while !self.check(TokenKind::RBrace) {
                let ty = self.parse_type()?;
                let field_name = self.expect(TokenKind::Identifier, "Expected field name")?;
                self.expect(TokenKind::Semicolon, "Expected ';' after struct field")?;

                fields.push(VariableDecl {
                    identifier: field_name.lexeme,
                    ty,
                    array_size: None,
                    initializer: None,
                    location: field_name.location,
                });
            }
            self.expect(TokenKind::RBrace, "Expected '}' after struct fields")?;
        }

        self.expect(TokenKind::Semicolon, "Expected ';' after struct declaration")?;

        Ok(Declaration::Struct {
            identifier: ident.lexeme,
            fields,
            location: struct_token.location,
        })
    }

    /// FUNPTR_DECL -> typedef TYPE_FUN_RET ( * identifier ) ( OPT_FUNPTR_ARGS ) ;
    pub(crate) fn parse_fun_ptr_decl(&mut self) -> Result<Declaration, Error> {
        let typedef_token = self.expect(TokenKind::KwTypedef, "Expected 'typedef'")?;
        let return_type = self.parse_type_fun_ret()?;

        self.expect(TokenKind::LParen, "Expected '(' after return type")?;
        self.expect(TokenKind::Star, "Expected '*' for function pointer")?;
        let ident = self.expect(TokenKind::Identifier, "Expected function pointer name")?;
        self.expect(TokenKind::RParen, "Expected ')' after function pointer name")?;

        self.expect(TokenKind::LParen, "Expected '(' for parameter list")?;
        let parameter_types = self.parse_opt_fun_ptr_args()?;
        self.expect(TokenKind::RParen, "Expected ')' after parameter list")?;
        self.expect(
            TokenKind::Semicolon,
            "Expected ';' after function pointer declaration",
        )?;

        Ok(Declaration::FunctionPointer {
            identifier: ident.lexeme,
            return_type,
            parameter_types,
            location: typedef_token.location,
        })
    }

    /// OPT_FUNPTR_ARGS -> TYPE { ',' TYPE } | ε
    fn parse_opt_fun_ptr_args(&mut self) -> Result<Vec<Type>, Error> {
        match self.peek().kind {
            TokenKind::KwVoid
            | TokenKind::KwInt
            | TokenKind::KwDouble
            | TokenKind::KwChar
            | TokenKind::KwStruct
            | TokenKind::Identifier => {
                let mut types = vec![self.parse_type()?];
                while self.match_token(TokenKind::Comma)? {
                    types.push(self.parse_type()?);
                }
                Ok(types)
            }
            _ => Ok(Vec::new()),
        }
    }
}
