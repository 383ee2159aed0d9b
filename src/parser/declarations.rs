//! Declaration parsing
//!
//! After the program-level dispatch has consumed `TYPE identifier`, a single
//! token decides the continuation: `(` starts a function
//! declaration/definition tail, anything else (`[`, `=`, `,`, `;`) goes
//! through the variable tail. `void` declarations get their own tail because
//! a value of type `void` has no meaning on its own: `void f()` is a
//! function, `void* p` needs at least one star before the identifier.
//!
//! Comma-continued variable declarations each carry their own full type
//! (`int a = 1, char c;` is legal); a list of more than one folds into
//! [`Declaration::Multiple`].

use crate::parser::ast::{
    Declaration, Expr, Parameter, PrimitiveKind, SourceLocation, Stmt, Type, VariableDecl,
};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Error, Parser};

impl Parser {
    /// NOT_VOID_FUNCTION_OR_VARIABLE -> VARIABLE_TAIL | FUNCTION_DECLARATION_TAIL
    ///
    /// `(` starts a function tail; everything else goes through the variable
    /// tail, whose `';'` expectation blames the offending token (`int x` with
    /// no semicolon reports "Expected ';'" at the token after `x`).
    pub(crate) fn parse_not_void_function_or_variable(
        &mut self,
        ty: Type,
        identifier: String,
        location: SourceLocation,
    ) -> Result<Declaration, Error> {
        match self.peek().kind {
            TokenKind::LParen => self.parse_function_declaration_tail(ty, identifier, location),
            _ => self.parse_variable_tail(ty, identifier, location),
        }
    }

    /// VOID_DECL_TAIL -> identifier FUNCTION_DECLARATION_TAIL
    ///                |  STAR_PLUS identifier FUNC_OR_VAR_TAIL
    pub(crate) fn parse_void_decl_tail(
        &mut self,
        void_location: SourceLocation,
    ) -> Result<Declaration, Error> {
        let void_type = Type::Primitive {
            kind: PrimitiveKind::Void,
            location: void_location,
        };

        if self.check(TokenKind::Identifier) {
            // Only functions can return bare void.
            let ident = self.consume()?;
            self.parse_function_declaration_tail(void_type, ident.lexeme, ident.location)
        } else if self.check(TokenKind::Star) {
            let ty = self.parse_star_plus(void_type)?;
            let ident = self.expect(TokenKind::Identifier, "Expected identifier after void*")?;
            self.parse_func_or_var_tail(ty, ident.lexeme, ident.location)
        } else {
            self.error("Expected identifier or '*' after 'void'")
        }
    }

    /// FUNC_OR_VAR_TAIL -> VARIABLE_TAIL | FUNCTION_DECLARATION_TAIL
    fn parse_func_or_var_tail(
        &mut self,
        ty: Type,
        identifier: String,
        location: SourceLocation,
    ) -> Result<Declaration, Error> {
        match self.peek().kind {
            TokenKind::LParen => self.parse_function_declaration_tail(ty, identifier, location),
            _ => self.parse_variable_tail(ty, identifier, location),
        }
    }

    /// VARIABLE_TAIL -> OPT_ARRAY_SIZE OPT_INIT VAR_DECLS_TAIL ';'
    fn parse_variable_tail(
        &mut self,
        ty: Type,
        identifier: String,
        location: SourceLocation,
    ) -> Result<Declaration, Error> {
        let array_size = self.parse_opt_array_size()?;
        let initializer = self.parse_opt_init()?;

        let mut declarations = vec![VariableDecl {
            identifier,
            ty,
            array_size,
            initializer,
            location: location.clone(),
        }];

        while self.match_token(TokenKind::Comma)? {
            declarations.push(self.parse_var_decl()?);
        }
        self.expect(
            TokenKind::Semicolon,
            "Expected ';' after variable declaration",
        )?;

        if declarations.len() == 1 {
            Ok(Declaration::Variable(declarations.remove(0)))
        } else {
            Ok(Declaration::Multiple {
                declarations,
                location,
            })
        }
    }

    /// FUNCTION_DECLARATION_TAIL -> '(' OPT_FUN_ARGS ')' FUNC_TAIL
    fn parse_function_declaration_tail(
        &mut self,
        return_type: Type,
        identifier: String,
        location: SourceLocation,
    ) -> Result<Declaration, Error> {
        self.expect(TokenKind::LParen, "Expected '(' after function name")?;
        let parameters = self.parse_opt_fun_args()?;
        self.expect(TokenKind::RParen, "Expected ')' after function parameters")?;

        let body = self.parse_func_tail()?;

        Ok(Declaration::Function {
            identifier,
            return_type,
            parameters,
            body,
            location,
        })
    }

    /// FUNC_TAIL -> BLOCK_STMT | ';'
    ///
    /// A block body makes the declaration a definition; a bare semicolon
    /// leaves it a forward declaration.
    fn parse_func_tail(&mut self) -> Result<Option<Box<Stmt>>, Error> {
        if self.check(TokenKind::LBrace) {
            Ok(Some(Box::new(self.parse_block_stmt()?)))
        } else if self.match_token(TokenKind::Semicolon)? {
            Ok(None)
        } else {
            self.error("Expected '{' or ';' after function declaration")
        }
    }

    /// OPT_FUN_ARGS -> FUN_ARG { ',' FUN_ARG } | ε
    fn parse_opt_fun_args(&mut self) -> Result<Vec<Parameter>, Error> {
        match self.peek().kind {
            TokenKind::KwVoid
            | TokenKind::KwInt
            | TokenKind::KwDouble
            | TokenKind::KwChar
            | TokenKind::KwStruct
            | TokenKind::Identifier => {
                let mut parameters = vec![self.parse_fun_arg()?];
                while self.match_token(TokenKind::Comma)? {
                    parameters.push(self.parse_fun_arg()?);
                }
                Ok(parameters)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// FUN_ARG -> TYPE identifier
    fn parse_fun_arg(&mut self) -> Result<Parameter, Error> {
        let ty = self.parse_type()?;
        let ident = self.expect(TokenKind::Identifier, "Expected parameter identifier")?;
        Ok(Parameter {
            identifier: ident.lexeme,
            ty,
            location: ident.location,
        })
    }

    /// VAR_DECLS -> VAR_DECL { ',' VAR_DECL } — statement-position variable
    /// declarations, folded into [`Declaration::Multiple`] when more than one.
    pub(crate) fn parse_var_decls(&mut self) -> Result<Declaration, Error> {
        let mut declarations = vec![self.parse_var_decl()?];
        while self.match_token(TokenKind::Comma)? {
            declarations.push(self.parse_var_decl()?);
        }

        if declarations.len() == 1 {
            Ok(Declaration::Variable(declarations.remove(0)))
        } else {
            let location = declarations[0].location.clone();
            Ok(Declaration::Multiple {
                declarations,
                location,
            })
        }
    }

    /// VAR_DECL -> TYPE identifier OPT_ARRAY_SIZE OPT_INIT
    fn parse_var_decl(&mut self) -> Result<VariableDecl, Error> {
        let ty = self.parse_type()?;
        let ident = self.expect(TokenKind::Identifier, "Expected variable name")?;
        let array_size = self.parse_opt_array_size()?;
        let initializer = self.parse_opt_init()?;

        Ok(VariableDecl {
            identifier: ident.lexeme,
            ty,
            array_size,
            initializer,
            location: ident.location,
        })
    }

    /// OPT_ARRAY_SIZE -> '[' E9 ']' | ε
    ///
    /// The size is an E9 expression rather than a full EXPR so that `=` stays
    /// unambiguous in `int a[n] = ...`.
    fn parse_opt_array_size(&mut self) -> Result<Option<Expr>, Error> {
        if self.match_token(TokenKind::LBracket)? {
            let size = self.parse_e9()?;
            self.expect(TokenKind::RBracket, "Expected ']' after array size")?;
            Ok(Some(size))
        } else {
            Ok(None)
        }
    }

    /// OPT_INIT -> '=' EXPR | ε
    fn parse_opt_init(&mut self) -> Result<Option<Expr>, Error> {
        if self.match_token(TokenKind::Eq)? {
            Ok(Some(self.parse_expr()?))
        } else {
            Ok(None)
        }
    }
}
