//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure: the error types, single-token-lookahead helpers, and the
//! program-level entry point. The grammar itself is implemented across
//! sibling modules as `impl Parser` blocks:
//!
//! - `types`: the type grammar (pointers, struct references, typedefs)
//! - `declarations`: top-level and statement-level declarations
//! - `statements`: statements and control flow
//! - `expressions`: the operator-precedence cascade
//!
//! The parser is predictive recursive descent over an LL(1) grammar: it holds
//! exactly one token of lookahead (`current`), pulled on demand from the
//! [`Lexer`], and never backtracks. The first violation of the grammar raises
//! a [`ParserError`]; there is no recovery and no partial AST. Recursion
//! depth follows the nesting depth of the source, so pathologically deep
//! input can exhaust the call stack.

use crate::parser::ast::{Declaration, Program, SourceLocation};
use crate::parser::lexer::{Lexer, LexerError, Token, TokenKind};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Syntax error: message plus the location of the offending token.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{location}: {message}")]
pub struct ParserError {
    pub message: String,
    pub location: SourceLocation,
}

/// Any frontend failure. Lexical errors detected while the parser pulls
/// tokens surface unmodified, alongside syntax errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("lexer error: {0}")]
    Lexer(#[from] LexerError),
    #[error("parser error: {0}")]
    Parser(#[from] ParserError),
}

/// Recursive descent parser for TinyC.
pub struct Parser {
    lexer: Lexer,
    current: Token,
}

impl Parser {
    /// Create a parser over the given lexer. Reads the first token, so
    /// construction fails on an immediate lexical error.
    pub fn new(mut lexer: Lexer) -> Result<Self, Error> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse a whole program: top-level declarations until end of file.
    ///
    /// When a struct definition follows a forward declaration of the same
    /// name, the forward declaration's field list is completed in place (see
    /// [`Declaration::complete_struct`]); both nodes stay in the declaration
    /// list in source order.
    pub fn parse_program(&mut self) -> Result<Program, Error> {
        let location = SourceLocation::whole_file(self.lexer.filename());
        let mut declarations: Vec<Declaration> = Vec::new();
        // Index of the first struct declaration per name.
        let mut structs: FxHashMap<String, usize> = FxHashMap::default();

        while !self.check(TokenKind::Eof) {
            let decl = self.parse_program_item()?;
            if let Declaration::Struct {
                identifier, fields, ..
            } = &decl
            {
                match structs.get(identifier) {
                    Some(&index) => {
                        if !fields.is_empty() && !declarations[index].is_definition() {
                            declarations[index].complete_struct(fields.clone());
                        }
                    }
                    None => {
                        structs.insert(identifier.clone(), declarations.len());
                    }
                }
            }
            declarations.push(decl);
        }

        Ok(Program {
            declarations,
            location,
        })
    }

    /// PROGRAM_ITEM -> NON_VOID_TYPE identifier NOT_VOID_FUNCTION_OR_VARIABLE
    ///              |  void VOID_DECL_TAIL
    ///              |  STRUCT_DECL
    ///              |  FUNPTR_DECL
    fn parse_program_item(&mut self) -> Result<Declaration, Error> {
        match self.current.kind {
            TokenKind::KwInt | TokenKind::KwDouble | TokenKind::KwChar => {
                let ty = self.parse_non_void_type()?;
                let ident = self.expect(TokenKind::Identifier, "Expected identifier after type")?;
                self.parse_not_void_function_or_variable(ty, ident.lexeme, ident.location)
            }
            TokenKind::KwVoid => {
                let void_token = self.consume()?;
                self.parse_void_decl_tail(void_token.location)
            }
            TokenKind::KwStruct => self.parse_struct_decl(),
            TokenKind::KwTypedef => self.parse_fun_ptr_decl(),
            _ => self.error("Expected type, struct, or typedef"),
        }
    }

    // ===== Lookahead helpers =====

    /// Returns the current token and advances to the next one.
    pub(crate) fn consume(&mut self) -> Result<Token, Error> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// The single token of lookahead.
    pub(crate) fn peek(&self) -> &Token {
        &self.current
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token if it matches.
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.check(kind) {
            self.consume()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the current token if it matches, otherwise raises a
    /// [`ParserError`] at the current token's location.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.check(kind) {
            self.consume()
        } else {
            self.error(message)
        }
    }

    pub(crate) fn error<T>(&self, message: &str) -> Result<T, Error> {
        Err(ParserError {
            message: message.to_string(),
            location: self.current.location.clone(),
        }
        .into())
    }

    /// FIRST set of expressions: prefix operators, literals, identifiers,
    /// parentheses, and `cast`.
    pub(crate) fn starts_expression(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::Tilde
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::Star
                | TokenKind::Amp
                | TokenKind::IntegerLiteral
                | TokenKind::DoubleLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::Identifier
                | TokenKind::LParen
                | TokenKind::KwCast
        )
    }

    /// FIRST set of EXPR_OR_VAR_DECL: a primitive type keyword starts a
    /// declaration, everything else must start an expression.
    pub(crate) fn starts_expr_or_var_decl(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::KwInt | TokenKind::KwDouble | TokenKind::KwChar | TokenKind::KwVoid
        ) || Self::starts_expression(kind)
    }
}
