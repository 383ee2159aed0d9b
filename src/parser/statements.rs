//! Statement parsing
//!
//! One function per statement form, dispatched on the current token. A
//! statement list (`STATEMENT_STAR`) stops at `}`, `case`, or `default`, so
//! the same helper serves blocks and switch-case bodies. The `for`
//! initialization slot and expression statements share `EXPR_OR_VAR_DECL`,
//! which routes primitive type keywords to the declaration grammar and
//! everything else to the expression grammar.

use crate::parser::ast::{Expr, ForInit, Stmt, SwitchCase};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Error, Parser};

impl Parser {
    /// STATEMENT — dispatch on the current token kind.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, Error> {
        match self.peek().kind {
            TokenKind::LBrace => self.parse_block_stmt(),
            TokenKind::KwIf => self.parse_if_stmt(),
            TokenKind::KwSwitch => self.parse_switch_stmt(),
            TokenKind::KwWhile => self.parse_while_stmt(),
            TokenKind::KwDo => self.parse_do_while_stmt(),
            TokenKind::KwFor => self.parse_for_stmt(),
            TokenKind::KwBreak => self.parse_break_stmt(),
            TokenKind::KwContinue => self.parse_continue_stmt(),
            TokenKind::KwReturn => self.parse_return_stmt(),
            kind if Self::starts_expr_or_var_decl(kind) => self.parse_expr_stmt(),
            _ => self.error("Expected statement"),
        }
    }

    /// BLOCK_STMT -> '{' STATEMENT_STAR '}'
    pub(crate) fn parse_block_stmt(&mut self) -> Result<Stmt, Error> {
        let lbrace = self.expect(TokenKind::LBrace, "Expected '{'")?;
        let statements = self.parse_statement_star()?;
        self.expect(TokenKind::RBrace, "Expected '}'")?;

        Ok(Stmt::Block {
            statements,
            location: lbrace.location,
        })
    }

    /// STATEMENT_STAR -> STATEMENT STATEMENT_STAR | ε
    fn parse_statement_star(&mut self) -> Result<Vec<Stmt>, Error> {
        let mut statements = Vec::new();
        while !matches!(
            self.peek().kind,
            TokenKind::RBrace | TokenKind::KwCase | TokenKind::KwDefault
        ) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    /// IF_STMT -> if '(' EXPR ')' STATEMENT ELSE_PART
    fn parse_if_stmt(&mut self) -> Result<Stmt, Error> {
        let if_token = self.expect(TokenKind::KwIf, "Expected 'if'")?;

        self.expect(TokenKind::LParen, "Expected '(' after 'if'")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expected ')' after condition")?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.match_token(TokenKind::KwElse)? {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location: if_token.location,
        })
    }

    /// SWITCH_STMT -> switch '(' EXPR ')' '{' CASE_WITH_DEFAULT_STMT_STAR '}'
    fn parse_switch_stmt(&mut self) -> Result<Stmt, Error> {
        let switch_token = self.expect(TokenKind::KwSwitch, "Expected 'switch'")?;

        self.expect(TokenKind::LParen, "Expected '(' after 'switch'")?;
        let expression = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expected ')' after switch expression")?;
        self.expect(TokenKind::LBrace, "Expected '{' after switch declaration")?;

        let cases = self.parse_case_with_default_stmt_star()?;

        self.expect(TokenKind::RBrace, "Expected '}' after switch body")?;

        Ok(Stmt::Switch {
            expression,
            cases,
            location: switch_token.location,
        })
    }

    /// Case arms: any number of `case` arms, at most one trailing `default`
    /// arm which may itself be followed by further `case` arms.
    fn parse_case_with_default_stmt_star(&mut self) -> Result<Vec<SwitchCase>, Error> {
        let mut cases = Vec::new();

        loop {
            if self.check(TokenKind::KwCase) {
                cases.push(self.parse_case_stmt()?);
            } else if self.check(TokenKind::KwDefault) {
                cases.push(self.parse_default_case()?);
                while self.check(TokenKind::KwCase) {
                    cases.push(self.parse_case_stmt()?);
                }
                return Ok(cases);
            } else {
                return Ok(cases);
            }
        }
    }

    /// CASE_STMT -> case integer_literal ':' CASE_BODY
    ///
    /// Case labels are bare integer literals; expressions (including a
    /// leading minus) are rejected.
    fn parse_case_stmt(&mut self) -> Result<SwitchCase, Error> {
        self.expect(TokenKind::KwCase, "Expected 'case'")?;
        let value_token = self.expect(
            TokenKind::IntegerLiteral,
            "Expected integer literal after 'case'",
        )?;
        let value = value_token.int_value().unwrap_or(0);
        self.expect(TokenKind::Colon, "Expected ':' after case value")?;

        let body = self.parse_statement_star()?;

        Ok(SwitchCase {
            is_default: false,
            value: Some(value),
            body,
        })
    }

    /// DEFAULT_CASE -> default ':' CASE_BODY
    fn parse_default_case(&mut self) -> Result<SwitchCase, Error> {
        self.expect(TokenKind::KwDefault, "Expected 'default'")?;
        self.expect(TokenKind::Colon, "Expected ':' after 'default'")?;

        let body = self.parse_statement_star()?;

        Ok(SwitchCase {
            is_default: true,
            value: None,
            body,
        })
    }

    /// WHILE_STMT -> while '(' EXPR ')' STATEMENT
    fn parse_while_stmt(&mut self) -> Result<Stmt, Error> {
        let while_token = self.expect(TokenKind::KwWhile, "Expected 'while'")?;

        self.expect(TokenKind::LParen, "Expected '(' after 'while'")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expected ')' after condition")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While {
            condition,
            body,
            location: while_token.location,
        })
    }

    /// DO_WHILE_STMT -> do STATEMENT while '(' EXPR ')' ';'
    fn parse_do_while_stmt(&mut self) -> Result<Stmt, Error> {
        let do_token = self.expect(TokenKind::KwDo, "Expected 'do'")?;

        let body = Box::new(self.parse_statement()?);

        self.expect(TokenKind::KwWhile, "Expected 'while' after do-statement")?;
        self.expect(TokenKind::LParen, "Expected '(' after 'while'")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "Expected ')' after condition")?;
        self.expect(TokenKind::Semicolon, "Expected ';' after do-while statement")?;

        Ok(Stmt::DoWhile {
            body,
            condition,
            location: do_token.location,
        })
    }

    /// FOR_STMT -> for '(' OPT_EXPR_OR_VAR_DECL ';' OPT_EXPR ';' OPT_EXPR ')' STATEMENT
    fn parse_for_stmt(&mut self) -> Result<Stmt, Error> {
        let for_token = self.expect(TokenKind::KwFor, "Expected 'for'")?;

        self.expect(TokenKind::LParen, "Expected '(' after 'for'")?;

        let init = self.parse_opt_expr_or_var_decl()?;
        self.expect(
            TokenKind::Semicolon,
            "Expected ';' after for-loop initialization",
        )?;

        let condition = self.parse_opt_expr()?;
        self.expect(TokenKind::Semicolon, "Expected ';' after for-loop condition")?;

        let update = self.parse_opt_expr()?;
        self.expect(TokenKind::RParen, "Expected ')' after for-loop update")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::For {
            init,
            condition,
            update,
            body,
            location: for_token.location,
        })
    }

    /// OPT_EXPR_OR_VAR_DECL -> EXPR_OR_VAR_DECL | ε
    fn parse_opt_expr_or_var_decl(&mut self) -> Result<Option<ForInit>, Error> {
        if Self::starts_expr_or_var_decl(self.peek().kind) {
            Ok(Some(self.parse_expr_or_var_decl()?))
        } else {
            Ok(None)
        }
    }

    /// OPT_EXPR -> EXPR | ε
    fn parse_opt_expr(&mut self) -> Result<Option<Expr>, Error> {
        if Self::starts_expression(self.peek().kind) {
            Ok(Some(self.parse_expr()?))
        } else {
            Ok(None)
        }
    }

    /// BREAK_STMT -> break ';'
    fn parse_break_stmt(&mut self) -> Result<Stmt, Error> {
        let break_token = self.expect(TokenKind::KwBreak, "Expected 'break'")?;
        self.expect(TokenKind::Semicolon, "Expected ';' after 'break'")?;
        Ok(Stmt::Break {
            location: break_token.location,
        })
    }

    /// CONTINUE_STMT -> continue ';'
    fn parse_continue_stmt(&mut self) -> Result<Stmt, Error> {
        let continue_token = self.expect(TokenKind::KwContinue, "Expected 'continue'")?;
        self.expect(TokenKind::Semicolon, "Expected ';' after 'continue'")?;
        Ok(Stmt::Continue {
            location: continue_token.location,
        })
    }

    /// RETURN_STMT -> return OPT_EXPR ';'
    fn parse_return_stmt(&mut self) -> Result<Stmt, Error> {
        let return_token = self.expect(TokenKind::KwReturn, "Expected 'return'")?;

        let expression = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };

        self.expect(TokenKind::Semicolon, "Expected ';' after return statement")?;

        Ok(Stmt::Return {
            expression,
            location: return_token.location,
        })
    }

    /// EXPR_STMT -> EXPR_OR_VAR_DECL ';'
    fn parse_expr_stmt(&mut self) -> Result<Stmt, Error> {
        let item = self.parse_expr_or_var_decl()?;
        self.expect(TokenKind::Semicolon, "Expected ';' after expression")?;

        Ok(match item {
            ForInit::Declaration(declaration) => Stmt::Declaration(declaration),
            ForInit::Expression(expression) => {
                let location = expression.location().clone();
                Stmt::Expression {
                    expression,
                    location,
                }
            }
        })
    }

    /// EXPR_OR_VAR_DECL -> VAR_DECLS | EXPRS
    fn parse_expr_or_var_decl(&mut self) -> Result<ForInit, Error> {
        match self.peek().kind {
            TokenKind::KwInt | TokenKind::KwDouble | TokenKind::KwChar | TokenKind::KwVoid => {
                Ok(ForInit::Declaration(self.parse_var_decls()?))
            }
            kind if Self::starts_expression(kind) => {
                Ok(ForInit::Expression(self.parse_exprs()?))
            }
            _ => self.error("Expected expression or variable declaration"),
        }
    }
}
