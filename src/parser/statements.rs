//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Conditionals: `if (cond) { ... }` with an optional `else { ... }`
//! - Assignment: `name = expr;`
//! - Return: `return expr;`
//! - Variable declarations: `var name = expr;`
//! - Expression statements: `expr;`
//!
//! # Grammar
//!
//! ```text
//! stmt ::= "if" "(" expr ")" block ("else" block)?
//!        | identifier "=" expr ";"
//!        | "return" expr ";"
//!        | "var" identifier "=" expr ";"
//!        | expr ";"
//! ```
//!
//! Both branches of an `if` are braced blocks, so an `else` always belongs to
//! the nearest unmatched `if`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let line = self.current_line();

        if self.match_token(TokenKind::If) {
            return self.parse_if_statement(line);
        }

        if self.match_token(TokenKind::Return) {
            let value = self.parse_expression()?;
            self.expect_semicolon("after return value")?;
            return Ok(Stmt::Return { value, line });
        }

        if self.match_token(TokenKind::Var) {
            let name = self.expect_identifier("after 'var'")?;
            self.expect_token(TokenKind::Equal, "'=' in variable declaration")?;
            let value = self.parse_expression()?;
            self.expect_semicolon("after variable declaration")?;
            return Ok(Stmt::VarDecl { name, value, line });
        }

        if self.check(TokenKind::Identifier) {
            return self.parse_identifier_statement(line);
        }

        // Otherwise, it's an expression statement
        let value = self.parse_expression()?;
        self.expect_semicolon("after expression")?;
        Ok(Stmt::Expr { value, line })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self, line: usize) -> Result<Stmt, ParseError> {
        self.expect_lparen("after 'if'")?;
        let cond = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let then_branch = self.parse_block("after if condition")?;

        if self.match_token(TokenKind::Else) {
            let else_branch = self.parse_block("after 'else'")?;
            return Ok(Stmt::IfThenElse {
                cond,
                then_branch,
                else_branch,
                line,
            });
        }

        Ok(Stmt::IfThen {
            cond,
            then_branch,
            line,
        })
    }

    /// Parse a statement that starts with an identifier
    ///
    /// The identifier is consumed first; the next token then decides between
    /// an assignment and an expression that the identifier begins.
    fn parse_identifier_statement(&mut self, line: usize) -> Result<Stmt, ParseError> {
        let name = self.expect_identifier("at start of statement")?;

        if self.match_token(TokenKind::Equal) {
            let value = self.parse_expression()?;
            self.expect_semicolon("after assignment")?;
            return Ok(Stmt::Assign { name, value, line });
        }

        let head = self.parse_identifier_tail(name)?;
        let value = self.parse_expression_from(head)?;
        self.expect_semicolon("after expression")?;
        Ok(Stmt::Expr { value, line })
    }
}
