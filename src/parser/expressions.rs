//! Expression parsing implementation
//!
//! This module handles parsing of expressions using precedence climbing
//! for binary operators and recursive descent for other expression forms.
//!
//! # Supported Expressions
//!
//! - Literals: numbers, strings, `true`, `false`
//! - Identifiers and calls: `name`, `name(args)`
//! - Binary operators: `||`, `&&`, `==`, `!=`, `<`, `>`, `<=`, `>=`, `+`, `-`, `*`, `/`
//! - Unary operators: `!`, `-`
//! - Parenthesized expressions
//!
//! # Precedence
//!
//! Lowest to highest: `||`, `&&`, equality, relational, additive,
//! multiplicative, then unary. Binary levels are left-associative
//! (`a<b<c` is `(a<b)<c`); unary operators nest to the right.
//!
//! A leading `-` always produces [`Expr::Negative`] around its operand;
//! numeric literals are never pre-negated.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind, TokenValue};
use crate::parser::parse::{ParseError, Parser};

/// Precedence of the loosest-binding binary operator.
const LOWEST_PRECEDENCE: u8 = 1;

/// Map a token kind to the binary operator it spells, if any.
fn binary_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::OrOr => Some(BinOp::Or),
        TokenKind::AndAnd => Some(BinOp::And),
        TokenKind::EqualEqual => Some(BinOp::Eq),
        TokenKind::NotEqual => Some(BinOp::Ne),
        TokenKind::Lt => Some(BinOp::Lt),
        TokenKind::Gt => Some(BinOp::Gt),
        TokenKind::Le => Some(BinOp::Le),
        TokenKind::Ge => Some(BinOp::Ge),
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Sub),
        TokenKind::Times => Some(BinOp::Mul),
        TokenKind::Divide => Some(BinOp::Div),
        _ => None,
    }
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(|p| p.parse_binary(LOWEST_PRECEDENCE))
    }

    /// Continue an expression whose leftmost operand is already parsed
    pub(crate) fn parse_expression_from(&mut self, head: Expr) -> Result<Expr, ParseError> {
        self.parse_binary_rhs(head, LOWEST_PRECEDENCE)
    }

    /// Parse a binary expression whose operators bind at least as tightly as `min_prec`
    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let left = self.parse_unary()?;
        self.parse_binary_rhs(left, min_prec)
    }

    fn parse_binary_rhs(&mut self, mut left: Expr, min_prec: u8) -> Result<Expr, ParseError> {
        while let Some(op) = self.peek_kind().and_then(binary_op) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }

            self.advance();
            let right = self.parse_binary(prec + 1)?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    /// Parse unary (! -)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_token(TokenKind::Not) {
            let operand = self.nested(|p| p.parse_unary())?;
            return Ok(Expr::Not(Box::new(operand)));
        }

        if self.match_token(TokenKind::Minus) {
            let operand = self.nested(|p| p.parse_unary())?;
            return Ok(Expr::Negative(Box::new(operand)));
        }

        self.parse_primary()
    }

    /// Parse primary (literals, identifiers, calls, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let kind = match self.peek_kind() {
            Some(kind) => kind,
            None => return Err(self.unexpected("expression")),
        };

        match kind {
            TokenKind::Identifier => {
                let name = self.expect_identifier("in expression")?;
                self.parse_identifier_tail(name)
            }
            TokenKind::Number | TokenKind::String => match self.advance() {
                Some(Token {
                    value: TokenValue::Number(n),
                    ..
                }) => Ok(Expr::Number(n)),
                Some(Token {
                    value: TokenValue::Text(s),
                    ..
                }) => Ok(Expr::String(s)),
                None => Err(self.unexpected("expression")),
            },
            TokenKind::True => {
                self.advance();
                Ok(Expr::True)
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::False)
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                Ok(expr)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// After an identifier: a call if `(` follows, otherwise a variable reference
    pub(crate) fn parse_identifier_tail(&mut self, name: String) -> Result<Expr, ParseError> {
        if !self.match_token(TokenKind::LParen) {
            return Ok(Expr::Identifier(name));
        }

        let args = self.parse_argument_list()?;
        self.expect_rparen("after call arguments")?;

        Ok(Expr::Call { callee: name, args })
    }

    /// Parse argument list: expr, expr, ...
    fn parse_argument_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }
}
