//! Declaration parsing implementation
//!
//! This module handles the items that make up a program or block body:
//!
//! - Named functions: `function name(params) { ... }`
//! - Anonymous functions: `function(params) { ... }`
//! - Statements (delegated to `statements`)
//! - Parameter lists and braced blocks
//!
//! # Grammar
//!
//! ```text
//! topStmt      ::= stmt | functionDecl | lambdaDecl
//! functionDecl ::= "function" identifier "(" optParams ")" block
//! lambdaDecl   ::= "function" "(" optParams ")" block
//! optParams    ::= ε | identifier ("," identifier)*
//! block        ::= "{" topStmt* "}"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse one item; the leading `function` keyword alone decides the form
    pub(crate) fn parse_item(&mut self) -> Result<Item, ParseError> {
        if self.check(TokenKind::Function) {
            return self.parse_function();
        }

        Ok(Item::Stmt(self.parse_statement()?))
    }

    /// Parse a named function or, without a name, a lambda
    fn parse_function(&mut self) -> Result<Item, ParseError> {
        let line = self.current_line();
        self.advance(); // consume 'function'

        if self.check(TokenKind::Identifier) {
            let name = self.expect_identifier("after 'function'")?;
            let params = self.parse_parameter_list()?;
            let body = self.parse_block("before function body")?;

            return Ok(Item::Function(FunctionDecl {
                name,
                params,
                body,
                line,
            }));
        }

        let params = self.parse_parameter_list()?;
        let body = self.parse_block("before function body")?;

        Ok(Item::Lambda(Lambda { params, body, line }))
    }

    /// Parse parameter list: (name, name, ...)
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect_lparen("before parameters")?;

        let mut params = Vec::new();

        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.expect_identifier("in parameter list")?);

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_rparen("after parameters")?;

        Ok(params)
    }

    /// Parse a braced block of items
    pub(crate) fn parse_block(&mut self, ctx: &str) -> Result<Vec<Item>, ParseError> {
        self.expect_lbrace(ctx)?;
        let items = self.nested(|p| Ok(p.parse_items(true)))?;
        self.expect_rbrace("after block")?;

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::parse;

    #[test]
    fn test_named_function_params() {
        let program = parse("function fun(x, y) { return x; }").unwrap();

        match &program.items[0] {
            Item::Function(func) => {
                assert_eq!(func.name, "fun");
                assert_eq!(func.params, vec!["x".to_string(), "y".to_string()]);
                assert_eq!(func.body.len(), 1);
            }
            _ => panic!("Expected function declaration"),
        }
    }

    #[test]
    fn test_lambda() {
        let program = parse("function() { return 1; }").unwrap();

        match &program.items[0] {
            Item::Lambda(lambda) => {
                assert!(lambda.params.is_empty());
                assert_eq!(lambda.body.len(), 1);
            }
            _ => panic!("Expected lambda"),
        }
    }

    #[test]
    fn test_duplicate_params_allowed() {
        let program = parse("function f(a, a) {}").unwrap();
        assert!(matches!(&program.items[0], Item::Function(f) if f.params == ["a", "a"]));
    }

    #[test]
    fn test_nested_declarations_in_block() {
        let program = parse("function outer() { function inner() {} function(z) {} }").unwrap();

        match &program.items[0] {
            Item::Function(outer) => {
                assert!(matches!(&outer.body[0], Item::Function(f) if f.name == "inner"));
                assert!(matches!(&outer.body[1], Item::Lambda(l) if l.params == ["z"]));
            }
            _ => panic!("Expected function declaration"),
        }
    }

    #[test]
    fn test_trailing_comma_rejected() {
        assert!(parse("function f(a,) {}").is_err());
    }

    #[test]
    fn test_unclosed_block_is_error() {
        let err = parse("function f() { return 1;").unwrap_err();
        assert!(err.partial.is_empty());
    }
}
