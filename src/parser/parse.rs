//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the public parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, token cursor, error recovery, coordination
//! - `declarations`: top-level items, function and lambda declarations, blocks
//! - `statements`: `if`, assignment, `return`, `var`, expression statements
//! - `expressions`: precedence climbing for binary operators, unary, primary
//!
//! # Token Source
//!
//! Tokens are pulled from the [`Lexer`] one at a time. The parser holds a single
//! token of lookahead; nothing is buffered beyond it.
//!
//! # Error Recovery
//!
//! A syntax error is recorded, the offending token is discarded, and parsing
//! resumes with the next item of the enclosing program or block. The result is
//! a [`ParseOutput`] holding the (possibly partial) tree and every diagnostic.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind, TokenValue};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Lexical diagnostic forwarded from the token source.
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("syntax error at line {line}: unexpected {found}, expected {expected}")]
    UnexpectedToken {
        found: Token,
        expected: String,
        line: usize,
    },

    #[error("syntax error at line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String, line: usize },

    #[error("syntax error at line {line}: nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize, line: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.line(),
            ParseError::UnexpectedToken { line, .. }
            | ParseError::UnexpectedEof { line, .. }
            | ParseError::NestingTooDeep { line, .. } => *line,
        }
    }

    /// True for grammar-level errors; lexical diagnostics are recovered locally.
    pub fn is_syntax(&self) -> bool {
        !matches!(self, ParseError::Lex(_))
    }
}

/// Parser settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum depth of nested expressions and blocks.
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: 64,
        }
    }
}

/// Result of one parse pass: a best-effort tree plus all diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    /// True if any syntax error was reported.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(ParseError::is_syntax)
    }

    pub fn into_result(self) -> Result<Program, ParseFailure> {
        if self.has_errors() {
            Err(ParseFailure {
                errors: self.errors,
                partial: self.program,
            })
        } else {
            Ok(self.program)
        }
    }
}

/// A parse that reported at least one syntax error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    pub errors: Vec<ParseError>,
    /// Whatever items survived recovery.
    pub partial: Program,
}

impl ParseFailure {
    pub fn syntax_errors(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter().filter(|e| e.is_syntax())
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut syntax = self.syntax_errors();
        match syntax.next() {
            Some(first) => {
                write!(f, "{}", first)?;
                let rest = syntax.count();
                if rest > 0 {
                    write!(f, " (and {} more)", rest)?;
                }
                Ok(())
            }
            None => write!(f, "parse failed"),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Recursive descent parser for the JavaScript subset
pub struct Parser {
    lexer: Lexer,
    lookahead: Option<Token>,
    last_line: usize,
    depth: usize,
    config: ParserConfig,
    pub(crate) errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    pub fn with_config(source: &str, config: ParserConfig) -> Self {
        let mut parser = Self {
            lexer: Lexer::new(source),
            lookahead: None,
            last_line: 1,
            depth: 0,
            config,
            errors: Vec::new(),
        };
        parser.pull();
        parser
    }

    /// Parse the whole input, returning the tree and all diagnostics
    pub fn parse(mut self) -> ParseOutput {
        let program = self.parse_program();
        ParseOutput {
            program,
            errors: self.errors,
        }
    }

    /// Parse the entire program (top-level items)
    pub fn parse_program(&mut self) -> Program {
        debug!("parsing program");
        let items = self.parse_items(false);
        debug!(
            items = items.len(),
            errors = self.errors.len(),
            "finished parsing program"
        );
        Program { items }
    }

    /// Diagnostics reported so far.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Parse items until end of input, or until `}` when inside a block.
    pub(crate) fn parse_items(&mut self, in_block: bool) -> Vec<Item> {
        let mut items = Vec::new();

        loop {
            match self.peek_kind() {
                None => break,
                Some(TokenKind::RBrace) if in_block => break,
                _ => {}
            }

            match self.parse_item() {
                Ok(item) => items.push(item),
                Err(err) => self.recover(err, in_block),
            }
        }

        items
    }

    /// Record a syntax error and discard the offending token.
    fn recover(&mut self, err: ParseError, in_block: bool) {
        warn!(line = err.line(), "{}", err);
        self.errors.push(err);

        // Leave a '}' for the enclosing block to close on
        if in_block && self.check(TokenKind::RBrace) {
            return;
        }
        self.advance();
    }

    // ===== Helper methods =====

    /// Pull the next token from the lexer into the lookahead slot.
    fn pull(&mut self) {
        self.lookahead = self.lexer.next_token();
        self.errors
            .extend(self.lexer.take_errors().into_iter().map(ParseError::Lex));
        if let Some(token) = &self.lookahead {
            self.last_line = token.line;
        } else {
            self.last_line = self.lexer.line();
        }
    }

    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.lookahead.take();
        if token.is_some() {
            self.pull();
        }
        token
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.lookahead.as_ref()
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.lookahead.as_ref().map(|t| t.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Line of the lookahead token, or the final line at end of input.
    pub(crate) fn current_line(&self) -> usize {
        self.last_line
    }

    /// Build an error for the current lookahead.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                found: token.clone(),
                expected: expected.to_string(),
                line: token.line,
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                line: self.last_line,
            },
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        expected: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.unexpected(expected))
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LParen, &format!("'(' {ctx}"))
            .map(|_| ())
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::RParen, &format!("')' {ctx}"))
            .map(|_| ())
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LBrace, &format!("'{{' {ctx}"))
            .map(|_| ())
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::RBrace, &format!("'}}' {ctx}"))
            .map(|_| ())
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Semicolon, &format!("';' {ctx}"))
            .map(|_| ())
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        let token = self.expect_token(TokenKind::Identifier, &format!("identifier {ctx}"))?;
        match token.value {
            TokenValue::Text(name) => Ok(name),
            TokenValue::Number(_) => Err(ParseError::UnexpectedToken {
                line: token.line,
                found: token,
                expected: format!("identifier {ctx}"),
            }),
        }
    }

    /// Run `f` one nesting level deeper, failing once the configured limit is passed.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.max_nesting_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_nesting_depth,
                line: self.current_line(),
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// Parse source text, failing if any syntax error was reported.
///
/// Lexical diagnostics (illegal characters and the like) are recovered by the
/// lexer and do not fail the parse on their own; use [`parse_recovering`] to
/// inspect them.
pub fn parse(source: &str) -> Result<Program, ParseFailure> {
    parse_recovering(source).into_result()
}

/// Parse source text, always returning a tree alongside every diagnostic.
pub fn parse_recovering(source: &str) -> ParseOutput {
    Parser::new(source).parse()
}

/// Like [`parse_recovering`] with explicit parser settings.
pub fn parse_with_config(source: &str, config: ParserConfig) -> ParseOutput {
    Parser::with_config(source, config).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_program() {
        let program = parse("").unwrap();
        assert!(program.is_empty());

        let program = parse("// nothing here\n/* at all */").unwrap();
        assert!(program.is_empty());
    }

    #[test]
    fn test_parse_simple_function() {
        let program = parse("function main() { return 0; }").unwrap();

        assert_eq!(program.len(), 1);
        match &program.items[0] {
            Item::Function(FunctionDecl {
                name, params, body, ..
            }) => {
                assert_eq!(name, "main");
                assert_eq!(params.len(), 0);
                assert_eq!(body.len(), 1);
            }
            _ => panic!("Expected function declaration"),
        }
    }

    #[test]
    fn test_syntax_error_reported_with_line() {
        let output = parse_recovering("x = 1;\ny = ;\nz = 3;");

        assert!(output.has_errors());
        assert_eq!(output.errors.len(), 1);
        match &output.errors[0] {
            ParseError::UnexpectedToken { found, line, .. } => {
                assert_eq!(found.kind, TokenKind::Semicolon);
                assert_eq!(*line, 2);
            }
            other => panic!("Expected unexpected-token error, got {:?}", other),
        }

        // The statements around the bad one survive
        assert_eq!(output.program.len(), 2);
    }

    #[test]
    fn test_unexpected_eof() {
        let err = parse("return 1").unwrap_err();
        assert!(matches!(err.errors[0], ParseError::UnexpectedEof { line: 1, .. }));
    }

    #[test]
    fn test_lex_errors_do_not_fail_parse() {
        let output = parse_recovering("x = 1 @;");
        assert!(!output.has_errors());
        assert_eq!(output.errors.len(), 1);
        assert!(matches!(
            output.errors[0],
            ParseError::Lex(LexError::IllegalCharacter { ch: '@', line: 1 })
        ));
        assert_eq!(output.program.len(), 1);
    }

    #[test]
    fn test_nesting_limit() {
        let config = ParserConfig {
            max_nesting_depth: 4,
        };
        let output = parse_with_config("((((((1))))));", config);
        assert!(output
            .errors
            .iter()
            .any(|e| matches!(e, ParseError::NestingTooDeep { limit: 4, .. })));

        let output = parse_with_config("((1));", config);
        assert!(output.errors.is_empty());
    }

    #[test]
    fn test_failure_display() {
        let err = parse("var = 1;").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("syntax error at line 1"), "{}", message);
    }
}
