//! Lexer (tokenizer) for the JavaScript subset
//!
//! Converts raw source text into a lazy [`Token`] stream consumed by the parser.
//! The lexer never fails: illegal characters, unterminated strings and
//! unterminated block comments are recorded as [`LexError`]s and scanning
//! continues (or stops cleanly at end of input).
//!
//! All state (cursor, line counter, comment mode) lives in the [`Lexer`]
//! instance, so independent inputs can be lexed from different threads.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::warn;

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Operators
    AndAnd,     // &&
    OrOr,       // ||
    EqualEqual, // ==
    NotEqual,   // !=
    Lt,         // <
    Gt,         // >
    Le,         // <=
    Ge,         // >=
    Plus,       // +
    Minus,      // -
    Times,      // *
    Divide,     // /
    Not,        // !
    Equal,      // =

    // Punctuation
    Comma,     // ,
    Semicolon, // ;
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }

    // Literals
    Identifier,
    Number,
    String,

    // Keywords
    If,
    Else,
    True,
    False,
    Return,
    Function,
    Var,
}

impl TokenKind {
    /// Look up an identifier-shaped word in the keyword table.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
        KEYWORDS
            .get_or_init(|| {
                [
                    ("if", TokenKind::If),
                    ("else", TokenKind::Else),
                    ("false", TokenKind::False),
                    ("true", TokenKind::True),
                    ("return", TokenKind::Return),
                    ("function", TokenKind::Function),
                    ("var", TokenKind::Var),
                ]
                .into_iter()
                .collect()
            })
            .get(word)
            .copied()
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Return
                | TokenKind::Function
                | TokenKind::Var
        )
    }

    /// Upper-case kind name, e.g. `ANDAND` or `IDENTIFIER`.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::AndAnd => "ANDAND",
            TokenKind::OrOr => "OROR",
            TokenKind::EqualEqual => "EQUALEQUAL",
            TokenKind::NotEqual => "NOTEQUAL",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::Le => "LE",
            TokenKind::Ge => "GE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Not => "NOT",
            TokenKind::Equal => "EQUAL",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Return => "RETURN",
            TokenKind::Function => "FUNCTION",
            TokenKind::Var => "VAR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Numeric literal value: integer unless the literal contained a decimal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// Decoded token payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Identifier or keyword spelling, string content, or operator lexeme.
    Text(String),
    Number(Number),
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            TokenValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            TokenValue::Number(n) => Some(*n),
            TokenValue::Text(_) => None,
        }
    }
}

/// A single token with the 1-based line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, line: usize) -> Self {
        Self { kind, value, line }
    }

    fn text(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self::new(kind, TokenValue::Text(text.into()), line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::Identifier, TokenValue::Text(s)) => write!(f, "identifier '{}'", s),
            (TokenKind::String, TokenValue::Text(s)) => write!(f, "string \"{}\"", s),
            (_, TokenValue::Number(n)) => write!(f, "number {}", n),
            (_, TokenValue::Text(s)) => write!(f, "'{}'", s),
        }
    }
}

/// Lexical diagnostics. None of these abort the token stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("illegal character '{ch}' at line {line}")]
    IllegalCharacter { ch: char, line: usize },

    #[error("unterminated string literal starting at line {line}")]
    UnterminatedString { line: usize },

    #[error("unterminated block comment starting at line {line}")]
    UnterminatedComment { line: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::IllegalCharacter { line, .. }
            | LexError::UnterminatedString { line }
            | LexError::UnterminatedComment { line } => *line,
        }
    }
}

/// Scanning mode. Inside a block comment only `*/` and newlines are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexMode {
    Normal,
    BlockComment,
}

/// Lexer for the JavaScript subset
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    mode: LexMode,
    comment_start: usize,
    errors: Vec<LexError>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            mode: LexMode::Normal,
            comment_start: 1,
            errors: Vec::new(),
        }
    }

    /// Current value of the line counter.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn mode(&self) -> LexMode {
        self.mode
    }

    /// Diagnostics reported so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Drain the diagnostics reported so far.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Get next token, or `None` once the input is exhausted
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            if self.mode == LexMode::BlockComment {
                self.skip_block_comment();
                continue;
            }

            let ch = self.peek()?;
            match ch {
                ' ' | '\t' | '\x0B' | '\r' | '\n' => {
                    self.advance();
                    continue;
                }
                '/' if self.peek_ahead(1) == Some('/') => {
                    self.skip_line_comment();
                    continue;
                }
                '/' if self.peek_ahead(1) == Some('*') => {
                    self.comment_start = self.line;
                    self.advance(); // skip '/'
                    self.advance(); // skip '*'
                    self.mode = LexMode::BlockComment;
                    continue;
                }
                _ => {}
            }

            let line = self.line;
            self.advance();

            let token = match ch {
                // String literals
                '"' => self.string_literal(line)?,

                // Numeric literals
                '0'..='9' => self.number_literal(ch, line),

                // Identifiers and keywords
                'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch, line),

                // Operators and punctuation
                '&' if self.match_char('&') => Token::text(TokenKind::AndAnd, "&&", line),
                '|' if self.match_char('|') => Token::text(TokenKind::OrOr, "||", line),
                '=' if self.match_char('=') => Token::text(TokenKind::EqualEqual, "==", line),
                '=' => Token::text(TokenKind::Equal, "=", line),
                '!' if self.match_char('=') => Token::text(TokenKind::NotEqual, "!=", line),
                '!' => Token::text(TokenKind::Not, "!", line),
                '<' if self.match_char('=') => Token::text(TokenKind::Le, "<=", line),
                '<' => Token::text(TokenKind::Lt, "<", line),
                '>' if self.match_char('=') => Token::text(TokenKind::Ge, ">=", line),
                '>' => Token::text(TokenKind::Gt, ">", line),
                '+' => Token::text(TokenKind::Plus, "+", line),
                '-' => Token::text(TokenKind::Minus, "-", line),
                '*' => Token::text(TokenKind::Times, "*", line),
                '/' => Token::text(TokenKind::Divide, "/", line),
                ',' => Token::text(TokenKind::Comma, ",", line),
                ';' => Token::text(TokenKind::Semicolon, ";", line),
                '(' => Token::text(TokenKind::LParen, "(", line),
                ')' => Token::text(TokenKind::RParen, ")", line),
                '{' => Token::text(TokenKind::LBrace, "{", line),
                '}' => Token::text(TokenKind::RBrace, "}", line),

                _ => {
                    self.report(LexError::IllegalCharacter { ch, line });
                    continue;
                }
            };

            return Some(token);
        }
    }

    /// Parse string literal (opening quote already consumed)
    ///
    /// Escape pairs are kept verbatim; `\"` only prevents termination.
    fn string_literal(&mut self, line: usize) -> Option<Token> {
        let mut string = String::new();

        loop {
            match self.advance() {
                Some('"') => return Some(Token::text(TokenKind::String, string, line)),
                Some('\\') => {
                    string.push('\\');
                    match self.advance() {
                        Some(escaped) => string.push(escaped),
                        None => break,
                    }
                }
                Some(ch) => string.push(ch),
                None => break,
            }
        }

        self.report(LexError::UnterminatedString { line });
        None
    }

    /// Parse numeric literal: digits, optionally `.` and more digits
    fn number_literal(&mut self, first_digit: char, line: usize) -> Token {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        let is_float = self.match_char('.');
        if is_float {
            num_str.push('.');
            self.take_digits(&mut num_str);
        }

        let value = if is_float {
            Number::Float(num_str.parse().unwrap_or(f64::INFINITY))
        } else {
            // Too large for i64: keep the magnitude as a float
            num_str
                .parse::<i64>()
                .map(Number::Int)
                .unwrap_or_else(|_| Number::Float(num_str.parse().unwrap_or(f64::INFINITY)))
        };

        Token::new(TokenKind::Number, TokenValue::Number(value), line)
    }

    fn take_digits(&mut self, buf: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                buf.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, line: usize) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = TokenKind::keyword(&ident).unwrap_or(TokenKind::Identifier);
        Token::text(kind, ident, line)
    }

    /// Skip single-line comment (// ...), leaving the newline for the line counter
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Consume block comment content up to and including `*/`
    fn skip_block_comment(&mut self) {
        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                self.mode = LexMode::Normal;
                return;
            }
            self.advance();
        }

        self.mode = LexMode::Normal;
        self.report(LexError::UnterminatedComment {
            line: self.comment_start,
        });
    }

    fn report(&mut self, err: LexError) {
        warn!(line = err.line(), "{}", err);
        self.errors.push(err);
    }

    /// Consume the next character if it equals `expected`
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

impl std::iter::FusedIterator for Lexer {}

/// Tokenize the entire input.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Tokenize the entire input, also returning the lexical diagnostics.
pub fn tokenize_with_errors(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.by_ref().collect();
    (tokens, lexer.take_errors())
}
