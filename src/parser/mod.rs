//! JavaScript subset parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`](mod@parse): Parsing (tokens → AST) and the public entry points
//! - [`ast`]: AST node definitions
//!
//! # Supported Subset
//!
//! - Items: statements, named `function` declarations, anonymous `function`s
//! - Statements: `if (..) {..} else {..}`, assignment, `return`, `var`, expression statements
//! - Expressions: numbers, strings, booleans, identifiers, calls, `!`, unary `-`,
//!   and the binary operators `|| && == != < > <= >= + - * /`
//! - Comments: `// line` and `/* block */`
//! - No automatic semicolon insertion, regular expressions, or template strings
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;

pub use lexer::{tokenize, tokenize_with_errors};
pub use parse::{parse, parse_recovering, parse_with_config};
