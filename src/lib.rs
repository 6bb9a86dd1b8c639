//! # Introduction
//!
//! minijs is the front end for a small JavaScript-like language: a lexer that
//! turns source text into typed tokens and a recursive descent parser that
//! builds an AST of functions, statements and expressions.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST
//! ```
//!
//! 1. [`parser::lexer`] — scans text into [`parser::lexer::Token`]s, skipping
//!    whitespace and comments and reporting illegal characters without stopping.
//! 2. [`parser::parse`](mod@parser::parse) — pulls tokens one at a time and builds a
//!    [`parser::ast::Program`], collecting syntax errors as it recovers.
//!
//! ## Example
//!
//! ```
//! use minijs::parser::ast::{BinOp, Expr, Item, Stmt};
//!
//! let program = minijs::parse("x = 1 + 2 * 3;").unwrap();
//! match &program.items[0] {
//!     Item::Stmt(Stmt::Assign { name, value, .. }) => {
//!         assert_eq!(name, "x");
//!         assert!(matches!(value, Expr::BinOp { op: BinOp::Add, .. }));
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! Each call owns its own lexer and parser state, so independent inputs can be
//! parsed concurrently.

pub mod parser;

pub use parser::{parse, parse_recovering, parse_with_config, tokenize, tokenize_with_errors};
