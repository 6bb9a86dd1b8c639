// AST (Abstract Syntax Tree) definitions for the JavaScript subset

use std::fmt;

pub use super::lexer::Number;

/// Binary operators
///
/// Precedence is fixed when the node is built; the tree never re-associates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Logical
    Or,
    And,
    // Equality
    Eq,
    Ne,
    // Relational
    Lt,
    Gt,
    Le,
    Ge,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Source spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }

    /// Binding strength, lowest first. All levels are left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::Eq | BinOp::Ne => 3,
            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => 4,
            BinOp::Add | BinOp::Sub => 5,
            BinOp::Mul | BinOp::Div => 6,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(String),
    Number(Number),
    String(String),
    True,
    False,
    Not(Box<Expr>),
    Negative(Box<Expr>),
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    Call {
        callee: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn binary(left: Expr, op: BinOp, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Statements
///
/// `line` is the line of the statement's first token.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    IfThen {
        cond: Expr,
        then_branch: Vec<Item>,
        line: usize,
    },
    IfThenElse {
        cond: Expr,
        then_branch: Vec<Item>,
        else_branch: Vec<Item>,
        line: usize,
    },
    Assign {
        name: String,
        value: Expr,
        line: usize,
    },
    Return {
        value: Expr,
        line: usize,
    },
    VarDecl {
        name: String,
        value: Expr,
        line: usize,
    },
    Expr {
        value: Expr,
        line: usize,
    },
}

impl Stmt {
    /// Get the source line of this statement
    pub fn line(&self) -> usize {
        match self {
            Stmt::IfThen { line, .. }
            | Stmt::IfThenElse { line, .. }
            | Stmt::Assign { line, .. }
            | Stmt::Return { line, .. }
            | Stmt::VarDecl { line, .. }
            | Stmt::Expr { line, .. } => *line,
        }
    }
}

/// Named function declaration: `function name(params) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>, // duplicates are not rejected here
    pub body: Vec<Item>,
    pub line: usize,
}

/// Anonymous function declaration: `function(params) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Vec<Item>,
    pub line: usize,
}

/// An element of a program or block body
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Stmt(Stmt),
    Function(FunctionDecl),
    Lambda(Lambda),
}

impl Item {
    pub fn line(&self) -> usize {
        match self {
            Item::Stmt(stmt) => stmt.line(),
            Item::Function(func) => func.line,
            Item::Lambda(lambda) => lambda.line,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
