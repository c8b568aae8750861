//! The statement forest executed by the interpreter.
//!
//! Nodes carry interned names (`StrId`) and line numbers instead of source
//! slices, so the tree has no lifetime tie to the source text and can be
//! snapshotted with the rest of the parsed program.

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{heap::FnId, intern::StrId};

/// An identifier occurrence: the interned name plus the line it appeared on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct Ident {
    pub name: StrId,
    pub line: u32,
}

/// A literal value as it appears in source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum Literal {
    Nil,
    Bool(bool),
    Number(f64),
    Str(StrId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
pub(crate) enum UnaryOp {
    #[strum(serialize = "!")]
    Not,
    #[strum(serialize = "-")]
    Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
pub(crate) enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "==")]
    Equal,
    #[strum(serialize = "!=")]
    NotEqual,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = "<=")]
    LessEqual,
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = ">=")]
    GreaterEqual,
}

impl BinaryOp {
    /// Source spelling, used when anchoring runtime errors at the operator.
    pub fn symbol(self) -> &'static str {
        self.into()
    }
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum LogicalOp {
    And,
    Or,
}

/// An expression node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) enum Expr {
    Literal(Literal),
    Grouping(Box<Expr>),
    Variable(Ident),
    Assign {
        name: Ident,
        value: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        line: u32,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        line: u32,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A call expression. `line` is the closing parenthesis, which anchors
    /// arity and not-callable errors.
    Call {
        callee: Box<Expr>,
        line: u32,
        args: Vec<Expr>,
    },
}

/// A statement node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) enum Stmt {
    Block(Vec<Stmt>),
    Expression(Expr),
    /// A function declaration. The definition itself lives in the heap's
    /// function arena; executing the statement binds the name.
    Function(FnId),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    Print(Expr),
    Return {
        line: u32,
        value: Option<Expr>,
    },
    Var {
        name: Ident,
        initializer: Option<Expr>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
}
