//! Expression AST nodes
//!
//! The tree covers the IEC 61131-3 B 3.1 expression grammar. Literal leaves
//! keep their raw source text; turning that text into numeric values is the
//! constant-folding pass's job, which writes its results into the `cvalues`
//! field every node carries.

use super::{ConstValues, Span};
use serde::{Deserialize, Serialize};

/// Numeric base of an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntBase {
    Dec,
    Bin,
    Oct,
    Hex,
}

impl IntBase {
    pub fn radix(self) -> u32 {
        match self {
            IntBase::Dec => 10,
            IntBase::Bin => 2,
            IntBase::Oct => 8,
            IntBase::Hex => 16,
        }
    }

    /// Length of the `2#` / `8#` / `16#` prefix in the literal text.
    pub fn prefix_len(self) -> usize {
        match self {
            IntBase::Dec => 0,
            IntBase::Bin | IntBase::Oct => 2,
            IntBase::Hex => 3,
        }
    }
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Or,
    Xor,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Power,
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BinOp::Or => "OR",
            BinOp::Xor => "XOR",
            BinOp::And => "AND",
            BinOp::Eq => "=",
            BinOp::Ne => "<>",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "MOD",
            BinOp::Power => "**",
        };
        write!(f, "{s}")
    }
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnOp {
    Neg,
    Not,
}

impl std::fmt::Display for UnOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnOp::Neg => write!(f, "-"),
            UnOp::Not => write!(f, "NOT"),
        }
    }
}

/// Expression node kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExprKind {
    /// Integer literal, raw text with base prefix and `_` separators intact
    Int { text: String, base: IntBase },
    /// Real literal, raw text (`integer . integer [eE][+-]? integer`)
    Real { text: String },
    /// Boolean literal: TRUE or FALSE
    Bool(bool),

    /// Typed integer literal, e.g. `INT#5`, `DINT#16#FF`
    TypedInt { ty: String, value: Box<Expr> },
    /// Typed real literal, e.g. `REAL#1.5`
    TypedReal { ty: String, value: Box<Expr> },
    /// Typed boolean literal, e.g. `BOOL#TRUE`, `BOOL#1`
    TypedBool { ty: String, value: Box<Expr> },
    /// Bit-string literal, e.g. `BYTE#2#0101`
    BitString { ty: String, value: Box<Expr> },

    /// Variable reference
    Var(String),
    /// Function call
    Call { name: String, args: Vec<Expr> },
    /// Array indexing
    Index { base: Box<Expr>, index: Box<Expr> },

    /// Binary operation
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Unary operation
    Unary { op: UnOp, expr: Box<Expr> },
}

/// Expression node: kind, source span, and the constant-value annotation
/// quadruple owned by this node. Annotations start out all-undefined and are
/// written by the folding pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub cvalues: ConstValues,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            span,
            cvalues: ConstValues::default(),
        }
    }
}
