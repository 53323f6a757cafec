use crate::Span;

use super::{
    ast::{Block, Expr},
    expressions::{FunctionExpr, IndexExpr, Name},
};

/// Left-hand side of an assignment. Only names and indexed values are
/// assignable.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Name(Name),
    Index(IndexExpr),
}

/// `local a, b = x, y`. Either side may be longer than the other.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalAssignStmt {
    pub targets: Vec<Name>,
    pub values: Vec<Expr>,
    pub span: Span,
}

/// `a, t.b = x, y`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub targets: Vec<Target>,
    pub values: Vec<Expr>,
    pub span: Span,
}

/// `for k, v in explist do body end`
#[derive(Debug, Clone, PartialEq)]
pub struct ForinStmt {
    pub targets: Vec<Name>,
    pub iter: Vec<Expr>,
    pub body: Block,
    pub span: Span,
}

/// `for i = start, stop [, step] do body end`
#[derive(Debug, Clone, PartialEq)]
pub struct FornumStmt {
    pub target: Name,
    pub start: Expr,
    pub stop: Expr,
    pub step: Option<Expr>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoStmt {
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStmt {
    pub body: Block,
    pub test: Expr,
    pub span: Span,
}

/// What follows the body of an `if`.
#[derive(Debug, Clone, PartialEq)]
pub enum OrElse {
    /// No `elseif` or `else`.
    Absent,
    /// An `elseif` clause, with the rest of the chain in its own `orelse`.
    ElseIf(Box<IfStmt>),
    /// A final `else` body.
    Else(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Expr,
    pub body: Block,
    pub orelse: OrElse,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GotoStmt {
    pub label: String,
    pub span: Span,
}

/// `::id::`
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStmt {
    pub id: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub values: Vec<Expr>,
    pub span: Span,
}

/// `a.b.c:m` in `function a.b.c:m() end`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionName {
    pub path: Vec<Name>,
    pub method: Option<Name>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStmt {
    pub name: FunctionName,
    pub func: FunctionExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalFunctionStmt {
    pub name: Name,
    pub func: FunctionExpr,
    pub span: Span,
}

/// A comment at statement position. Line comments have their `--` and
/// surrounding whitespace removed; long comments keep their content verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentStmt {
    pub text: String,
    pub is_multi_line: bool,
    pub span: Span,
}

/// A function or method call used as a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}
