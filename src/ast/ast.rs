use std::fmt::Display;

use crate::Span;

use super::{
    expressions::{
        BinaryExpr, BinaryOp, CallExpr, FunctionExpr, IndexExpr, IndexNotation, InvokeExpr, Name,
        NumberExpr, Numeral, StringExpr, TableExpr, TableField, UnaryExpr, UnaryOp,
    },
    statements::{
        AssignStmt, BreakStmt, CommentStmt, DoStmt, ExpressionStmt, ForinStmt, FornumStmt,
        FunctionName, FunctionStmt, GotoStmt, IfStmt, LabelStmt, LocalAssignStmt,
        LocalFunctionStmt, OrElse, RepeatStmt, ReturnStmt, Target, WhileStmt,
    },
};

/// Root of a parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub body: Block,
}

impl Chunk {
    pub fn new(body: Block) -> Self {
        Chunk { body }
    }
}

/// Statements of one block, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(body: Vec<Stmt>) -> Self {
        Block {
            body,
            span: Span::default(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Statement Types
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    LocalAssign,
    Assign,
    Forin,
    Fornum,
    Do,
    While,
    Repeat,
    If,
    Goto,
    Label,
    Break,
    Return,
    Function,
    LocalFunction,
    Comment,
    Expression,
}

impl Display for StmtType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    LocalAssign(LocalAssignStmt),
    Assign(AssignStmt),
    Forin(ForinStmt),
    Fornum(FornumStmt),
    Do(DoStmt),
    While(WhileStmt),
    Repeat(RepeatStmt),
    If(IfStmt),
    Goto(GotoStmt),
    Label(LabelStmt),
    Break(BreakStmt),
    Return(ReturnStmt),
    Function(FunctionStmt),
    LocalFunction(LocalFunctionStmt),
    Comment(CommentStmt),
    Expression(ExpressionStmt),
}

/// Expression Types
///
/// Operators are part of the kind: every operator is its own node kind.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Name,
    Number,
    String,
    True,
    False,
    Nil,
    Varargs,
    Table,
    Index,
    Call,
    Invoke,
    Function,
    Binary(BinaryOp),
    Unary(UnaryOp),
}

impl Display for ExprType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprType::True => write!(f, "TrueExpr"),
            ExprType::False => write!(f, "FalseExpr"),
            ExprType::Nil => write!(f, "NilExpr"),
            ExprType::Binary(op) => write!(f, "{}", op.node_name()),
            ExprType::Unary(op) => write!(f, "{}", op.node_name()),
            other => write!(f, "{:?}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Name(Name),
    Number(NumberExpr),
    String(StringExpr),
    True(Span),
    False(Span),
    Nil(Span),
    Varargs(Span),
    Table(TableExpr),
    Index(IndexExpr),
    Call(CallExpr),
    Invoke(InvokeExpr),
    Function(FunctionExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
}

/// A field value handed out by [`Stmt::fields`] and [`Expr::fields`].
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    Expr(&'a Expr),
    OptionalExpr(Option<&'a Expr>),
    Exprs(&'a [Expr]),
    Name(&'a Name),
    Names(&'a [Name]),
    Targets(&'a [Target]),
    Block(&'a Block),
    OrElse(&'a OrElse),
    TableFields(&'a [TableField]),
    FunctionName(&'a FunctionName),
    Function(&'a FunctionExpr),
    Text(&'a str),
    Number(Numeral),
    Flag(bool),
    Notation(IndexNotation),
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::LocalAssign(_) => StmtType::LocalAssign,
            Stmt::Assign(_) => StmtType::Assign,
            Stmt::Forin(_) => StmtType::Forin,
            Stmt::Fornum(_) => StmtType::Fornum,
            Stmt::Do(_) => StmtType::Do,
            Stmt::While(_) => StmtType::While,
            Stmt::Repeat(_) => StmtType::Repeat,
            Stmt::If(_) => StmtType::If,
            Stmt::Goto(_) => StmtType::Goto,
            Stmt::Label(_) => StmtType::Label,
            Stmt::Break(_) => StmtType::Break,
            Stmt::Return(_) => StmtType::Return,
            Stmt::Function(_) => StmtType::Function,
            Stmt::LocalFunction(_) => StmtType::LocalFunction,
            Stmt::Comment(_) => StmtType::Comment,
            Stmt::Expression(_) => StmtType::Expression,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::LocalAssign(stmt) => &stmt.span,
            Stmt::Assign(stmt) => &stmt.span,
            Stmt::Forin(stmt) => &stmt.span,
            Stmt::Fornum(stmt) => &stmt.span,
            Stmt::Do(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Repeat(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::Goto(stmt) => &stmt.span,
            Stmt::Label(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Function(stmt) => &stmt.span,
            Stmt::LocalFunction(stmt) => &stmt.span,
            Stmt::Comment(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
        }
    }

    /// The semantic fields of the statement, in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        match self {
            Stmt::LocalAssign(stmt) => vec![
                ("targets", Field::Names(&stmt.targets)),
                ("values", Field::Exprs(&stmt.values)),
            ],
            Stmt::Assign(stmt) => vec![
                ("targets", Field::Targets(&stmt.targets)),
                ("values", Field::Exprs(&stmt.values)),
            ],
            Stmt::Forin(stmt) => vec![
                ("targets", Field::Names(&stmt.targets)),
                ("iter", Field::Exprs(&stmt.iter)),
                ("body", Field::Block(&stmt.body)),
            ],
            Stmt::Fornum(stmt) => vec![
                ("target", Field::Name(&stmt.target)),
                ("start", Field::Expr(&stmt.start)),
                ("stop", Field::Expr(&stmt.stop)),
                ("step", Field::OptionalExpr(stmt.step.as_ref())),
                ("body", Field::Block(&stmt.body)),
            ],
            Stmt::Do(stmt) => vec![("body", Field::Block(&stmt.body))],
            Stmt::While(stmt) => vec![
                ("test", Field::Expr(&stmt.test)),
                ("body", Field::Block(&stmt.body)),
            ],
            Stmt::Repeat(stmt) => vec![
                ("body", Field::Block(&stmt.body)),
                ("test", Field::Expr(&stmt.test)),
            ],
            Stmt::If(stmt) => vec![
                ("test", Field::Expr(&stmt.test)),
                ("body", Field::Block(&stmt.body)),
                ("orelse", Field::OrElse(&stmt.orelse)),
            ],
            Stmt::Goto(stmt) => vec![("label", Field::Text(&stmt.label))],
            Stmt::Label(stmt) => vec![("id", Field::Text(&stmt.id))],
            Stmt::Break(_) => vec![],
            Stmt::Return(stmt) => vec![("values", Field::Exprs(&stmt.values))],
            Stmt::Function(stmt) => vec![
                ("name", Field::FunctionName(&stmt.name)),
                ("func", Field::Function(&stmt.func)),
            ],
            Stmt::LocalFunction(stmt) => vec![
                ("name", Field::Name(&stmt.name)),
                ("func", Field::Function(&stmt.func)),
            ],
            Stmt::Comment(stmt) => vec![
                ("text", Field::Text(&stmt.text)),
                ("is_multi_line", Field::Flag(stmt.is_multi_line)),
            ],
            Stmt::Expression(stmt) => vec![("expression", Field::Expr(&stmt.expression))],
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Stmt::Comment(CommentStmt {
            text: text.into(),
            is_multi_line: false,
            span: Span::default(),
        })
    }

    pub fn goto(label: impl Into<String>) -> Self {
        Stmt::Goto(GotoStmt {
            label: label.into(),
            span: Span::default(),
        })
    }

    pub fn label(id: impl Into<String>) -> Self {
        Stmt::Label(LabelStmt {
            id: id.into(),
            span: Span::default(),
        })
    }

    pub fn local_assign(targets: Vec<Name>, values: Vec<Expr>) -> Self {
        Stmt::LocalAssign(LocalAssignStmt {
            targets,
            values,
            span: Span::default(),
        })
    }

    pub fn assign(targets: Vec<Target>, values: Vec<Expr>) -> Self {
        Stmt::Assign(AssignStmt {
            targets,
            values,
            span: Span::default(),
        })
    }

    /// Wraps a call or method call as a statement.
    pub fn call(expression: Expr) -> Self {
        Stmt::Expression(ExpressionStmt {
            expression,
            span: Span::default(),
        })
    }
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Name(_) => ExprType::Name,
            Expr::Number(_) => ExprType::Number,
            Expr::String(_) => ExprType::String,
            Expr::True(_) => ExprType::True,
            Expr::False(_) => ExprType::False,
            Expr::Nil(_) => ExprType::Nil,
            Expr::Varargs(_) => ExprType::Varargs,
            Expr::Table(_) => ExprType::Table,
            Expr::Index(_) => ExprType::Index,
            Expr::Call(_) => ExprType::Call,
            Expr::Invoke(_) => ExprType::Invoke,
            Expr::Function(_) => ExprType::Function,
            Expr::Binary(expr) => ExprType::Binary(expr.operator),
            Expr::Unary(expr) => ExprType::Unary(expr.operator),
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Name(expr) => &expr.span,
            Expr::Number(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::True(span) | Expr::False(span) | Expr::Nil(span) | Expr::Varargs(span) => span,
            Expr::Table(expr) => &expr.span,
            Expr::Index(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Invoke(expr) => &expr.span,
            Expr::Function(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Unary(expr) => &expr.span,
        }
    }

    /// The semantic fields of the expression, in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        match self {
            Expr::Name(name) => vec![("id", Field::Text(&name.id))],
            Expr::Number(expr) => vec![("value", Field::Number(expr.value))],
            Expr::String(expr) => vec![("value", Field::Text(&expr.value))],
            Expr::True(_) | Expr::False(_) | Expr::Nil(_) | Expr::Varargs(_) => vec![],
            Expr::Table(expr) => vec![("fields", Field::TableFields(&expr.fields))],
            Expr::Index(expr) => vec![
                ("value", Field::Expr(&expr.value)),
                ("idx", Field::Expr(&expr.idx)),
                ("notation", Field::Notation(expr.notation)),
            ],
            Expr::Call(expr) => vec![
                ("func", Field::Expr(&expr.func)),
                ("args", Field::Exprs(&expr.args)),
            ],
            Expr::Invoke(expr) => vec![
                ("source", Field::Expr(&expr.source)),
                ("func", Field::Name(&expr.func)),
                ("args", Field::Exprs(&expr.args)),
            ],
            Expr::Function(expr) => vec![
                ("params", Field::Names(&expr.params)),
                ("is_vararg", Field::Flag(expr.is_vararg)),
                ("body", Field::Block(&expr.body)),
            ],
            Expr::Binary(expr) => vec![
                ("left", Field::Expr(&expr.left)),
                ("right", Field::Expr(&expr.right)),
            ],
            Expr::Unary(expr) => vec![("operand", Field::Expr(&expr.operand))],
        }
    }

    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name(Name::new(id))
    }

    pub fn integer(value: i64) -> Self {
        Expr::Number(NumberExpr {
            value: Numeral::Integer(value),
            raw: value.to_string(),
            span: Span::default(),
        })
    }

    pub fn float(value: f64) -> Self {
        Expr::Number(NumberExpr {
            value: Numeral::Float(value),
            raw: format!("{:?}", value),
            span: Span::default(),
        })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::String(StringExpr {
            value: value.into(),
            span: Span::default(),
        })
    }

    pub fn binary(operator: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span: Span::default(),
        })
    }

    pub fn unary(operator: UnaryOp, operand: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            operator,
            operand: Box::new(operand),
            span: Span::default(),
        })
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call(CallExpr {
            func: Box::new(func),
            args,
            span: Span::default(),
        })
    }

    /// `value[idx]`
    pub fn index(value: Expr, idx: Expr) -> Self {
        Expr::Index(IndexExpr {
            value: Box::new(value),
            idx: Box::new(idx),
            notation: IndexNotation::Square,
            span: Span::default(),
        })
    }

    /// `value.name`
    pub fn field(value: Expr, name: impl Into<String>) -> Self {
        Expr::Index(IndexExpr {
            value: Box::new(value),
            idx: Box::new(Expr::name(name)),
            notation: IndexNotation::Dot,
            span: Span::default(),
        })
    }

    pub fn is_call(&self) -> bool {
        matches!(self, Expr::Call(_) | Expr::Invoke(_))
    }
}
