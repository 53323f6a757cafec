use std::fmt::Display;

use crate::Span;

use super::ast::{Block, Expr};

// LITERALS

/// An identifier, used for variables, parameters, labels of fields and
/// method names.
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub id: String,
    pub span: Span,
}

impl Name {
    pub fn new(id: impl Into<String>) -> Self {
        Name {
            id: id.into(),
            span: Span::default(),
        }
    }
}

/// Value of a numeral. Lua distinguishes integer and float subtypes, but
/// like Lua's `==` an integer equals a float holding exactly the same value.
#[derive(Debug, Clone, Copy)]
pub enum Numeral {
    Integer(i64),
    Float(f64),
}

impl PartialEq for Numeral {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Numeral::Integer(left), Numeral::Integer(right)) => left == right,
            (Numeral::Float(left), Numeral::Float(right)) => left == right,
            (Numeral::Integer(integer), Numeral::Float(float))
            | (Numeral::Float(float), Numeral::Integer(integer)) => {
                float_to_integer(float) == Some(integer)
            }
        }
    }
}

/// The integer a float represents exactly, if any.
fn float_to_integer(value: f64) -> Option<i64> {
    // 2^63 itself is out of range; -2^63 is not
    let bound = -(i64::MIN as f64);
    if value.fract() == 0.0 && value >= -bound && value < bound {
        Some(value as i64)
    } else {
        None
    }
}

impl Display for Numeral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Numeral::Integer(value) => write!(f, "{}", value),
            Numeral::Float(value) => write!(f, "{:?}", value),
        }
    }
}

/// Number Expression
///
/// Keeps the numeral exactly as written in `raw`; equality only looks at the
/// normalised `value`, so `0x10`, `16`, `16.0` and `1.6e1` are the same node.
#[derive(Debug, Clone)]
pub struct NumberExpr {
    pub value: Numeral,
    pub raw: String,
    pub span: Span,
}

impl PartialEq for NumberExpr {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// String Expression, holding the decoded value of the literal.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

// COMPLEX

/// Key of a table constructor field.
#[derive(Debug, Clone, PartialEq)]
pub enum TableKey {
    /// `name = value`
    Name(Name),
    /// `[expr] = value`
    Expr(Expr),
}

/// One field of a table constructor. Positional fields have no key.
#[derive(Debug, Clone, PartialEq)]
pub struct TableField {
    pub key: Option<TableKey>,
    pub value: Expr,
}

/// Table Expression: `{ [k] = v, name = v, v }`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableExpr {
    pub fields: Vec<TableField>,
    pub span: Span,
}

impl TableExpr {
    /// The keys in field order; `None` for positional fields.
    pub fn keys(&self) -> impl Iterator<Item = Option<&TableKey>> {
        self.fields.iter().map(|field| field.key.as_ref())
    }

    pub fn values(&self) -> impl Iterator<Item = &Expr> {
        self.fields.iter().map(|field| &field.value)
    }
}

/// How an index was written. `a.x` and `a[x]` have the same `idx` node
/// (`Name(x)`) and are told apart only by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexNotation {
    Dot,
    Square,
}

/// Index Expression: `value.idx` or `value[idx]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub value: Box<Expr>,
    pub idx: Box<Expr>,
    pub notation: IndexNotation,
    pub span: Span,
}

/// Call Expression. The sugar forms `f "s"` and `f {..}` produce a single
/// argument.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub func: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// Method call: `source:func(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeExpr {
    pub source: Box<Expr>,
    pub func: Name,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// Function Expression: an anonymous `function (params) body end`.
/// Also carries the body of `function` and `local function` statements.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub params: Vec<Name>,
    pub is_vararg: bool,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
    NotEqual,
    Equal,
    BitOr,
    BitXor,
    BitAnd,
    ShiftLeft,
    ShiftRight,
    Concat,
    Add,
    Sub,
    Mult,
    FloatDiv,
    FloorDiv,
    Mod,
    Expo,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
            BinaryOp::LessThan => "<",
            BinaryOp::GreaterThan => ">",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::GreaterOrEqual => ">=",
            BinaryOp::NotEqual => "~=",
            BinaryOp::Equal => "==",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "~",
            BinaryOp::BitAnd => "&",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::Concat => "..",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mult => "*",
            BinaryOp::FloatDiv => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Expo => "^",
        }
    }

    /// Node name used by generic tree walkers.
    pub fn node_name(&self) -> &'static str {
        match self {
            BinaryOp::Or => "OrLoOp",
            BinaryOp::And => "AndLoOp",
            BinaryOp::LessThan => "LessThanOp",
            BinaryOp::GreaterThan => "GreaterThanOp",
            BinaryOp::LessOrEqual => "LessOrEqThanOp",
            BinaryOp::GreaterOrEqual => "GreaterOrEqThanOp",
            BinaryOp::NotEqual => "NotEqToOp",
            BinaryOp::Equal => "EqToOp",
            BinaryOp::BitOr => "BOrOp",
            BinaryOp::BitXor => "BXorOp",
            BinaryOp::BitAnd => "BAndOp",
            BinaryOp::ShiftLeft => "BShiftLOp",
            BinaryOp::ShiftRight => "BShiftROp",
            BinaryOp::Concat => "Concat",
            BinaryOp::Add => "AddOp",
            BinaryOp::Sub => "SubOp",
            BinaryOp::Mult => "MultOp",
            BinaryOp::FloatDiv => "FloatDivOp",
            BinaryOp::FloorDiv => "FloorDivOp",
            BinaryOp::Mod => "ModOp",
            BinaryOp::Expo => "ExpoOp",
        }
    }
}

/// Binary Expression: `left operator right`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub operator: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Minus,
    Not,
    Length,
    BitNot,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Minus => "-",
            UnaryOp::Not => "not",
            UnaryOp::Length => "#",
            UnaryOp::BitNot => "~",
        }
    }

    pub fn node_name(&self) -> &'static str {
        match self {
            UnaryOp::Minus => "UMinusOp",
            UnaryOp::Not => "ULNotOp",
            UnaryOp::Length => "ULengthOp",
            UnaryOp::BitNot => "UBNotOp",
        }
    }
}

/// Unary Expression: `operator operand`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: UnaryOp,
    pub operand: Box<Expr>,
    pub span: Span,
}
