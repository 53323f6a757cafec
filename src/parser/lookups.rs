use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Or,
    And,
    Comparison,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Concat,
    Additive,
    Multiplicative,
    Unary,
    Power,
    Primary,
}

impl BindingPower {
    /// The level just below this one. Right associative operators parse their
    /// right operand with it so an operator of the same level keeps binding.
    pub fn lower(self) -> BindingPower {
        match self {
            BindingPower::Default | BindingPower::Or => BindingPower::Default,
            BindingPower::And => BindingPower::Or,
            BindingPower::Comparison => BindingPower::And,
            BindingPower::BitOr => BindingPower::Comparison,
            BindingPower::BitXor => BindingPower::BitOr,
            BindingPower::BitAnd => BindingPower::BitXor,
            BindingPower::Shift => BindingPower::BitAnd,
            BindingPower::Concat => BindingPower::Shift,
            BindingPower::Additive => BindingPower::Concat,
            BindingPower::Multiplicative => BindingPower::Additive,
            BindingPower::Unary => BindingPower::Multiplicative,
            BindingPower::Power => BindingPower::Unary,
            BindingPower::Primary => BindingPower::Power,
        }
    }
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.led(TokenKind::Or, BindingPower::Or, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::And, parse_binary_expr);

    // Comparison
    parser.led(TokenKind::Less, BindingPower::Comparison, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Comparison, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Comparison, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Comparison, parse_binary_expr);
    parser.led(TokenKind::Equals, BindingPower::Comparison, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Comparison, parse_binary_expr);

    // Bitwise
    parser.led(TokenKind::Pipe, BindingPower::BitOr, parse_binary_expr);
    parser.led(TokenKind::Tilde, BindingPower::BitXor, parse_binary_expr);
    parser.led(TokenKind::Ampersand, BindingPower::BitAnd, parse_binary_expr);
    parser.led(TokenKind::ShiftLeft, BindingPower::Shift, parse_binary_expr);
    parser.led(TokenKind::ShiftRight, BindingPower::Shift, parse_binary_expr);

    parser.led(TokenKind::DotDot, BindingPower::Concat, parse_right_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::DoubleSlash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    parser.led(TokenKind::Caret, BindingPower::Power, parse_right_binary_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_number_expr);
    parser.nud(TokenKind::String, parse_string_expr);
    parser.nud(TokenKind::Nil, parse_literal_expr);
    parser.nud(TokenKind::True, parse_literal_expr);
    parser.nud(TokenKind::False, parse_literal_expr);
    parser.nud(TokenKind::Ellipsis, parse_literal_expr);
    parser.nud(TokenKind::OpenCurly, parse_table_expr);
    parser.nud(TokenKind::Function, parse_function_expr);
    parser.nud(TokenKind::Identifier, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_prefix_expr);

    // Unary
    parser.nud(TokenKind::Dash, parse_unary_expr);
    parser.nud(TokenKind::Not, parse_unary_expr);
    parser.nud(TokenKind::Hash, parse_unary_expr);
    parser.nud(TokenKind::Tilde, parse_unary_expr);

    // Statements
    parser.stmt(TokenKind::Local, parse_local_stmt);
    parser.stmt(TokenKind::Function, parse_function_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Do, parse_do_stmt);
    parser.stmt(TokenKind::Repeat, parse_repeat_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Goto, parse_goto_stmt);
    parser.stmt(TokenKind::ColonColon, parse_label_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
