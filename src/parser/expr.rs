use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BinaryExpr, BinaryOp, CallExpr, FunctionExpr, IndexExpr, IndexNotation, InvokeExpr,
            Name, NumberExpr, StringExpr, TableExpr, TableField, TableKey, UnaryExpr, UnaryOp,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::convert_numeral,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block};

/// Each folded operator deepens the tree by one level, so the loop charges
/// the nesting limit for it as well.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.nested(|parser| {
        // First parse NUD
        let token_kind = parser.current_token_kind();
        let nud_fn = match parser.get_nud_lookup().get(&token_kind) {
            Some(nud_fn) => *nud_fn,
            None => return Err(unexpected_symbol(parser.current_token())),
        };

        let mut left = nud_fn(parser)?;

        // While the next operator binds tighter than `bp`, keep extending lhs
        loop {
            let token_kind = parser.current_token_kind();
            let operator_bp = *parser
                .get_bp_lookup()
                .get(&token_kind)
                .unwrap_or(&BindingPower::Default);
            if operator_bp <= bp {
                break;
            }

            let led_fn = match parser.get_led_lookup().get(&token_kind) {
                Some(led_fn) => *led_fn,
                None => break,
            };
            parser.deepen()?;
            left = led_fn(parser, left, operator_bp)?;
        }

        Ok(left)
    })
}

/// `exp {',' exp}`
pub fn parse_expr_list(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut exprs = vec![parse_expr(parser, BindingPower::Default)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        exprs.push(parse_expr(parser, BindingPower::Default)?);
    }
    Ok(exprs)
}

fn unexpected_symbol(token: &Token) -> Error {
    Error::new(
        ErrorImpl::UnexpectedSymbol {
            found: token.describe(),
        },
        token.span.start,
    )
}

pub fn parse_number_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    match convert_numeral(&token.value) {
        Some(value) => Ok(Expr::Number(NumberExpr {
            value,
            raw: token.value,
            span: token.span,
        })),
        None => Err(Error::new(
            ErrorImpl::MalformedNumber { token: token.value },
            token.span.start,
        )),
    }
}

pub fn parse_string_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    Ok(Expr::String(StringExpr {
        value: token.value,
        span: token.span,
    }))
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    match token.kind {
        TokenKind::Nil => Ok(Expr::Nil(token.span)),
        TokenKind::True => Ok(Expr::True(token.span)),
        TokenKind::False => Ok(Expr::False(token.span)),
        TokenKind::Ellipsis => Ok(Expr::Varargs(token.span)),
        _ => Err(unexpected_symbol(&token)),
    }
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::Dash => UnaryOp::Minus,
        TokenKind::Not => UnaryOp::Not,
        TokenKind::Hash => UnaryOp::Length,
        TokenKind::Tilde => UnaryOp::BitNot,
        _ => return Err(unexpected_symbol(&operator_token)),
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        operator,
        span: parser.span_from(operator_token.span.start),
        operand: Box::new(operand),
    }))
}

fn binary_operator(token: &Token) -> Result<BinaryOp, Error> {
    let operator = match token.kind {
        TokenKind::Or => BinaryOp::Or,
        TokenKind::And => BinaryOp::And,
        TokenKind::Less => BinaryOp::LessThan,
        TokenKind::Greater => BinaryOp::GreaterThan,
        TokenKind::LessEquals => BinaryOp::LessOrEqual,
        TokenKind::GreaterEquals => BinaryOp::GreaterOrEqual,
        TokenKind::NotEquals => BinaryOp::NotEqual,
        TokenKind::Equals => BinaryOp::Equal,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Tilde => BinaryOp::BitXor,
        TokenKind::Ampersand => BinaryOp::BitAnd,
        TokenKind::ShiftLeft => BinaryOp::ShiftLeft,
        TokenKind::ShiftRight => BinaryOp::ShiftRight,
        TokenKind::DotDot => BinaryOp::Concat,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mult,
        TokenKind::Slash => BinaryOp::FloatDiv,
        TokenKind::DoubleSlash => BinaryOp::FloorDiv,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::Caret => BinaryOp::Expo,
        _ => return Err(unexpected_symbol(token)),
    };
    Ok(operator)
}

fn finish_binary_expr(
    parser: &mut Parser,
    left: Expr,
    right_bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = binary_operator(&operator_token)?;
    let right = parse_expr(parser, right_bp)?;

    Ok(Expr::Binary(BinaryExpr {
        operator,
        span: parser.span_from(left.get_span().start),
        left: Box::new(left),
        right: Box::new(right),
    }))
}

/// Left associative binary operators.
pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    finish_binary_expr(parser, left, bp)
}

/// Right associative binary operators (`..` and `^`).
pub fn parse_right_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    finish_binary_expr(parser, left, bp.lower())
}

/// NUD for expressions starting with a name or `(`.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let (expr, _) = parse_suffixed_expr(parser)?;
    Ok(expr)
}

/// Parses `primary { '.' NAME | '[' exp ']' | ':' NAME args | args }`
/// where `primary` is a name or a parenthesized expression.
///
/// The returned flag is true when the whole expression is a bare
/// parenthesized expression, which is neither assignable nor a statement.
pub fn parse_suffixed_expr(parser: &mut Parser) -> Result<(Expr, bool), Error> {
    parser.chained(parse_suffixes)
}

fn parse_suffixes(parser: &mut Parser) -> Result<(Expr, bool), Error> {
    let start = parser.get_position();

    let (mut expr, mut parenthesized) = match parser.current_token_kind() {
        TokenKind::Identifier => {
            let token = parser.advance();
            (Expr::Name(name_from_token(token)), false)
        }
        TokenKind::OpenParen => {
            parser.advance();
            let inner = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::CloseParen)?;
            (inner, true)
        }
        _ => return Err(unexpected_symbol(parser.current_token())),
    };

    loop {
        expr = match parser.current_token_kind() {
            TokenKind::Dot => {
                parser.deepen()?;
                parser.advance();
                let name = parser.expect(TokenKind::Identifier)?;
                Expr::Index(IndexExpr {
                    value: Box::new(expr),
                    idx: Box::new(Expr::Name(name_from_token(name))),
                    notation: IndexNotation::Dot,
                    span: parser.span_from(start),
                })
            }
            TokenKind::OpenBracket => {
                parser.deepen()?;
                parser.advance();
                let idx = parse_expr(parser, BindingPower::Default)?;
                parser.expect(TokenKind::CloseBracket)?;
                Expr::Index(IndexExpr {
                    value: Box::new(expr),
                    idx: Box::new(idx),
                    notation: IndexNotation::Square,
                    span: parser.span_from(start),
                })
            }
            TokenKind::Colon => {
                parser.deepen()?;
                parser.advance();
                let func = name_from_token(parser.expect(TokenKind::Identifier)?);
                let args = parse_call_args(parser)?;
                Expr::Invoke(InvokeExpr {
                    source: Box::new(expr),
                    func,
                    args,
                    span: parser.span_from(start),
                })
            }
            TokenKind::OpenParen | TokenKind::String | TokenKind::OpenCurly => {
                parser.deepen()?;
                let args = parse_call_args(parser)?;
                Expr::Call(CallExpr {
                    func: Box::new(expr),
                    args,
                    span: parser.span_from(start),
                })
            }
            _ => return Ok((expr, parenthesized)),
        };
        parenthesized = false;
    }
}

/// `'(' [explist] ')'`, a single string literal or a single table constructor.
pub fn parse_call_args(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    match parser.current_token_kind() {
        TokenKind::String => Ok(vec![parse_string_expr(parser)?]),
        TokenKind::OpenCurly => Ok(vec![parse_table_expr(parser)?]),
        TokenKind::OpenParen => {
            parser.advance();
            let args = if parser.current_token_kind() == TokenKind::CloseParen {
                vec![]
            } else {
                parse_expr_list(parser)?
            };
            parser.expect(TokenKind::CloseParen)?;
            Ok(args)
        }
        _ => {
            let token = parser.current_token();
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: String::from("function arguments"),
                    found: token.describe(),
                },
                token.span.start,
            ))
        }
    }
}

pub fn parse_table_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut fields = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let field = match parser.current_token_kind() {
            TokenKind::OpenBracket => {
                parser.advance();
                let key = parse_expr(parser, BindingPower::Default)?;
                parser.expect(TokenKind::CloseBracket)?;
                parser.expect(TokenKind::Assignment)?;
                TableField {
                    key: Some(TableKey::Expr(key)),
                    value: parse_expr(parser, BindingPower::Default)?,
                }
            }
            TokenKind::Identifier if parser.peek_kind(1) == TokenKind::Assignment => {
                let name = name_from_token(parser.advance());
                parser.advance();
                TableField {
                    key: Some(TableKey::Name(name)),
                    value: parse_expr(parser, BindingPower::Default)?,
                }
            }
            _ => TableField {
                key: None,
                value: parse_expr(parser, BindingPower::Default)?,
            },
        };
        fields.push(field);

        if parser.current_token_kind() == TokenKind::Comma
            || parser.current_token_kind() == TokenKind::Semicolon
        {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::Table(TableExpr {
        fields,
        span: parser.span_from(start),
    }))
}

/// Anonymous `function (params) body end`.
pub fn parse_function_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;
    Ok(Expr::Function(parse_function_body(parser, start)?))
}

/// Parses `'(' [parlist] ')' block 'end'`. `start` is where the enclosing
/// construct began.
pub fn parse_function_body(parser: &mut Parser, start: Position) -> Result<FunctionExpr, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut params = vec![];
    let mut is_vararg = false;

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            match parser.current_token_kind() {
                TokenKind::Ellipsis => {
                    parser.advance();
                    is_vararg = true;
                    break;
                }
                TokenKind::Identifier => params.push(name_from_token(parser.advance())),
                _ => {
                    let token = parser.current_token();
                    return Err(Error::new(
                        ErrorImpl::UnexpectedToken {
                            expected: TokenKind::Identifier.describe(),
                            found: token.describe(),
                        },
                        token.span.start,
                    ));
                }
            }

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;
    parser.expect(TokenKind::End)?;

    Ok(FunctionExpr {
        params,
        is_vararg,
        body,
        span: parser.span_from(start),
    })
}

pub fn name_from_token(token: Token) -> Name {
    Name {
        id: token.value,
        span: token.span,
    }
}
