use log::trace;

use crate::{
    ast::{
        ast::{Block, Expr, Stmt},
        statements::{
            AssignStmt, BreakStmt, CommentStmt, DoStmt, ExpressionStmt, ForinStmt, FornumStmt,
            FunctionName, FunctionStmt, GotoStmt, IfStmt, LabelStmt, LocalAssignStmt,
            LocalFunctionStmt, OrElse, RepeatStmt, ReturnStmt, Target, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    expr::{name_from_token, parse_expr, parse_expr_list, parse_function_body, parse_suffixed_expr},
    lookups::BindingPower,
    parser::Parser,
};

/// Tokens that close a block.
fn block_follow(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::EOF | TokenKind::End | TokenKind::Else | TokenKind::Elseif | TokenKind::Until
    )
}

fn comment_stmt(token: Token) -> Stmt {
    Stmt::Comment(CommentStmt {
        is_multi_line: token.kind == TokenKind::LongComment,
        text: token.value,
        span: token.span,
    })
}

/// Parses statements up to the token closing the block, which is left for
/// the caller to consume.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    parser.nested(|parser| {
        let start = parser.get_raw_position();
        let mut body = vec![];

        loop {
            if let Some(comment) = parser.take_comment() {
                body.push(comment_stmt(comment));
                continue;
            }

            match parser.current_token_kind() {
                TokenKind::Semicolon => {
                    parser.advance();
                }
                TokenKind::Return => {
                    body.push(parse_return_stmt(parser)?);
                    while let Some(comment) = parser.take_comment() {
                        body.push(comment_stmt(comment));
                    }

                    let token = parser.current_token();
                    if !block_follow(token.kind) {
                        return Err(Error::new(
                            ErrorImpl::ReturnNotLast {
                                found: token.describe(),
                            },
                            token.span.start,
                        ));
                    }
                    break;
                }
                kind if block_follow(kind) => break,
                _ => body.push(parse_stmt(parser)?),
            }
        }

        Ok(Block {
            body,
            span: parser.span_from(start),
        })
    })
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token_kind = parser.current_token_kind();
    trace!("statement at {} starting with {}", parser.get_position(), token_kind);

    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&token_kind).copied() {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

/// Assignment or call statement.
pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let (expr, parenthesized) = parse_suffixed_expr(parser)?;

    if matches!(
        parser.current_token_kind(),
        TokenKind::Assignment | TokenKind::Comma
    ) {
        let mut targets = vec![into_target(expr, parenthesized)?];
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            let (expr, parenthesized) = parse_suffixed_expr(parser)?;
            targets.push(into_target(expr, parenthesized)?);
        }

        parser.expect(TokenKind::Assignment)?;
        let values = parse_expr_list(parser)?;

        return Ok(Stmt::Assign(AssignStmt {
            targets,
            values,
            span: parser.span_from(start),
        }));
    }

    if parenthesized || !expr.is_call() {
        let token = parser.current_token();
        return Err(Error::new(
            ErrorImpl::InvalidStatement {
                found: token.describe(),
            },
            token.span.start,
        ));
    }

    Ok(Stmt::Expression(ExpressionStmt {
        expression: expr,
        span: parser.span_from(start),
    }))
}

fn into_target(expr: Expr, parenthesized: bool) -> Result<Target, Error> {
    let start = expr.get_span().start;
    let found = match expr {
        Expr::Name(name) if !parenthesized => return Ok(Target::Name(name)),
        Expr::Index(index) if !parenthesized => return Ok(Target::Index(index)),
        _ if parenthesized => String::from("a parenthesized expression"),
        Expr::Call(_) => String::from("a function call"),
        Expr::Invoke(_) => String::from("a method call"),
        _ => String::from("an expression"),
    };

    Err(Error::new(ErrorImpl::InvalidAssignmentTarget { found }, start))
}

pub fn parse_local_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    if parser.current_token_kind() == TokenKind::Function {
        parser.advance();
        let name = name_from_token(parser.expect(TokenKind::Identifier)?);
        let func = parse_function_body(parser, start)?;

        return Ok(Stmt::LocalFunction(LocalFunctionStmt {
            name,
            func,
            span: parser.span_from(start),
        }));
    }

    let mut targets = vec![name_from_token(parser.expect(TokenKind::Identifier)?)];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        targets.push(name_from_token(parser.expect(TokenKind::Identifier)?));
    }

    let values = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        parse_expr_list(parser)?
    } else {
        vec![]
    };

    Ok(Stmt::LocalAssign(LocalAssignStmt {
        targets,
        values,
        span: parser.span_from(start),
    }))
}

/// `function a.b.c:m (params) body end`
pub fn parse_function_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let mut path = vec![name_from_token(parser.expect(TokenKind::Identifier)?)];
    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        path.push(name_from_token(parser.expect(TokenKind::Identifier)?));
    }

    let method = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(name_from_token(parser.expect(TokenKind::Identifier)?))
    } else {
        None
    };

    let func = parse_function_body(parser, start)?;

    Ok(Stmt::Function(FunctionStmt {
        name: FunctionName { path, method },
        func,
        span: parser.span_from(start),
    }))
}

/// Parses an `if` chain. Every `elseif` becomes an `If` nested in the
/// `orelse` of the clause before it; a final `else` body sits in the
/// innermost `orelse`.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.chained(parse_if_chain)
}

/// Every `elseif` ends up one level deeper in the tree than the last.
fn parse_if_chain(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let test = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Then)?;
    let body = parse_block(parser)?;

    let mut clauses: Vec<(Position, Expr, Block)> = vec![];
    while parser.current_token_kind() == TokenKind::Elseif {
        parser.deepen()?;
        let clause_start = parser.advance().span.start;
        let clause_test = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Then)?;
        clauses.push((clause_start, clause_test, parse_block(parser)?));
    }

    let mut orelse = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        OrElse::Else(parse_block(parser)?)
    } else {
        OrElse::Absent
    };

    parser.expect(TokenKind::End)?;

    for (clause_start, clause_test, clause_body) in clauses.into_iter().rev() {
        orelse = OrElse::ElseIf(Box::new(IfStmt {
            test: clause_test,
            body: clause_body,
            orelse,
            span: parser.span_from(clause_start),
        }));
    }

    Ok(Stmt::If(IfStmt {
        test,
        body,
        orelse,
        span: parser.span_from(start),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let test = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;
    let body = parse_block(parser)?;
    parser.expect(TokenKind::End)?;

    Ok(Stmt::While(WhileStmt {
        test,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_do_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let body = parse_block(parser)?;
    parser.expect(TokenKind::End)?;

    Ok(Stmt::Do(DoStmt {
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let body = parse_block(parser)?;
    parser.expect(TokenKind::Until)?;
    let test = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Repeat(RepeatStmt {
        body,
        test,
        span: parser.span_from(start),
    }))
}

/// Numeric or generic `for`, told apart by the token after the first name.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    match parser.peek_kind(1) {
        TokenKind::Assignment => parse_fornum_stmt(parser, start),
        TokenKind::Comma | TokenKind::In => parse_forin_stmt(parser, start),
        _ => {
            parser.expect(TokenKind::Identifier)?;
            let token = parser.current_token();
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: String::from("'=' or 'in'"),
                    found: token.describe(),
                },
                token.span.start,
            ))
        }
    }
}

fn parse_fornum_stmt(parser: &mut Parser, start: Position) -> Result<Stmt, Error> {
    let target = name_from_token(parser.expect(TokenKind::Identifier)?);
    parser.expect(TokenKind::Assignment)?;

    let from = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    let stop = parse_expr(parser, BindingPower::Default)?;

    let step = if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Do)?;
    let body = parse_block(parser)?;
    parser.expect(TokenKind::End)?;

    Ok(Stmt::Fornum(FornumStmt {
        target,
        start: from,
        stop,
        step,
        body,
        span: parser.span_from(start),
    }))
}

fn parse_forin_stmt(parser: &mut Parser, start: Position) -> Result<Stmt, Error> {
    let mut targets = vec![name_from_token(parser.expect(TokenKind::Identifier)?)];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        targets.push(name_from_token(parser.expect(TokenKind::Identifier)?));
    }

    parser.expect(TokenKind::In)?;
    let iter = parse_expr_list(parser)?;

    parser.expect(TokenKind::Do)?;
    let body = parse_block(parser)?;
    parser.expect(TokenKind::End)?;

    Ok(Stmt::Forin(ForinStmt {
        targets,
        iter,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_goto_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let label = parser.expect(TokenKind::Identifier)?.value;

    Ok(Stmt::Goto(GotoStmt {
        label,
        span: parser.span_from(start),
    }))
}

/// `::name::`
pub fn parse_label_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let id = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::ColonColon)?;

    Ok(Stmt::Label(LabelStmt {
        id,
        span: parser.span_from(start),
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();
    Ok(Stmt::Break(BreakStmt { span: token.span }))
}

/// `return [explist] [';']`
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let kind = parser.current_token_kind();
    let values = if block_follow(kind) || kind == TokenKind::Semicolon {
        vec![]
    } else {
        parse_expr_list(parser)?
    };

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(Stmt::Return(ReturnStmt {
        values,
        span: parser.span_from(start),
    }))
}
