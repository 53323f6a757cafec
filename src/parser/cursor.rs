//! Token cursor used by the parser.
//!
//! The cursor owns the token stream and the read position. Comment tokens are
//! invisible to `peek`, `advance` and `expect`; the statement parser collects
//! the ones sitting at statement position through `take_comment`.

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

#[derive(Debug, Clone)]
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
    last_end: Position,
}

impl Cursor {
    /// Creates a cursor over `tokens`. The stream is closed with an EOF token
    /// if it does not already end with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end)
                .unwrap_or_default();
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span::new(end, end),
            });
        }

        Cursor {
            tokens,
            pos: 0,
            last_end: Position::default(),
        }
    }

    fn eof(&self) -> &Token {
        &self.tokens[self.tokens.len() - 1]
    }

    fn skip_comments(&mut self) {
        while self.pos < self.tokens.len() - 1 && self.tokens[self.pos].kind.is_comment() {
            self.pos += 1;
        }
    }

    /// The `k`-th significant token from the current position, `k = 0` being
    /// the current token. Looking past the end yields the EOF token.
    pub fn peek(&self, k: usize) -> &Token {
        self.tokens[self.pos..]
            .iter()
            .filter(|token| !token.kind.is_comment())
            .nth(k)
            .unwrap_or_else(|| self.eof())
    }

    pub fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Consumes the current token and returns it. The cursor never moves past
    /// EOF.
    pub fn advance(&mut self) -> Token {
        self.skip_comments();
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
            self.last_end = token.span.end;
        }
        token
    }

    /// Consumes a comment token if one sits at the raw read position.
    pub fn take_comment(&mut self) -> Option<Token> {
        let token = &self.tokens[self.pos];
        if !token.kind.is_comment() {
            return None;
        }

        let token = token.clone();
        self.pos += 1;
        self.last_end = token.span.end;
        Some(token)
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        let token = self.current();
        if token.kind != kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: kind.describe(),
                    found: token.describe(),
                },
                token.span.start,
            ));
        }

        Ok(self.advance())
    }

    /// Start of the next token, comments included.
    pub fn raw_start(&self) -> Position {
        self.tokens[self.pos].span.start
    }

    /// End of the last consumed token.
    pub fn last_end(&self) -> Position {
        self.last_end
    }
}
