//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and parsing functions.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use log::debug;

use crate::{
    ast::ast::Chunk,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    cursor::Cursor,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_block,
};

/// Nesting ceiling used by [`ParseOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Settings for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting of blocks, sub-expressions, operator chains,
    /// suffix chains and `elseif` clauses. Deeper input fails with a
    /// recursion limit error instead of exhausting the stack.
    ///
    /// The default needs a few megabytes of stack in debug builds; lower it
    /// when parsing untrusted input on small-stack threads.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token cursor and the lookup tables for parsing
/// statements and expressions, and tracks how deeply the current construct
/// is nested.
pub struct Parser {
    /// The token stream and read position
    cursor: Cursor,
    options: ParseOptions,
    /// Current nesting of blocks and expressions
    depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for operator binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, options: ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            options,
            depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.cursor.current()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.cursor.current().kind
    }

    /// Returns the kind of the `k`-th token ahead, `k = 0` being the current one.
    pub fn peek_kind(&self, k: usize) -> TokenKind {
        self.cursor.peek(k).kind
    }

    /// Advances to the next token and returns the consumed one.
    pub fn advance(&mut self) -> Token {
        self.cursor.advance()
    }

    /// Consumes a comment sitting at statement position.
    pub fn take_comment(&mut self) -> Option<Token> {
        self.cursor.take_comment()
    }

    /// Expects a token of the specified kind with the default
    /// "X expected near Y" error.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.cursor.expect(expected_kind)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Runs `parse_fn` one nesting level deeper, failing once the configured
    /// maximum depth is reached.
    pub fn nested<T>(
        &mut self,
        parse_fn: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.chained(|parser| {
            parser.deepen()?;
            parse_fn(parser)
        })
    }

    /// Runs `parse_fn`, which may charge extra levels through [`Parser::deepen`]
    /// for nodes it builds in a loop. Those levels are released on return.
    pub fn chained<T>(
        &mut self,
        parse_fn: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let depth = self.depth;
        let result = parse_fn(self);
        self.depth = depth;
        result
    }

    /// Charges one nesting level. Only valid inside [`Parser::chained`].
    pub fn deepen(&mut self) -> Result<(), Error> {
        if self.depth >= self.options.max_depth {
            return Err(Error::new(
                ErrorImpl::RecursionLimit {
                    limit: self.options.max_depth,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    /// Returns the start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start
    }

    /// Start of the next token, counting comments.
    pub fn get_raw_position(&self) -> Position {
        self.cursor.raw_start()
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        let end = self.cursor.last_end();
        if end.offset < start.offset {
            Span::new(start, start)
        } else {
            Span::new(start, end)
        }
    }
}

/// Parses a Lua chunk with the default [`ParseOptions`].
///
/// ```
/// let chunk = luaparser::parse("local x = 1").unwrap();
/// assert_eq!(chunk.body.len(), 1);
/// ```
pub fn parse(source: &str) -> Result<Chunk, Error> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parses a Lua chunk.
///
/// The whole source is tokenized first, so a lexical error anywhere in the
/// input is reported before any syntax error.
pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Chunk, Error> {
    debug!("parsing {} bytes", source.len());

    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens, options.clone());
    create_token_lookups(&mut parser);

    let body = parse_block(&mut parser)?;
    parser.expect(TokenKind::EOF)?;

    debug!("parsed {} top-level statements", body.len());
    Ok(Chunk::new(body))
}
