//! Lexical analysis module for the parser.
//!
//! This module contains the lexer (tokenizer) that converts Lua source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, numerals and strings
//! - Long brackets (`[==[ ... ]==]`) for strings and comments
//! - Token position tracking for error reporting
//! - Comments, which are kept as tokens so the parser can retain them

pub mod lexer;
pub mod tokens;
