//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with Lua's operator precedence and handles:
//!
//! - Block and statement parsing (assignments, control flow, functions)
//! - Expression parsing (operators, calls, indexing, table constructors)
//! - Comments at statement position, kept as statements
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod cursor;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
