//! Error types and error handling for the parser.
//!
//! This module defines the errors produced while turning Lua source into a
//! syntax tree. It includes:
//!
//! - Error structures with source position information
//! - Lexical, syntax and nesting-limit variants
//! - Helpful error messages and suggestions

pub mod errors;
