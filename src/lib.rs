#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

pub use ast::ast::{Block, Chunk, Expr, Stmt};
pub use errors::errors::ErrorKind;
pub use parser::parser::{parse, parse_with_options, ParseOptions};

/// A location in the source text. Lines and columns are 1-based, the offset
/// is a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range of a token or node.
///
/// Spans are metadata: any two spans compare equal, so trees built by hand
/// (without positions) are equal to parsed trees with the same shape. Use
/// [`Span::same_location`] when the actual range matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Length of the range in bytes.
    pub fn len(&self) -> u32 {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn same_location(&self, other: &Span) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl PartialEq for Span {
    fn eq(&self, _other: &Span) -> bool {
        true
    }
}

impl Eq for Span {}

/// Returns the 1-based line number, the text of that line and the byte offset
/// of `position` inside it.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    // Position at the very end of the input: point just past the last line.
    match source.split_inclusive('\n').last() {
        Some(last) if !last.ends_with('\n') => (line_number - 1, last.to_string(), last.len()),
        _ => (line_number, String::new(), 0),
    }
}

/// Renders an error against its source text:
///
/// ```text
/// Error: UnexpectedToken ('end' expected near <eof>)
/// -> script.lua
///   |
/// 3 | if x then
///   | ---------^
/// ```
pub fn render_error(error: &Error, source: &str, name: &str) -> String {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.offset);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", name));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let line_text = line_text.trim_end_matches(['\n', '\r']);
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let column = line_text[..line_pos.min(line_text.len())].chars().count();
    let arrows = column.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nfoo\n\nTesting { }\n";

        let (line_number, line, line_pos) = get_line_at_position(source, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = get_line_at_position(source, 27);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let (line_number, line, line_pos) = get_line_at_position("if x then", 9);
        assert_eq!(line_number, 1);
        assert_eq!(line, "if x then");
        assert_eq!(line_pos, 9);
    }

    #[test]
    fn test_spans_compare_equal() {
        let a = Span::new(Position::new(0, 1, 1), Position::new(3, 1, 4));
        let b = Span::default();
        assert_eq!(a, b);
        assert!(!a.same_location(&b));
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_render_error() {
        let source = "local x = 1\nif x then\n";
        let error = parse(source).unwrap_err();
        let rendered = render_error(&error, source, "script.lua");

        assert!(rendered.starts_with("Error: UnexpectedToken"));
        assert!(rendered.contains("-> script.lua"));
        assert!(rendered.contains("'end' expected"));
    }
}
