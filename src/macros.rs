//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for fixed operator and
//!   punctuation tokens

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler for a fixed token such as `==` or `::`.
///
/// The generated handler consumes `$value.len()` bytes and yields a token of
/// the given kind spanning them.
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^==").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "=="),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| -> Result<Option<Token>, Error> {
            let start = lexer.current_position();
            lexer.advance_n($value.len());
            Ok(Some(MK_TOKEN!(
                $kind,
                String::from($value),
                Span {
                    start,
                    end: lexer.current_position(),
                }
            )))
        }
    };
}
