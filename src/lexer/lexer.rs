use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{
    ast::expressions::Numeral,
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Consumes the text matched by a pattern. `Ok(None)` means the text was
/// skipped (whitespace) and lexing should continue.
pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<Option<Token>, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

// Patterns are tried in order and the first match wins, so longer operators
// must come before their prefixes.
lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^[ \t\r\n\x0B\x0C]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^--").unwrap(), handler: comment_handler },
        RegexPattern { regex: Regex::new(r"^\[=*\[").unwrap(), handler: long_string_handler },
        RegexPattern { regex: Regex::new(r"^\[=+").unwrap(), handler: invalid_delimiter_handler },
        RegexPattern { regex: Regex::new(r#"^["']"#).unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^\.?[0-9]").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"^\.\.\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ellipsis, "...") },
        RegexPattern { regex: Regex::new(r"^\.\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DotDot, "..") },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new(r"^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new(r"^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new(r"^~=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "~=") },
        RegexPattern { regex: Regex::new(r"^~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~") },
        RegexPattern { regex: Regex::new(r"^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new(r"^<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<") },
        RegexPattern { regex: Regex::new(r"^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(r"^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new(r"^>>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>") },
        RegexPattern { regex: Regex::new(r"^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new(r"^//").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DoubleSlash, "//") },
        RegexPattern { regex: Regex::new(r"^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new(r"^::").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ColonColon, "::") },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new(r"^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new(r"^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new(r"^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        RegexPattern { regex: Regex::new(r"^\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Caret, "^") },
        RegexPattern { regex: Regex::new(r"^#").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Hash, "#") },
        RegexPattern { regex: Regex::new(r"^&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&") },
        RegexPattern { regex: Regex::new(r"^\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|") },
    ];
    static ref LONG_BRACKET: Regex = Regex::new(r"^\[=*\[").unwrap();
    static ref DECIMAL_NUMERAL: Regex =
        Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$").unwrap();
    static ref HEX_NUMERAL: Regex =
        Regex::new(r"^0[xX]([0-9a-fA-F]+\.?[0-9a-fA-F]*|\.[0-9a-fA-F]+)([pP][+-]?[0-9]+)?$").unwrap();
}

/// Lazy tokenizer over one source text.
///
/// Yields tokens (comments included) and finishes with a single `EOF` token.
/// After the first error the iterator is exhausted. Cloning a lexer or calling
/// [`Lexer::reset`] gives an independent pass over the same text.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    finished: bool,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer {
            source: source.into(),
            pos: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Restarts tokenization from the first byte.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.line = 1;
        self.column = 1;
        self.finished = false;
    }

    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    /// Consumes one character.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.at()?;
        self.advance_n(ch.len_utf8());
        Some(ch)
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn peek_char(&self, n: usize) -> Option<char> {
        self.remainder().chars().nth(n)
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn current_position(&self) -> Position {
        Position::new(self.pos as u32, self.line, self.column)
    }

    fn source_since(&self, start: Position) -> &str {
        &self.source[start.offset as usize..self.pos]
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if self.at_eof() {
                self.finished = true;
                let position = self.current_position();
                return Some(Ok(MK_TOKEN!(
                    TokenKind::EOF,
                    String::from("EOF"),
                    Span {
                        start: position,
                        end: position
                    }
                )));
            }

            let Some(pattern) = PATTERNS
                .iter()
                .find(|pattern| pattern.regex.is_match(self.remainder()))
            else {
                self.finished = true;
                let token = self.at().map(String::from).unwrap_or_default();
                return Some(Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token },
                    self.current_position(),
                )));
            };

            match (pattern.handler)(self, &pattern.regex) {
                Ok(Some(token)) => {
                    trace!("{} {:?} at {}", token.kind, token.value, token.span.start);
                    return Some(Ok(token));
                }
                Ok(None) => continue,
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

fn match_len(lexer: &Lexer, regex: &Regex) -> usize {
    regex.find(lexer.remainder()).map(|m| m.end()).unwrap_or(0)
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = match_len(lexer, regex);
    lexer.advance_n(matched);
    Ok(None)
}

fn comment_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<Option<Token>, Error> {
    let start = lexer.current_position();
    lexer.advance_n(2);

    let opening = match_len(lexer, &LONG_BRACKET);
    if opening > 0 {
        lexer.advance_n(opening);
        let text = read_long_bracket(lexer, opening - 2, start, "comment")?;
        return Ok(Some(MK_TOKEN!(
            TokenKind::LongComment,
            text,
            Span {
                start,
                end: lexer.current_position()
            }
        )));
    }

    let line_len = lexer
        .remainder()
        .find(['\n', '\r'])
        .unwrap_or(lexer.remainder().len());
    let text = lexer.remainder()[..line_len].trim().to_string();
    lexer.advance_n(line_len);

    Ok(Some(MK_TOKEN!(
        TokenKind::Comment,
        text,
        Span {
            start,
            end: lexer.current_position()
        }
    )))
}

/// Reads the body of a long bracket whose opening delimiter has already been
/// consumed. Only `]` followed by exactly `level` `=` signs and `]` closes it.
fn read_long_bracket(
    lexer: &mut Lexer,
    level: usize,
    start: Position,
    what: &'static str,
) -> Result<String, Error> {
    match (lexer.at(), lexer.peek_char(1)) {
        (Some('\r'), Some('\n')) | (Some('\n'), Some('\r')) => lexer.advance_n(2),
        (Some('\r'), _) | (Some('\n'), _) => lexer.advance_n(1),
        _ => {}
    }

    let closing = format!("]{}]", "=".repeat(level));
    match lexer.remainder().find(&closing) {
        Some(end) => {
            let content = lexer.remainder()[..end].to_string();
            lexer.advance_n(end + closing.len());
            Ok(content)
        }
        None => Err(Error::new(
            ErrorImpl::UnterminatedLongBracket { what, level },
            start,
        )),
    }
}

fn long_string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let start = lexer.current_position();
    let opening = match_len(lexer, regex);
    lexer.advance_n(opening);

    let value = read_long_bracket(lexer, opening - 2, start, "string")?;

    Ok(Some(MK_TOKEN!(
        TokenKind::String,
        value,
        Span {
            start,
            end: lexer.current_position()
        }
    )))
}

fn invalid_delimiter_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<Option<Token>, Error> {
    Err(Error::new(ErrorImpl::InvalidLongDelimiter, lexer.current_position()))
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<Option<Token>, Error> {
    let start = lexer.current_position();
    let quote = lexer.bump();

    // Escapes produce raw bytes, so the literal is assembled as bytes and
    // decoded once it is complete.
    let mut bytes: Vec<u8> = Vec::new();

    loop {
        match lexer.at() {
            None | Some('\n') | Some('\r') => {
                return Err(Error::new(ErrorImpl::UnterminatedString, start));
            }
            Some(ch) if Some(ch) == quote => {
                lexer.bump();
                break;
            }
            Some('\\') => read_escape(lexer, &mut bytes)?,
            Some(ch) => {
                let mut buffer = [0; 4];
                bytes.extend_from_slice(ch.encode_utf8(&mut buffer).as_bytes());
                lexer.bump();
            }
        }
    }

    let value = String::from_utf8_lossy(&bytes).into_owned();

    Ok(Some(MK_TOKEN!(
        TokenKind::String,
        value,
        Span {
            start,
            end: lexer.current_position()
        }
    )))
}

fn read_escape(lexer: &mut Lexer, bytes: &mut Vec<u8>) -> Result<(), Error> {
    let escape_start = lexer.current_position();
    lexer.bump();

    let Some(ch) = lexer.at() else {
        return Err(Error::new(ErrorImpl::UnterminatedString, escape_start));
    };

    let simple = match ch {
        'n' => Some(b'\n'),
        't' => Some(b'\t'),
        'r' => Some(b'\r'),
        'a' => Some(0x07),
        'b' => Some(0x08),
        'f' => Some(0x0C),
        'v' => Some(0x0B),
        '\\' => Some(b'\\'),
        '"' => Some(b'"'),
        '\'' => Some(b'\''),
        _ => None,
    };
    if let Some(byte) = simple {
        bytes.push(byte);
        lexer.bump();
        return Ok(());
    }

    match ch {
        '\n' | '\r' => {
            lexer.bump();
            // "\r\n" and "\n\r" are a single line break
            if let Some(next) = lexer.at() {
                if (next == '\n' || next == '\r') && next != ch {
                    lexer.bump();
                }
            }
            bytes.push(b'\n');
        }
        'x' => {
            lexer.bump();
            let mut value = 0u8;
            for _ in 0..2 {
                match lexer.at().and_then(|c| c.to_digit(16)) {
                    Some(digit) => {
                        value = value * 16 + digit as u8;
                        lexer.bump();
                    }
                    None => return Err(invalid_escape(lexer, escape_start)),
                }
            }
            bytes.push(value);
        }
        'z' => {
            lexer.bump();
            while matches!(lexer.at(), Some(c) if c.is_ascii_whitespace() || c == '\x0B') {
                lexer.bump();
            }
        }
        'u' => {
            lexer.bump();
            if lexer.at() != Some('{') {
                return Err(invalid_escape(lexer, escape_start));
            }
            lexer.bump();

            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(digit) = lexer.at().and_then(|c| c.to_digit(16)) {
                value = match value.checked_mul(16).and_then(|v| v.checked_add(digit)) {
                    Some(value) if value <= 0x7FFF_FFFF => value,
                    _ => return Err(invalid_escape(lexer, escape_start)),
                };
                digits += 1;
                lexer.bump();
            }

            if digits == 0 || lexer.at() != Some('}') {
                return Err(invalid_escape(lexer, escape_start));
            }
            lexer.bump();

            match char::from_u32(value) {
                Some(decoded) => {
                    let mut buffer = [0; 4];
                    bytes.extend_from_slice(decoded.encode_utf8(&mut buffer).as_bytes());
                }
                None => return Err(invalid_escape(lexer, escape_start)),
            }
        }
        c if c.is_ascii_digit() => {
            let mut value: u32 = 0;
            for _ in 0..3 {
                match lexer.at().and_then(|c| c.to_digit(10)) {
                    Some(digit) => {
                        value = value * 10 + digit;
                        lexer.bump();
                    }
                    None => break,
                }
            }
            if value > 255 {
                return Err(invalid_escape(lexer, escape_start));
            }
            bytes.push(value as u8);
        }
        _ => return Err(invalid_escape(lexer, escape_start)),
    }

    Ok(())
}

fn invalid_escape(lexer: &Lexer, escape_start: Position) -> Error {
    let mut sequence = lexer.source_since(escape_start).to_string();
    if let Some(ch) = lexer.at() {
        if !matches!(ch, '\n' | '\r') {
            sequence.push(ch);
        }
    }
    Error::new(ErrorImpl::InvalidEscape { sequence }, escape_start)
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let start = lexer.current_position();
    let len = match_len(lexer, regex);
    let value = lexer.remainder()[..len].to_string();
    lexer.advance_n(len);

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    Ok(Some(MK_TOKEN!(
        kind,
        value,
        Span {
            start,
            end: lexer.current_position()
        }
    )))
}

fn number_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<Option<Token>, Error> {
    let start = lexer.current_position();

    let mut exponent = ['e', 'E'];
    if lexer.at() == Some('0') && matches!(lexer.peek_char(1), Some('x') | Some('X')) {
        lexer.advance_n(2);
        exponent = ['p', 'P'];
    }

    // Read greedily like the reference lexer, then validate the whole numeral.
    loop {
        match lexer.at() {
            Some(c) if exponent.contains(&c) => {
                lexer.bump();
                if matches!(lexer.at(), Some('+') | Some('-')) {
                    lexer.bump();
                }
            }
            Some(c) if c.is_ascii_hexdigit() || c == '.' => {
                lexer.bump();
            }
            _ => break,
        }
    }
    while matches!(lexer.at(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
        lexer.bump();
    }

    let text = lexer.source_since(start).to_string();
    if !DECIMAL_NUMERAL.is_match(&text) && !HEX_NUMERAL.is_match(&text) {
        return Err(Error::new(ErrorImpl::MalformedNumber { token: text }, start));
    }

    Ok(Some(MK_TOKEN!(
        TokenKind::Number,
        text,
        Span {
            start,
            end: lexer.current_position()
        }
    )))
}

/// Converts the text of a numeral token to its value.
///
/// Decimal integers that do not fit in an `i64` become floats; hexadecimal
/// integers wrap around modulo 2^64.
pub fn convert_numeral(text: &str) -> Option<Numeral> {
    if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return convert_hex_numeral(digits);
    }

    if text.contains(['.', 'e', 'E']) {
        return text.parse::<f64>().ok().map(Numeral::Float);
    }

    match text.parse::<i64>() {
        Ok(value) => Some(Numeral::Integer(value)),
        Err(_) => text.parse::<f64>().ok().map(Numeral::Float),
    }
}

fn convert_hex_numeral(digits: &str) -> Option<Numeral> {
    let (mantissa, exponent) = match digits.find(['p', 'P']) {
        Some(index) => (&digits[..index], Some(&digits[index + 1..])),
        None => (digits, None),
    };
    let (integral, fraction) = match mantissa.find('.') {
        Some(index) => (&mantissa[..index], Some(&mantissa[index + 1..])),
        None => (mantissa, None),
    };

    if integral.is_empty() && fraction.map_or(true, str::is_empty) {
        return None;
    }

    if fraction.is_none() && exponent.is_none() {
        let mut value: u64 = 0;
        for c in integral.chars() {
            value = value.wrapping_mul(16).wrapping_add(c.to_digit(16)? as u64);
        }
        return Some(Numeral::Integer(value as i64));
    }

    let mut value = 0f64;
    let mut scale: i64 = 0;
    for c in integral.chars() {
        value = value * 16.0 + c.to_digit(16)? as f64;
    }
    for c in fraction.unwrap_or("").chars() {
        value = value * 16.0 + c.to_digit(16)? as f64;
        scale -= 4;
    }
    if let Some(exponent) = exponent {
        scale = scale.saturating_add(exponent.parse::<i64>().ok()?);
    }

    if value == 0.0 {
        return Some(Numeral::Float(0.0));
    }

    let scale = scale.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    Some(Numeral::Float(value * 2f64.powi(scale)))
}

pub fn tokenize(source: impl Into<String>) -> Result<Vec<Token>, Error> {
    Lexer::new(source).collect()
}
