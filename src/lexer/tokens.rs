use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("and", TokenKind::And);
        map.insert("break", TokenKind::Break);
        map.insert("do", TokenKind::Do);
        map.insert("else", TokenKind::Else);
        map.insert("elseif", TokenKind::Elseif);
        map.insert("end", TokenKind::End);
        map.insert("false", TokenKind::False);
        map.insert("for", TokenKind::For);
        map.insert("function", TokenKind::Function);
        map.insert("goto", TokenKind::Goto);
        map.insert("if", TokenKind::If);
        map.insert("in", TokenKind::In);
        map.insert("local", TokenKind::Local);
        map.insert("nil", TokenKind::Nil);
        map.insert("not", TokenKind::Not);
        map.insert("or", TokenKind::Or);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("return", TokenKind::Return);
        map.insert("then", TokenKind::Then);
        map.insert("true", TokenKind::True);
        map.insert("until", TokenKind::Until);
        map.insert("while", TokenKind::While);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,
    Comment,
    LongComment,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // ~=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    DotDot,
    Ellipsis,
    Semicolon,
    Colon,
    ColonColon,
    Comma,

    Plus,
    Dash,
    Slash,
    DoubleSlash,
    Star,
    Percent,
    Caret,
    Hash,

    Ampersand,
    Pipe,
    Tilde,
    ShiftLeft,
    ShiftRight,

    // Reserved
    And,
    Break,
    Do,
    Else,
    Elseif,
    End,
    False,
    For,
    Function,
    Goto,
    If,
    In,
    Local,
    Nil,
    Not,
    Or,
    Repeat,
    Return,
    Then,
    True,
    Until,
    While,
}

impl TokenKind {
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::LongComment)
    }

    /// The source text of fixed tokens, `None` for tokens carrying a value.
    pub fn symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            TokenKind::EOF
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Identifier
            | TokenKind::Comment
            | TokenKind::LongComment => return None,
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "~=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::Ellipsis => "...",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::ColonColon => "::",
            TokenKind::Comma => ",",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::DoubleSlash => "//",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Hash => "#",
            TokenKind::Ampersand => "&",
            TokenKind::Pipe => "|",
            TokenKind::Tilde => "~",
            TokenKind::ShiftLeft => "<<",
            TokenKind::ShiftRight => ">>",
            TokenKind::And => "and",
            TokenKind::Break => "break",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Elseif => "elseif",
            TokenKind::End => "end",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::Goto => "goto",
            TokenKind::If => "if",
            TokenKind::In => "in",
            TokenKind::Local => "local",
            TokenKind::Nil => "nil",
            TokenKind::Not => "not",
            TokenKind::Or => "or",
            TokenKind::Repeat => "repeat",
            TokenKind::Return => "return",
            TokenKind::Then => "then",
            TokenKind::True => "true",
            TokenKind::Until => "until",
            TokenKind::While => "while",
        };
        Some(symbol)
    }

    /// How the kind is named in "expected" diagnostics.
    pub fn describe(&self) -> String {
        match self.symbol() {
            Some(symbol) => format!("'{}'", symbol),
            None => match self {
                TokenKind::EOF => String::from("<eof>"),
                TokenKind::Number => String::from("<number>"),
                TokenKind::String => String::from("<string>"),
                TokenKind::Identifier => String::from("<name>"),
                _ => String::from("<comment>"),
            },
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    /// How the token is named in "near ..." diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number => format!("'{}'", self.value),
            TokenKind::String => format!("'{}'", self.value.escape_default()),
            _ => self.kind.describe(),
        }
    }
}
