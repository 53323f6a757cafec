use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A lexical, syntax or nesting error, located at the offending position.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{position}: {internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// Coarse classification of [`Error`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A malformed token.
    Lexical,
    /// A token stream that does not match the grammar.
    Syntax,
    /// Nesting deeper than the configured limit.
    RecursionLimit,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedLongBracket { .. }
            | ErrorImpl::InvalidLongDelimiter
            | ErrorImpl::InvalidEscape { .. }
            | ErrorImpl::MalformedNumber { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedSymbol { .. }
            | ErrorImpl::InvalidAssignmentTarget { .. }
            | ErrorImpl::InvalidStatement { .. }
            | ErrorImpl::ReturnNotLast { .. } => ErrorKind::Syntax,
            ErrorImpl::RecursionLimit { .. } => ErrorKind::RecursionLimit,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedLongBracket { .. } => "UnterminatedLongBracket",
            ErrorImpl::InvalidLongDelimiter => "InvalidLongDelimiter",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedSymbol { .. } => "UnexpectedSymbol",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::InvalidStatement { .. } => "InvalidStatement",
            ErrorImpl::ReturnNotLast { .. } => "ReturnNotLast",
            ErrorImpl::RecursionLimit { .. } => "RecursionLimit",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Short strings must close on the line they open"))
            }
            ErrorImpl::UnterminatedLongBracket { what, level } => ErrorTip::Suggestion(format!(
                "Unfinished long {}, expected closing `]{}]`",
                what,
                "=".repeat(*level)
            )),
            ErrorImpl::InvalidLongDelimiter => ErrorTip::Suggestion(String::from(
                "Long brackets are written `[[`, `[=[`, `[==[`, ...",
            )),
            ErrorImpl::InvalidEscape { sequence } => {
                ErrorTip::Suggestion(format!("Invalid escape sequence `{}`", sequence))
            }
            ErrorImpl::MalformedNumber { token } => {
                ErrorTip::Suggestion(format!("Malformed number near `{}`", token))
            }
            ErrorImpl::UnexpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("{} expected near {}", expected, found))
            }
            ErrorImpl::UnexpectedSymbol { found } => {
                ErrorTip::Suggestion(format!("Unexpected symbol near {}", found))
            }
            ErrorImpl::InvalidAssignmentTarget { found } => ErrorTip::Suggestion(format!(
                "Cannot assign to {}, only names and indexed values are assignable",
                found
            )),
            ErrorImpl::InvalidStatement { found } => ErrorTip::Suggestion(format!(
                "Syntax error near {}, expressions must be calls to be used as statements",
                found
            )),
            ErrorImpl::ReturnNotLast { found } => ErrorTip::Suggestion(format!(
                "'return' must be the last statement of its block, found {}",
                found
            )),
            ErrorImpl::RecursionLimit { limit } => ErrorTip::Suggestion(format!(
                "Nesting exceeds the limit of {} levels",
                limit
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unfinished string")]
    UnterminatedString,
    #[error("unfinished long {what}")]
    UnterminatedLongBracket { what: &'static str, level: usize },
    #[error("invalid long string delimiter")]
    InvalidLongDelimiter,
    #[error("invalid escape sequence {sequence:?}")]
    InvalidEscape { sequence: String },
    #[error("malformed number near {token:?}")]
    MalformedNumber { token: String },
    #[error("{expected} expected near {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unexpected symbol near {found}")]
    UnexpectedSymbol { found: String },
    #[error("cannot assign to {found}")]
    InvalidAssignmentTarget { found: String },
    #[error("syntax error near {found}")]
    InvalidStatement { found: String },
    #[error("'<eof>' or block end expected after 'return', found {found}")]
    ReturnNotLast { found: String },
    #[error("nesting exceeds {limit} levels")]
    RecursionLimit { limit: usize },
}
