//! The single error type shared by the lexer, parser, and serializer.

use core::fmt;

use thiserror::Error;

use crate::token::Position;

/// The closed set of failure modes across lexing, parsing, and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCharacter,
    UnterminatedString,
    UnterminatedComment,
    InvalidEscape,
    InvalidNumber,
    NumericOverflow,
    InvalidIdentifierEscape,
    UnexpectedToken,
    DuplicateKey,
    NestingTooDeep,
    TrailingInput,
    CyclicReference,
    UnrepresentableNumber,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidCharacter => "invalid character",
            ErrorKind::UnterminatedString => "unterminated string",
            ErrorKind::UnterminatedComment => "unterminated comment",
            ErrorKind::InvalidEscape => "invalid escape sequence",
            ErrorKind::InvalidNumber => "invalid number",
            ErrorKind::NumericOverflow => "numeric overflow",
            ErrorKind::InvalidIdentifierEscape => "invalid identifier escape",
            ErrorKind::UnexpectedToken => "unexpected token",
            ErrorKind::DuplicateKey => "duplicate key",
            ErrorKind::NestingTooDeep => "nesting too deep",
            ErrorKind::TrailingInput => "trailing input",
            ErrorKind::CyclicReference => "cyclic reference",
            ErrorKind::UnrepresentableNumber => "unrepresentable number",
        };
        f.write_str(s)
    }
}

/// A single diagnostic carrying its kind, a human-readable message, and the
/// 1-based source position it was first detected at.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} at {position}: {message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Position,
}

impl Error {
    /// Builds an error directly. Exposed beyond this crate so that adapters
    /// built on top of [`crate::Value`] (e.g. the `serde_json` bridge) can
    /// report failures through the same `Error` type rather than inventing
    /// their own, keeping a single error type across the whole surface.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
