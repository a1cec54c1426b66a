//! Error types for parsing and typed node access.

use thiserror::Error;

use crate::node::NodeKind;

/// The grammar rule that was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A fixed-width read ran past the end of input.
    UnexpectedEnd,
    UnterminatedString,
    /// Unknown escape character, or `\u` not followed by four hex digits.
    InvalidEscape,
    InvalidNumber,
    InvalidBoolean,
    ExpectedColon,
    UnterminatedObject,
    /// A comma in an array where a value was expected.
    UnexpectedComma,
    /// Two array values without a comma between them.
    ExpectedComma,
    UnterminatedArray,
    /// No value can start at this position.
    InvalidToken,
    /// Arrays/objects nested deeper than `ParseOptions::max_depth`.
    TooDeeplyNested,
    /// Content after the root value (only with `ParseOptions::reject_trailing`).
    TrailingCharacters,
}

impl ParseErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedEnd => "unexpected end of input",
            ParseErrorKind::UnterminatedString => "unterminated string",
            ParseErrorKind::InvalidEscape => "invalid escape sequence",
            ParseErrorKind::InvalidNumber => "invalid number",
            ParseErrorKind::InvalidBoolean => "invalid boolean",
            ParseErrorKind::ExpectedColon => "expected colon",
            ParseErrorKind::UnterminatedObject => "unterminated object",
            ParseErrorKind::UnexpectedComma => "unexpected comma in array",
            ParseErrorKind::ExpectedComma => "expected comma",
            ParseErrorKind::UnterminatedArray => "unterminated array",
            ParseErrorKind::InvalidToken => "invalid token",
            ParseErrorKind::TooDeeplyNested => "too deeply nested",
            ParseErrorKind::TrailingCharacters => "trailing characters after value",
        }
    }
}

/// A grammar violation, with the byte offset where it was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("JSON parse error at offset {offset}: {}", .kind.message())]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        ParseError { kind, offset }
    }

    /// 1-based line and column of the error within `input`.
    ///
    /// Columns count characters, not bytes. Offsets past the end of
    /// `input` are clamped to its length.
    pub fn line_col(&self, input: &str) -> (usize, usize) {
        let mut end = self.offset.min(input.len());
        while !input.is_char_boundary(end) {
            end -= 1;
        }
        let before = &input[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

/// A typed accessor was called on a node of a different kind.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("type mismatch: expected {expected}, found {found}")]
pub struct TypeMismatchError {
    pub expected: NodeKind,
    pub found: NodeKind,
}

/// Any failure while turning text into a typed record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),
}

/// Convenience alias used by the record decoders.
pub type Result<T> = std::result::Result<T, Error>;
