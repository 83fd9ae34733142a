//! Document-level decode errors.
//!
//! Problems with a single property never end up here; readers turn them into
//! warnings. A [`ParseError`] means the document itself could not be read.

use std::fmt;

/// Result type for vCard reader operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that stopped a document from being read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based; 0 when unknown).
    pub line: usize,
    pub message: String,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates an unexpected token error.
    #[must_use]
    pub fn unexpected(line: usize, expected: &str, found: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken,
            line,
            format!("expected {expected}, found {found}"),
        )
    }

    #[must_use]
    pub fn json(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidJson, 0, message)
    }

    #[must_use]
    pub fn xml(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidXml, 0, message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ParseErrorKind::InvalidJson, e.line(), e.to_string())
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(e: quick_xml::Error) -> Self {
        Self::xml(e.to_string())
    }
}

impl From<std::str::Utf8Error> for ParseError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::xml(e.to_string())
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unexpected end of input.
    UnexpectedEof,
    /// Unexpected token or character.
    UnexpectedToken,
    /// BEGIN:VCARD expected.
    MissingBegin,
    /// END:VCARD never arrived.
    MissingEnd,
    /// Invalid property name.
    InvalidPropertyName,
    /// Invalid parameter.
    InvalidParameter,
    /// Unsupported vCard version.
    UnsupportedVersion,
    /// Malformed jCard.
    InvalidJson,
    /// Malformed xCard or HTML.
    InvalidXml,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::UnexpectedToken => write!(f, "unexpected token"),
            Self::MissingBegin => write!(f, "missing BEGIN"),
            Self::MissingEnd => write!(f, "missing END"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::UnsupportedVersion => write!(f, "unsupported version"),
            Self::InvalidJson => write!(f, "invalid jCard"),
            Self::InvalidXml => write!(f, "invalid markup"),
        }
    }
}
