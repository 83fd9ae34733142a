//! Writer errors.

use crate::rfc::vcard::transcode::TranscodeError;

/// Result type for vCard writers.
pub type WriteResult<T> = Result<T, WriteError>;

/// An error that stopped a write.
///
/// Per-property conditions (skipped or embedded values) never show up here.
/// Writers omit those properties and carry on.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// A property's value type has no registered transcoder. This is a setup
    /// mistake, so nothing of the document is written.
    #[error("no transcoder registered for property type {type_name}")]
    NoTranscoder { type_name: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(String),

    /// A transcoder failed in a way writers do not recover from.
    #[error("transcode error: {0}")]
    Transcode(#[from] TranscodeError),

    /// The writer was already closed.
    #[error("writer is closed")]
    Closed,
}

impl From<quick_xml::Error> for WriteError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}
