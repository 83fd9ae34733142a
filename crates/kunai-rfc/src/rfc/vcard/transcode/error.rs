//! Per-property transcoding conditions.

use crate::rfc::vcard::core::VCard;

/// Result type for a single property's encode or decode.
pub type TranscodeResult<T> = Result<T, TranscodeError>;

/// Conditions raised while encoding or decoding one property.
///
/// None of these abort a whole document. Readers turn the cannot-parse
/// family into a warning and drop the property; writers omit properties that
/// raise [`TranscodeError::SkipMe`] or [`TranscodeError::EmbeddedVCard`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranscodeError {
    /// The value does not follow the grammar the version requires.
    #[error("cannot parse value: {0}")]
    CannotParse(String),

    /// An xCard property element had none of the expected value children.
    #[error("missing XML elements: {}", expected.join(", "))]
    MissingXmlElements { expected: Vec<String> },

    /// The property asked to be left out of the output.
    #[error("property skipped: {0}")]
    SkipMe(String),

    /// The value is a nested card that the target dialect must handle itself.
    #[error("property value is an embedded vCard")]
    EmbeddedVCard(Box<VCard>),

    /// Decode side: the value is the text of a nested card for the reader to
    /// parse. Empty when the card follows on the next lines (vCard 2.1).
    #[error("property value is embedded vCard text")]
    EmbeddedVCardText(String),

    /// An erased property was handed to a transcoder for another type.
    #[error("transcoder for {expected} received a {found} value")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl TranscodeError {
    /// Shorthand for [`TranscodeError::CannotParse`].
    #[must_use]
    pub fn cannot_parse(message: impl Into<String>) -> Self {
        Self::CannotParse(message.into())
    }

    /// Shorthand for [`TranscodeError::MissingXmlElements`].
    #[must_use]
    pub fn missing_xml_elements(expected: &[&str]) -> Self {
        Self::MissingXmlElements {
            expected: expected.iter().map(ToString::to_string).collect(),
        }
    }

    /// Whether this is one of the grammar failures readers turn into warnings.
    #[must_use]
    pub const fn is_cannot_parse(&self) -> bool {
        matches!(self, Self::CannotParse(_) | Self::MissingXmlElements { .. })
    }
}
