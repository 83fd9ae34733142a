//! vCard value data types (the VALUE parameter).

use std::fmt;

use super::version::{ALL_VERSIONS, VCardVersion};

/// The wire-level type of a property value.
///
/// Resolves ambiguity for properties whose value can take more than one
/// shape (a TZ may be text or a UTC offset, a PHOTO may be a URI or inline
/// binary). Written as the VALUE parameter in the text dialect, as the
/// datatype slot in jCard and as the child element name in xCard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VCardDataType {
    Text,
    Uri,
    /// vCard 2.1 spelling of a remote reference.
    Url,
    /// vCard 2.1 reference to a MIME body part.
    ContentId,
    /// vCard 3.0 inline binary.
    Binary,
    Date,
    Time,
    DateTime,
    DateAndOrTime,
    Timestamp,
    Boolean,
    Integer,
    Float,
    UtcOffset,
    LanguageTag,
    /// Extension or unrecognized data type, stored lowercased.
    Other(String),
}

impl VCardDataType {
    /// Looks up a data type by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "uri" => Self::Uri,
            "url" => Self::Url,
            "content-id" | "cid" => Self::ContentId,
            "binary" => Self::Binary,
            "date" => Self::Date,
            "time" => Self::Time,
            "date-time" => Self::DateTime,
            "date-and-or-time" => Self::DateAndOrTime,
            "timestamp" => Self::Timestamp,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "utc-offset" => Self::UtcOffset,
            "language-tag" => Self::LanguageTag,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Uri => "uri",
            Self::Url => "url",
            Self::ContentId => "content-id",
            Self::Binary => "binary",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date-time",
            Self::DateAndOrTime => "date-and-or-time",
            Self::Timestamp => "timestamp",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::UtcOffset => "utc-offset",
            Self::LanguageTag => "language-tag",
            Self::Other(s) => s,
        }
    }

    /// Versions in which this data type may appear in a VALUE parameter.
    #[must_use]
    pub fn supported_versions(&self) -> &'static [VCardVersion] {
        use VCardVersion::{V2_1, V3_0, V4_0};
        match self {
            Self::Url | Self::ContentId => &[V2_1],
            Self::Binary => &[V3_0],
            Self::Uri | Self::Date | Self::Time | Self::DateTime | Self::Boolean | Self::Integer
            | Self::Float => &[V3_0, V4_0],
            Self::DateAndOrTime | Self::Timestamp | Self::LanguageTag => &[V4_0],
            Self::Text | Self::UtcOffset | Self::Other(_) => ALL_VERSIONS,
        }
    }

    /// Whether this data type names a remote reference (URI or 2.1 URL).
    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Uri | Self::Url)
    }
}

impl fmt::Display for VCardDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
