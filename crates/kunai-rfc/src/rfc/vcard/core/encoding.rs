//! The ENCODING parameter.

use std::fmt;

use super::version::VCardVersion;

/// Value of the ENCODING parameter.
///
/// Only vCard 2.1 and 3.0 define ENCODING; 4.0 carries binary data in
/// `data:` URIs instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Encoding {
    QuotedPrintable,
    /// vCard 2.1 spelling of base64.
    Base64,
    EightBit,
    SevenBit,
    /// vCard 3.0 spelling of base64.
    B,
    Other(String),
}

impl Encoding {
    /// Looks up an encoding by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "QUOTED-PRINTABLE" => Self::QuotedPrintable,
            "BASE64" => Self::Base64,
            "8BIT" => Self::EightBit,
            "7BIT" => Self::SevenBit,
            "B" => Self::B,
            other => Self::Other(other.to_string()),
        }
    }

    /// Looks up an encoding only if the name is one of the well-known values.
    #[must_use]
    pub fn known(name: &str) -> Option<Self> {
        match Self::from_name(name) {
            Self::Other(_) => None,
            known => Some(known),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::QuotedPrintable => "QUOTED-PRINTABLE",
            Self::Base64 => "BASE64",
            Self::EightBit => "8BIT",
            Self::SevenBit => "7BIT",
            Self::B => "B",
            Self::Other(s) => s,
        }
    }

    /// The base64 spelling for a version, if it has one.
    #[must_use]
    pub const fn base64_for(version: VCardVersion) -> Option<Self> {
        match version {
            VCardVersion::V2_1 => Some(Self::Base64),
            VCardVersion::V3_0 => Some(Self::B),
            VCardVersion::V4_0 => None,
        }
    }

    /// Whether this names base64 in either spelling.
    #[must_use]
    pub const fn is_base64(&self) -> bool {
        matches!(self, Self::Base64 | Self::B)
    }

    /// Versions in which this value is legal.
    #[must_use]
    pub fn supported_versions(&self) -> &'static [VCardVersion] {
        match self {
            Self::QuotedPrintable | Self::Base64 | Self::EightBit | Self::SevenBit => {
                &[VCardVersion::V2_1]
            }
            Self::B => &[VCardVersion::V3_0],
            Self::Other(_) => &[VCardVersion::V2_1, VCardVersion::V3_0],
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
