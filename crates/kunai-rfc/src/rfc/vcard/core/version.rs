//! vCard protocol versions.

use std::fmt;

/// vCard version.
///
/// Ordered oldest to newest, so `V2_1 < V3_0 < V4_0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VCardVersion {
    /// vCard 2.1 (versit consortium).
    V2_1,
    /// vCard 3.0 (RFC 2426).
    V3_0,
    /// vCard 4.0 (RFC 6350).
    #[default]
    V4_0,
}

/// Every version, oldest first.
pub const ALL_VERSIONS: &[VCardVersion] =
    &[VCardVersion::V2_1, VCardVersion::V3_0, VCardVersion::V4_0];

impl VCardVersion {
    /// Parses from version string.
    #[must_use]
    pub fn from_version_str(s: &str) -> Option<Self> {
        match s.trim() {
            "2.1" => Some(Self::V2_1),
            "3.0" => Some(Self::V3_0),
            "4.0" => Some(Self::V4_0),
            _ => None,
        }
    }

    /// Returns the version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2_1 => "2.1",
            Self::V3_0 => "3.0",
            Self::V4_0 => "4.0",
        }
    }

    /// Returns the xCard namespace, which only exists for 4.0.
    #[must_use]
    pub const fn xml_namespace(self) -> Option<&'static str> {
        match self {
            Self::V4_0 => Some("urn:ietf:params:xml:ns:vcard-4.0"),
            Self::V2_1 | Self::V3_0 => None,
        }
    }
}

impl core::str::FromStr for VCardVersion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_version_str(s).ok_or(())
    }
}

impl fmt::Display for VCardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_ordered() {
        assert!(VCardVersion::V2_1 < VCardVersion::V3_0);
        assert!(VCardVersion::V3_0 < VCardVersion::V4_0);
    }

    #[test]
    fn version_round_trips_through_str() {
        for version in ALL_VERSIONS {
            assert_eq!(VCardVersion::from_version_str(version.as_str()), Some(*version));
        }
        assert_eq!(VCardVersion::from_version_str("5.0"), None);
    }
}
