use serde::Deserialize;

/// Leniency profile applied while decoding vCards.
///
/// Some producers bend the grammar in known ways; the non-RFC modes let
/// decoders tolerate those quirks instead of rejecting the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityMode {
    /// Follow the RFCs strictly.
    #[default]
    Rfc,
    /// Microsoft Outlook output (folds base64 payloads with whitespace).
    Outlook,
    /// Apple Address Book output (folds base64 payloads with whitespace).
    MacAddressBook,
}

impl CompatibilityMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rfc => "rfc",
            Self::Outlook => "outlook",
            Self::MacAddressBook => "mac_address_book",
        }
    }

    /// Whether whitespace embedded in base64 payloads should be dropped
    /// before decoding.
    #[must_use]
    pub const fn strips_base64_whitespace(self) -> bool {
        !matches!(self, Self::Rfc)
    }
}

impl std::fmt::Display for CompatibilityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
