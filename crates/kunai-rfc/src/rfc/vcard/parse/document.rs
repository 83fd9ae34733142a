//! Reader options and results shared by every dialect reader.

use kunai_core::config::ReaderConfig;
use kunai_core::types::CompatibilityMode;

use crate::rfc::vcard::core::VCard;
use crate::rfc::vcard::transcode::{TranscodeError, Transcoder, TranscoderRegistry};

/// How a reader decodes properties.
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// Transcoders to decode with; unknown names become raw properties.
    pub registry: TranscoderRegistry,
    pub compatibility: CompatibilityMode,
}

impl ReaderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transcoder on this reader's registry.
    #[must_use]
    pub fn with_transcoder<T: Transcoder>(mut self, transcoder: T) -> Self {
        self.registry.register(transcoder);
        self
    }

    #[must_use]
    pub const fn with_compatibility(mut self, compatibility: CompatibilityMode) -> Self {
        self.compatibility = compatibility;
        self
    }
}

impl From<&ReaderConfig> for ReaderOptions {
    fn from(config: &ReaderConfig) -> Self {
        Self {
            registry: TranscoderRegistry::new(),
            compatibility: config.compatibility_mode,
        }
    }
}

/// One decoded card and the problems noticed while reading it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedDocument {
    pub vcard: VCard,
    /// One entry per dropped or questionable property, in input order.
    pub warnings: Vec<String>,
}

/// Formats a warning about one property, with its line when known.
pub(crate) fn property_warning(line: Option<usize>, name: &str, message: &str) -> String {
    match line {
        Some(line) => format!("line {line} ({name} property): {message}"),
        None => format!("{name} property: {message}"),
    }
}

/// Records why a property was left out of the decoded card.
pub(crate) fn report_dropped(
    warnings: &mut Vec<String>,
    line: Option<usize>,
    name: &str,
    error: &TranscodeError,
) {
    match error {
        TranscodeError::SkipMe(reason) => {
            tracing::debug!(property = name, reason = %reason, "Property skipped");
        }
        e => {
            tracing::warn!(property = name, line = ?line, error = %e, "Property could not be decoded");
            warnings.push(property_warning(line, name, &e.to_string()));
        }
    }
}
