//! vCard writers.
//!
//! - Escape: text and parameter value escaping
//! - Fold: content line folding at 75 octets
//! - Serializer: plain-text documents for any version
//! - jCard: streaming JSON writer
//! - xCard: XML documents
//!
//! Every writer resolves a transcoder for each property before emitting
//! anything. A property type with no registered transcoder fails the whole
//! write with [`WriteError::NoTranscoder`].

mod error;
pub mod escape;
mod fold;
mod jcard;
mod serializer;
mod xcard;

use std::sync::Arc;

use kunai_core::config::WriterConfig;
use kunai_core::constants::PRODUCT_ID;
use kunai_core::error::{CoreError, CoreResult};

pub use error::{WriteError, WriteResult};
pub use escape::{escape_param_value, escape_text};
pub use fold::fold_line;
pub use jcard::JCardWriter;
pub use serializer::{serialize, serialize_card};
pub use xcard::write_xcard;

use crate::rfc::vcard::core::{VCard, VCardProperty, VCardVersion};
use crate::rfc::vcard::property::{ProductId, RawProperty};
use crate::rfc::vcard::transcode::{DynTranscoder, Transcoder, TranscoderRegistry};

/// What every writer needs besides its output.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Transcoders to encode with.
    pub registry: TranscoderRegistry,
    /// Append a PRODID naming this library, replacing any in the card.
    pub add_prodid: bool,
    /// Drop properties that do not support the target version.
    pub version_strict: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            registry: TranscoderRegistry::new(),
            add_prodid: true,
            version_strict: true,
        }
    }
}

impl WriterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transcoder on this writer's registry.
    #[must_use]
    pub fn with_transcoder<T: Transcoder>(mut self, transcoder: T) -> Self {
        self.registry.register(transcoder);
        self
    }

    #[must_use]
    pub const fn with_add_prodid(mut self, add_prodid: bool) -> Self {
        self.add_prodid = add_prodid;
        self
    }

    #[must_use]
    pub const fn with_version_strict(mut self, version_strict: bool) -> Self {
        self.version_strict = version_strict;
        self
    }
}

impl From<&WriterConfig> for WriterOptions {
    fn from(config: &WriterConfig) -> Self {
        Self {
            registry: TranscoderRegistry::new(),
            add_prodid: config.add_prodid,
            version_strict: config.version_strict,
        }
    }
}

/// The configured plain-text target version.
///
/// ## Errors
/// Returns [`CoreError::InvalidInput`] if `target_version` is not "2.1",
/// "3.0" or "4.0".
pub fn target_version(config: &WriterConfig) -> CoreResult<VCardVersion> {
    VCardVersion::from_version_str(&config.target_version).ok_or_else(|| {
        CoreError::InvalidInput(format!(
            "unsupported target version: {}",
            config.target_version
        ))
    })
}

/// A property paired with the transcoder that writes it.
pub(crate) struct Selected<'a> {
    pub property: &'a VCardProperty,
    pub transcoder: Arc<dyn DynTranscoder>,
}

/// Resolves a transcoder for every property of `card` and drops the ones
/// that should not be written for `version`.
///
/// ## Errors
/// Returns [`WriteError::NoTranscoder`] for the first property whose type has
/// no transcoder, before anything has been written.
pub(crate) fn select_properties<'a>(
    card: &'a VCard,
    version: VCardVersion,
    options: &WriterOptions,
) -> WriteResult<Vec<Selected<'a>>> {
    let mut selected = Vec::with_capacity(card.properties.len());

    for property in &card.properties {
        let transcoder =
            options
                .registry
                .for_property(property)
                .ok_or_else(|| WriteError::NoTranscoder {
                    type_name: property.value_type_name(),
                })?;

        if options.add_prodid && property.is::<ProductId>() {
            tracing::trace!("Dropping PRODID in favour of the generated one");
            continue;
        }

        if options.version_strict {
            let versions = transcoder.versions_of(property)?;
            if !versions.contains(&version) {
                tracing::trace!(
                    property = transcoder.name(),
                    version = %version,
                    "Property not supported in target version"
                );
                continue;
            }
        }

        selected.push(Selected {
            property,
            transcoder,
        });
    }

    Ok(selected)
}

/// The generated PRODID for `version`. 2.1 has no PRODID, so the extended
/// X-PRODID is used there.
pub(crate) fn product_id_property(version: VCardVersion) -> VCardProperty {
    match version {
        VCardVersion::V2_1 => VCardProperty::new(RawProperty::new("X-PRODID", PRODUCT_ID)),
        VCardVersion::V3_0 | VCardVersion::V4_0 => VCardProperty::new(ProductId::new(PRODUCT_ID)),
    }
}
