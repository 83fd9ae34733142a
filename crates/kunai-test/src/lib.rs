//! Kunai vCard library - integration test support.
//!
//! Shortcuts for writing a card in one dialect and looking at the result,
//! so integration tests can state what they check instead of how to drive
//! the writers.

use anyhow::{Context, Result};
use kunai_rfc::rfc::vcard::build::{JCardWriter, WriterOptions, serialize_card};
use kunai_rfc::rfc::vcard::core::{VCard, VCardProperty, VCardVersion};

pub use kunai_core as core;
pub use kunai_rfc as rfc;

/// Writer options without the generated PRODID, so output only holds what
/// the test put in.
#[must_use]
pub fn bare_writer() -> WriterOptions {
    WriterOptions::new().with_add_prodid(false)
}

/// A card holding one property.
#[must_use]
pub fn card_with(property: VCardProperty) -> VCard {
    let mut card = VCard::new();
    card.add_property(property);
    card
}

/// Writes `card` as plain text and returns its unfolded content lines,
/// without BEGIN, VERSION and END.
///
/// ## Errors
/// Returns an error if the card cannot be written.
pub fn text_lines(card: &VCard, version: VCardVersion, options: &WriterOptions) -> Result<Vec<String>> {
    let text = serialize_card(card, version, options).context("serializing card")?;
    Ok(text
        .replace("\r\n ", "")
        .split("\r\n")
        .filter(|line| {
            !line.is_empty()
                && !line.starts_with("BEGIN:")
                && !line.starts_with("END:")
                && !line.starts_with("VERSION:")
        })
        .map(str::to_string)
        .collect())
}

/// Writes `cards` through a [`JCardWriter`] and parses the output back
/// into JSON.
///
/// ## Errors
/// Returns an error if writing fails or the output is not JSON.
pub fn jcard_json(cards: &[VCard], options: WriterOptions, wrap_in_array: bool) -> Result<serde_json::Value> {
    let mut out = Vec::new();
    {
        let mut writer = JCardWriter::with_options(&mut out, options);
        writer.set_wrap_in_array(wrap_in_array);
        for card in cards {
            writer.write(card).context("writing jCard")?;
        }
        writer.close().context("closing jCard writer")?;
    }
    serde_json::from_slice(&out).context("jCard output is not JSON")
}

/// The property arrays of one jCard, `version` included.
///
/// ## Errors
/// Returns an error if `jcard` is not a `["vcard", [...]]` array.
pub fn jcard_properties(jcard: &serde_json::Value) -> Result<&[serde_json::Value]> {
    jcard
        .get(1)
        .and_then(serde_json::Value::as_array)
        .map(Vec::as_slice)
        .context("not a jCard")
}

/// Property names of one jCard, in order.
///
/// ## Errors
/// Same as [`jcard_properties`].
pub fn jcard_property_names(jcard: &serde_json::Value) -> Result<Vec<String>> {
    Ok(jcard_properties(jcard)?
        .iter()
        .filter_map(|p| p.get(0).and_then(serde_json::Value::as_str))
        .map(str::to_string)
        .collect())
}
