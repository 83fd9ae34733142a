//! Plain-text vCard serialization.

use super::error::{WriteError, WriteResult};
use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use super::{Selected, WriterOptions, product_id_property, select_properties};
use crate::rfc::vcard::core::{VCard, VCardParameters, VCardProperty, VCardVersion};
use crate::rfc::vcard::transcode::{DynTranscoder, TranscodeError};

/// Serializes cards as plain text in `version`, regardless of the version
/// each card carries.
///
/// Lines end in CRLF and are folded at 75 octets.
///
/// ## Errors
/// [`WriteError::NoTranscoder`] if a property type has no transcoder;
/// [`WriteError::Transcode`] if a transcoder fails other than by skipping.
#[tracing::instrument(skip(cards, options), fields(count = cards.len()))]
pub fn serialize(cards: &[VCard], version: VCardVersion, options: &WriterOptions) -> WriteResult<String> {
    let mut out = String::new();
    for card in cards {
        write_card(card, version, options, options.add_prodid, &mut out)?;
    }
    Ok(out)
}

/// Serializes one card. See [`serialize`].
///
/// ## Errors
/// Same as [`serialize`].
pub fn serialize_card(card: &VCard, version: VCardVersion, options: &WriterOptions) -> WriteResult<String> {
    serialize(std::slice::from_ref(card), version, options)
}

fn write_card(
    card: &VCard,
    version: VCardVersion,
    options: &WriterOptions,
    add_prodid: bool,
    out: &mut String,
) -> WriteResult<()> {
    let selected = select_properties(card, version, options)?;

    let mut body = String::new();
    fold_line("BEGIN:VCARD", &mut body);
    fold_line(&format!("VERSION:{version}"), &mut body);

    for Selected {
        property,
        transcoder,
    } in &selected
    {
        write_property(property, transcoder.as_ref(), card, version, options, &mut body)?;
    }

    if add_prodid {
        let prodid = product_id_property(version);
        let transcoder =
            options
                .registry
                .for_property(&prodid)
                .ok_or_else(|| WriteError::NoTranscoder {
                    type_name: prodid.value_type_name(),
                })?;
        write_property(&prodid, transcoder.as_ref(), card, version, options, &mut body)?;
    }

    fold_line("END:VCARD", &mut body);
    out.push_str(&body);
    Ok(())
}

fn write_property(
    property: &VCardProperty,
    transcoder: &dyn DynTranscoder,
    card: &VCard,
    version: VCardVersion,
    options: &WriterOptions,
    out: &mut String,
) -> WriteResult<()> {
    let name = transcoder.wire_name_of(property)?;

    let value = match transcoder.encode_text(property, version) {
        Ok(value) => value,
        Err(TranscodeError::SkipMe(reason)) => {
            tracing::debug!(property = name, reason = %reason, "Property skipped");
            return Ok(());
        }
        Err(TranscodeError::EmbeddedVCard(nested)) => {
            return write_embedded(property, transcoder, &nested, card, version, options, out);
        }
        Err(e) => return Err(e.into()),
    };

    let parameters = transcoder.parameters_for(property, version, card)?;
    let mut line = property_head(property.group.as_deref(), name, &parameters, version);
    line.push(':');
    line.push_str(&value);
    fold_line(&line, out);
    Ok(())
}

/// Writes a property whose value is a nested card. 2.1 puts the card on the
/// lines after an empty property, 3.0 escapes it into the value, and 4.0
/// cannot hold it at all.
fn write_embedded(
    property: &VCardProperty,
    transcoder: &dyn DynTranscoder,
    nested: &VCard,
    card: &VCard,
    version: VCardVersion,
    options: &WriterOptions,
    out: &mut String,
) -> WriteResult<()> {
    let name = transcoder.wire_name_of(property)?;
    if version == VCardVersion::V4_0 {
        tracing::debug!(property = name, "Embedded vCard cannot be written in 4.0");
        return Ok(());
    }

    let parameters = transcoder.parameters_for(property, version, card)?;
    let mut line = property_head(property.group.as_deref(), name, &parameters, version);
    line.push(':');

    let mut nested_text = String::new();
    write_card(nested, version, options, false, &mut nested_text)?;

    if version == VCardVersion::V2_1 {
        fold_line(&line, out);
        out.push_str(&nested_text);
    } else {
        line.push_str(&escape_text(&nested_text, version));
        fold_line(&line, out);
    }
    Ok(())
}

/// `[group.]NAME[;PARAM=value...]`, without the colon.
fn property_head(group: Option<&str>, name: &str, parameters: &VCardParameters, version: VCardVersion) -> String {
    let mut head = String::new();
    if let Some(group) = group {
        head.push_str(group);
        head.push('.');
    }
    head.push_str(name);

    for parameter in parameters.iter() {
        if version == VCardVersion::V2_1 {
            // No value lists in 2.1: repeat the parameter instead.
            for value in &parameter.values {
                head.push(';');
                head.push_str(&parameter.name);
                head.push('=');
                push_param_value(&mut head, value, version);
            }
        } else {
            head.push(';');
            head.push_str(&parameter.name);
            head.push('=');
            for (i, value) in parameter.values.iter().enumerate() {
                if i > 0 {
                    head.push(',');
                }
                push_param_value(&mut head, value, version);
            }
        }
    }

    head
}

fn push_param_value(out: &mut String, value: &str, version: VCardVersion) {
    let (escaped, needs_quotes) = escape_param_value(value, version);
    if needs_quotes {
        out.push('"');
        out.push_str(&escaped);
        out.push('"');
    } else {
        out.push_str(&escaped);
    }
}
