//! Streaming jCard (RFC 7095) writer.

use std::io::Write;

use kunai_core::config::WriterConfig;
use serde_json::{Map, Value, json};

use super::error::{WriteError, WriteResult};
use super::{Selected, WriterOptions, product_id_property, select_properties};
use crate::rfc::vcard::core::{VCard, VCardDataType, VCardProperty, VCardVersion, names};
use crate::rfc::vcard::transcode::{DynTranscoder, TranscodeError, Transcoder};

/// jCard is always version 4.0.
const VERSION: VCardVersion = VCardVersion::V4_0;

/// Writes cards as jCard to an output stream.
///
/// Each [`JCardWriter::write`] call emits one complete `["vcard", [...]]`
/// array or nothing at all: the card is built in memory first, so a failed
/// write leaves the stream as it was. With `wrap_in_array` set, the cards
/// are enclosed in an outer array that [`JCardWriter::close`] terminates.
/// Dropping the writer closes it.
///
/// ```rust
/// use kunai_rfc::rfc::vcard::build::JCardWriter;
/// use kunai_rfc::rfc::vcard::core::VCard;
/// use kunai_rfc::rfc::vcard::property::FormattedName;
///
/// let mut card = VCard::new();
/// card.add(FormattedName::new("John Doe"));
///
/// let mut out = Vec::new();
/// let mut writer = JCardWriter::new(&mut out);
/// writer.set_add_prodid(false);
/// writer.write(&card).expect("card is writable");
/// writer.close().expect("stream is open");
/// drop(writer);
///
/// assert_eq!(
///     String::from_utf8(out).expect("jCard is UTF-8"),
///     r#"["vcard",[["version",{},"text","4.0"],["fn",{},"text","John Doe"]]]"#
/// );
/// ```
pub struct JCardWriter<W: Write> {
    out: W,
    options: WriterOptions,
    indent: bool,
    wrap_in_array: bool,
    written: usize,
    closed: bool,
}

impl<W: Write> JCardWriter<W> {
    /// A writer with the default options: PRODID added, strict version
    /// filtering, compact output, no outer array.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self::with_options(out, WriterOptions::default())
    }

    /// A writer configured from the `[writer]` settings section.
    #[must_use]
    pub fn with_settings(out: W, config: &WriterConfig) -> Self {
        let mut writer = Self::with_options(out, WriterOptions::from(config));
        writer.indent = config.indent;
        writer.wrap_in_array = config.wrap_in_array;
        writer
    }

    #[must_use]
    pub fn with_options(out: W, options: WriterOptions) -> Self {
        Self {
            out,
            options,
            indent: false,
            wrap_in_array: false,
            written: 0,
            closed: false,
        }
    }

    /// Pretty-prints each card.
    pub fn set_indent(&mut self, indent: bool) {
        self.indent = indent;
    }

    /// Encloses every card in one outer array. Only takes effect before the
    /// first card is written.
    pub fn set_wrap_in_array(&mut self, wrap_in_array: bool) {
        if self.written == 0 {
            self.wrap_in_array = wrap_in_array;
        }
    }

    pub fn set_add_prodid(&mut self, add_prodid: bool) {
        self.options.add_prodid = add_prodid;
    }

    pub fn set_version_strict(&mut self, version_strict: bool) {
        self.options.version_strict = version_strict;
    }

    /// Registers a transcoder, overriding any built-in one for the same
    /// property.
    pub fn register_transcoder<T: Transcoder>(&mut self, transcoder: T) {
        self.options.registry.register(transcoder);
    }

    /// Writes one card.
    ///
    /// ## Errors
    /// [`WriteError::NoTranscoder`] if a property type has no transcoder,
    /// in which case nothing is written. [`WriteError::Closed`] after
    /// [`JCardWriter::close`]. I/O and JSON errors from the stream.
    #[tracing::instrument(skip(self, card), fields(properties = card.properties.len()))]
    pub fn write(&mut self, card: &VCard) -> WriteResult<()> {
        if self.closed {
            return Err(WriteError::Closed);
        }

        let value = self.card_value(card)?;

        if self.wrap_in_array {
            self.out
                .write_all(if self.written == 0 { b"[" } else { b"," })?;
        }
        if self.indent {
            serde_json::to_writer_pretty(&mut self.out, &value)?;
        } else {
            serde_json::to_writer(&mut self.out, &value)?;
        }
        self.written += 1;

        tracing::debug!(written = self.written, "jCard written");
        Ok(())
    }

    /// Flushes the underlying stream.
    ///
    /// ## Errors
    /// I/O errors from the stream.
    pub fn flush(&mut self) -> WriteResult<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Terminates the outer array, if any, and flushes. Calling it again
    /// does nothing.
    ///
    /// ## Errors
    /// I/O errors from the stream.
    pub fn close(&mut self) -> WriteResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if self.wrap_in_array {
            if self.written == 0 {
                self.out.write_all(b"[")?;
            }
            self.out.write_all(b"]")?;
        }
        self.flush()
    }

    fn card_value(&self, card: &VCard) -> WriteResult<Value> {
        let selected = select_properties(card, VERSION, &self.options)?;

        let mut properties = Vec::with_capacity(selected.len() + 2);
        properties.push(json!(["version", {}, "text", VERSION.as_str()]));

        for Selected {
            property,
            transcoder,
        } in &selected
        {
            if let Some(entry) = property_value(property, transcoder.as_ref(), card)? {
                properties.push(entry);
            }
        }

        if self.options.add_prodid {
            let prodid = product_id_property(VERSION);
            let transcoder =
                self.options
                    .registry
                    .for_property(&prodid)
                    .ok_or_else(|| WriteError::NoTranscoder {
                        type_name: prodid.value_type_name(),
                    })?;
            if let Some(entry) = property_value(&prodid, transcoder.as_ref(), card)? {
                properties.push(entry);
            }
        }

        Ok(json!(["vcard", properties]))
    }
}

impl<W: Write> Drop for JCardWriter<W> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "Failed to close jCard writer");
        }
    }
}

/// `[name, {params}, datatype, value...]`, or `None` when the property
/// cannot be written as jCard.
fn property_value(
    property: &VCardProperty,
    transcoder: &dyn DynTranscoder,
    card: &VCard,
) -> WriteResult<Option<Value>> {
    let name = transcoder.wire_name_of(property)?;

    let value = match transcoder.encode_json(property) {
        Ok(value) => value,
        Err(TranscodeError::SkipMe(reason)) => {
            tracing::debug!(property = name, reason = %reason, "Property skipped");
            return Ok(None);
        }
        Err(TranscodeError::EmbeddedVCard(_)) => {
            tracing::debug!(property = name, "Embedded vCard cannot be written as jCard");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let data_type = transcoder.data_type_of(property, VERSION)?;
    let mut parameters = transcoder.parameters_for(property, VERSION, card)?;
    parameters.remove(names::VALUE);

    let mut params = Map::new();
    if let Some(group) = &property.group {
        params.insert("group".to_string(), Value::String(group.clone()));
    }
    for parameter in parameters.iter() {
        let value = match parameter.values.as_slice() {
            [one] => Value::String(one.clone()),
            many => Value::Array(many.iter().cloned().map(Value::String).collect()),
        };
        params.insert(parameter.name.to_ascii_lowercase(), value);
    }

    let mut entry = vec![
        Value::String(name.to_ascii_lowercase()),
        Value::Object(params),
        Value::String(
            data_type
                .as_ref()
                .map_or("unknown", VCardDataType::as_str)
                .to_string(),
        ),
    ];
    entry.extend(value.into_values());
    Ok(Some(Value::Array(entry)))
}
