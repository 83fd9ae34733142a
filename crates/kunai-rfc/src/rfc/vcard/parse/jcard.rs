//! jCard (RFC 7095) reader.

use serde_json::Value;

use super::document::{ParsedDocument, ReaderOptions, property_warning, report_dropped};
use super::error::{ParseError, ParseResult};
use crate::rfc::vcard::core::{VCard, VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::transcode::{JCardValue, ParseContext};

/// Parses a jCard document: either one `["vcard", [...]]` array or an array
/// of them.
///
/// The `version` property is read by the document itself and never reaches
/// a transcoder; every jCard is version 4.0. A property array that is not
/// shaped like `[name, {params}, datatype, value...]` is skipped with a
/// warning.
///
/// ## Errors
/// Returns an error if the input is not JSON or not shaped like a jCard.
#[tracing::instrument(skip(input, options), fields(input_len = input.len()))]
pub fn parse_jcard(input: &str, options: &ReaderOptions) -> ParseResult<Vec<ParsedDocument>> {
    tracing::debug!("Parsing jCard document");

    let json: Value = serde_json::from_str(input)?;
    let Value::Array(items) = json else {
        return Err(ParseError::json("expected a jCard array"));
    };

    let documents = if is_card(&items) {
        vec![read_card(&items, options)?]
    } else {
        items
            .iter()
            .map(|item| match item {
                Value::Array(card) if is_card(card) => read_card(card, options),
                _ => Err(ParseError::json("expected a [\"vcard\", [...]] array")),
            })
            .collect::<ParseResult<Vec<_>>>()?
    };

    tracing::debug!(count = documents.len(), "jCard document parsed");
    Ok(documents)
}

fn is_card(items: &[Value]) -> bool {
    items
        .first()
        .and_then(Value::as_str)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("vcard"))
}

fn read_card(items: &[Value], options: &ReaderOptions) -> ParseResult<ParsedDocument> {
    let Some(Value::Array(properties)) = items.get(1) else {
        return Err(ParseError::json("vcard array has no property list"));
    };

    let mut document = ParsedDocument {
        vcard: VCard::with_version(VCardVersion::V4_0),
        warnings: Vec::new(),
    };

    for (index, property) in properties.iter().enumerate() {
        let Some(parts) = property.as_array().filter(|parts| parts.len() >= 4) else {
            document
                .warnings
                .push(format!("property {}: malformed jCard property", index + 1));
            continue;
        };
        read_property(parts, index, &mut document, options);
    }

    Ok(document)
}

fn read_property(parts: &[Value], index: usize, document: &mut ParsedDocument, options: &ReaderOptions) {
    let Some(name) = parts[0].as_str().map(str::to_ascii_uppercase) else {
        document
            .warnings
            .push(format!("property {}: property name is not a string", index + 1));
        return;
    };
    if name == "VERSION" {
        return;
    }

    let (group, parameters) = read_parameters(&parts[1]);
    let data_type = parts[2]
        .as_str()
        .filter(|t| !t.eq_ignore_ascii_case("unknown"))
        .map(VCardDataType::from_name);
    let value = JCardValue::from_values(parts[3..].to_vec());

    let transcoder = options.registry.for_decode(&name);
    let mut ctx = ParseContext::new(VCardVersion::V4_0, options.compatibility);
    let decoded = transcoder.decode_json(&value, data_type.as_ref(), parameters, &mut ctx);
    document.warnings.extend(
        ctx.warnings
            .iter()
            .map(|w| property_warning(None, &name, w)),
    );

    match decoded {
        Ok(mut property) => {
            property.group = group;
            document.vcard.add_property(property);
        }
        Err(e) => report_dropped(&mut document.warnings, None, &name, &e),
    }
}

/// Splits the jCard parameter object into the property group and the rest.
fn read_parameters(object: &Value) -> (Option<String>, VCardParameters) {
    let mut group = None;
    let mut parameters = VCardParameters::new();

    let Some(object) = object.as_object() else {
        return (group, parameters);
    };

    for (key, value) in object {
        if key.eq_ignore_ascii_case("group") {
            group = value.as_str().filter(|g| !g.is_empty()).map(String::from);
            continue;
        }
        let name = key.to_ascii_uppercase();
        match value {
            Value::Array(values) => {
                for value in values {
                    parameters.add(&name, parameter_string(value));
                }
            }
            value => parameters.add(&name, parameter_string(value)),
        }
    }

    (group, parameters)
}

fn parameter_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
