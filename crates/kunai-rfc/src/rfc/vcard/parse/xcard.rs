//! xCard (RFC 6351) reader.
//!
//! Every card read from XML is version 4.0. Property elements are decoded
//! by the transcoder registered under their (uppercased) local name.

use super::document::{ParsedDocument, ReaderOptions, property_warning, report_dropped};
use super::error::ParseResult;
use super::markup::parse_tree;
use crate::rfc::vcard::core::{VCard, VCardParameters, VCardVersion};
use crate::rfc::vcard::transcode::{HCardElement, HCardNode, ParseContext, XCardElement};

/// Parses every `<vcard>` element in an xCard document.
///
/// `<vcard>` elements are found at any depth, so both a `<vcards>` root and
/// a bare `<vcard>` are accepted.
///
/// ## Errors
/// Returns an error if the document is not well-formed XML.
#[tracing::instrument(skip(input, options), fields(input_len = input.len()))]
pub fn parse_xcard(input: &str, options: &ReaderOptions) -> ParseResult<Vec<ParsedDocument>> {
    tracing::debug!("Parsing xCard document");

    let root = parse_tree(input, false)?;
    let mut documents = Vec::new();
    collect_cards(&root, options, &mut documents);

    tracing::debug!(count = documents.len(), "xCard document parsed");
    Ok(documents)
}

fn collect_cards(element: &HCardElement, options: &ReaderOptions, documents: &mut Vec<ParsedDocument>) {
    for child in element.child_elements() {
        if child.tag == "vcard" {
            documents.push(read_card(child, options));
        } else {
            collect_cards(child, options, documents);
        }
    }
}

fn read_card(element: &HCardElement, options: &ReaderOptions) -> ParsedDocument {
    let mut document = ParsedDocument {
        vcard: VCard::with_version(VCardVersion::V4_0),
        warnings: Vec::new(),
    };

    for child in element.child_elements() {
        if child.tag == "group" {
            let group = child.attr("name").filter(|name| !name.is_empty());
            for property in child.child_elements() {
                read_property(property, group, &mut document, options);
            }
        } else {
            read_property(child, None, &mut document, options);
        }
    }

    document
}

fn read_property(
    element: &HCardElement,
    group: Option<&str>,
    document: &mut ParsedDocument,
    options: &ReaderOptions,
) {
    let name = element.tag.to_ascii_uppercase();
    let mut parameters = VCardParameters::new();
    let mut value = XCardElement::new(&element.tag);

    for child in element.child_elements() {
        if child.tag == "parameters" {
            read_parameters(child, &mut parameters);
        } else {
            value.append(child.tag.as_str(), own_text(child));
        }
    }

    // `<x-foo>bar</x-foo>`: text with no value element is an untyped value.
    if value.children().is_empty() {
        let text = own_text(element);
        if !text.trim().is_empty() {
            value.append_value(None, text);
        }
    }

    let transcoder = options.registry.for_decode(&name);
    let mut ctx = ParseContext::new(VCardVersion::V4_0, options.compatibility);
    let decoded = transcoder.decode_xml(&value, parameters, &mut ctx);
    document.warnings.extend(
        ctx.warnings
            .iter()
            .map(|w| property_warning(None, &name, w)),
    );

    match decoded {
        Ok(mut property) => {
            property.group = group.map(String::from);
            document.vcard.add_property(property);
        }
        Err(e) => report_dropped(&mut document.warnings, None, &name, &e),
    }
}

/// `<parameters><type><text>home</text><text>voice</text></type></parameters>`
fn read_parameters(element: &HCardElement, parameters: &mut VCardParameters) {
    for parameter in element.child_elements() {
        let name = parameter.tag.to_ascii_uppercase();
        for value in parameter.child_elements() {
            parameters.add(&name, own_text(value));
        }
    }
}

/// Text directly inside an element, as written.
fn own_text(element: &HCardElement) -> String {
    element
        .children
        .iter()
        .filter_map(|node| match node {
            HCardNode::Text(text) => Some(text.as_str()),
            HCardNode::Element(_) => None,
        })
        .collect()
}
