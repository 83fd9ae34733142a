//! hCard microformat reader.
//!
//! A card is any element with the `vcard` class. Each descendant class that
//! names a registered transcoder (`fn`, `tel`, `photo`, ...) is decoded by
//! it; other classes are ignored. hCard follows vCard 3.0, so decoded cards
//! are version 3.0.

use super::document::{ParsedDocument, ReaderOptions, property_warning, report_dropped};
use super::error::ParseResult;
use super::markup::parse_tree;
use crate::rfc::vcard::core::{VCard, VCardParameters, VCardVersion};
use crate::rfc::vcard::transcode::{HCardElement, ParseContext, TranscodeError};

const CARD_CLASS: &str = "vcard";

/// Parses every top-level hCard in an HTML page or fragment.
///
/// ## Errors
/// Returns an error only if the markup is not text the HTML reader accepts.
/// Broken tag nesting is tolerated.
#[tracing::instrument(skip(input, options), fields(input_len = input.len()))]
pub fn parse_hcard(input: &str, options: &ReaderOptions) -> ParseResult<Vec<ParsedDocument>> {
    tracing::debug!("Parsing hCard document");

    let root = parse_tree(input, true)?;
    let mut cards = Vec::new();
    find_cards(&root, &mut cards);

    let documents: Vec<_> = cards.into_iter().map(|card| read_card(card, options)).collect();

    tracing::debug!(count = documents.len(), "hCard document parsed");
    Ok(documents)
}

/// Outermost `vcard` elements; nested ones belong to a property.
fn find_cards<'a>(element: &'a HCardElement, cards: &mut Vec<&'a HCardElement>) {
    for child in element.child_elements() {
        if child.has_class(CARD_CLASS) {
            cards.push(child);
        } else {
            find_cards(child, cards);
        }
    }
}

fn read_card(element: &HCardElement, options: &ReaderOptions) -> ParsedDocument {
    let mut document = ParsedDocument {
        vcard: VCard::with_version(VCardVersion::V3_0),
        warnings: Vec::new(),
    };
    visit(element, options, &mut document);
    document
}

/// Decodes the properties on each descendant of `element`, without entering
/// nested cards.
fn visit(element: &HCardElement, options: &ReaderOptions, document: &mut ParsedDocument) {
    for child in element.child_elements() {
        for class in child.classes() {
            if class.eq_ignore_ascii_case(CARD_CLASS) {
                continue;
            }
            read_property(child, class, options, document);
        }
        if !child.has_class(CARD_CLASS) {
            visit(child, options, document);
        }
    }
}

fn read_property(element: &HCardElement, class: &str, options: &ReaderOptions, document: &mut ParsedDocument) {
    let Some(transcoder) = options.registry.by_name(class) else {
        return;
    };
    let name = class.to_ascii_uppercase();

    let mut ctx = ParseContext::new(VCardVersion::V3_0, options.compatibility);
    let decoded = transcoder.decode_html(element, VCardParameters::new(), &mut ctx);
    document.warnings.extend(
        ctx.warnings
            .iter()
            .map(|w| property_warning(None, &name, w)),
    );

    let property = match decoded {
        Ok(property) => Some(property),
        Err(TranscodeError::EmbeddedVCardText(_)) if element.has_class(CARD_CLASS) => {
            let nested = read_card(element, options);
            document.warnings.extend(nested.warnings);
            transcoder.embed_card(nested.vcard, VCardParameters::new())
        }
        Err(e) => {
            report_dropped(&mut document.warnings, None, &name, &e);
            None
        }
    };

    if let Some(property) = property {
        document.vcard.add_property(property);
    }
}
