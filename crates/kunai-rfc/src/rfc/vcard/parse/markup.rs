//! XML and HTML to element tree, for the xCard and hCard readers.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::ParseResult;
use crate::rfc::vcard::transcode::{HCardElement, HCardNode};

/// HTML elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Parses markup into a tree under a synthetic `#document` root.
///
/// With `html` set, the reader tolerates unclosed and mismatched tags,
/// unquoted attributes and void elements, and stops quietly at anything it
/// cannot read. Text is kept as written, whitespace included. Element and attribute names are lowercased and namespace prefixes
/// dropped.
///
/// ## Errors
/// Returns an error if the markup is malformed beyond what the mode tolerates.
pub(crate) fn parse_tree(input: &str, html: bool) -> ParseResult<HCardElement> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().check_end_names = !html;

    let mut stack = vec![HCardElement::new("#document")];

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) if html => {
                tracing::debug!(error = %e, "Stopped reading malformed HTML");
                break;
            }
            Err(e) => return Err(e.into()),
        };
        match event {
            Event::Start(e) => {
                let element = element_from(&e, html)?;
                if html && VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    append(&mut stack, element);
                } else {
                    stack.push(element);
                }
            }
            Event::Empty(e) => {
                let element = element_from(&e, html)?;
                append(&mut stack, element);
            }
            Event::End(e) => {
                let name = std::str::from_utf8(e.local_name().as_ref())?.to_ascii_lowercase();
                close(&mut stack, &name);
            }
            Event::Text(e) => push_text(&mut stack, std::str::from_utf8(&e)?),
            Event::CData(e) => push_text(&mut stack, std::str::from_utf8(&e)?),
            Event::GeneralRef(e) => {
                let name = std::str::from_utf8(&e)?;
                push_text(&mut stack, &resolve_entity(name));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    while stack.len() > 1 {
        if let Some(element) = stack.pop() {
            append(&mut stack, element);
        }
    }
    Ok(stack.pop().unwrap_or_default())
}

fn element_from(start: &BytesStart<'_>, html: bool) -> ParseResult<HCardElement> {
    let tag = std::str::from_utf8(start.local_name().as_ref())?.to_ascii_lowercase();
    let mut element = HCardElement::new(tag);

    let attributes = if html {
        start.html_attributes()
    } else {
        start.attributes()
    };
    for attr in attributes.flatten() {
        let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_ascii_lowercase();
        let value = std::str::from_utf8(&attr.value)?;
        element = element.with_attr(&key, decode_entities(value));
    }

    Ok(element)
}

fn append(stack: &mut [HCardElement], element: HCardElement) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(HCardNode::Element(element));
    }
}

/// Closes the innermost open element named `name`, along with anything left
/// open inside it. Stray end tags are ignored.
fn close(stack: &mut Vec<HCardElement>, name: &str) {
    let Some(position) = stack.iter().rposition(|e| e.tag == name) else {
        return;
    };
    if position == 0 {
        return;
    }
    while stack.len() > position {
        if let Some(element) = stack.pop() {
            append(stack, element);
        }
    }
}

fn push_text(stack: &mut [HCardElement], text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if let Some(HCardNode::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else {
        parent.children.push(HCardNode::Text(text.to_string()));
    }
}

fn resolve_entity(name: &str) -> String {
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => name.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };
    resolved.map_or_else(|| format!("&{name};"), String::from)
}

/// Replaces character and entity references in attribute values.
fn decode_entities(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match after.find(';') {
            Some(end) if end > 0 && !after[..end].contains(['&', ' ']) => {
                result.push_str(&resolve_entity(&after[..end]));
                rest = &after[end + 1..];
            }
            _ => {
                result.push('&');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}
