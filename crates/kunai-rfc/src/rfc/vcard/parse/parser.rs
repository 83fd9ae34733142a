//! Plain-text vCard reader (2.1, 3.0 and 4.0).
//!
//! Each property is handed to the transcoder registered for its name.
//! Properties that fail to decode are dropped with a warning; only a card
//! with no END line fails the whole read.

use std::iter::Peekable;
use std::vec::IntoIter;

use super::document::{ParsedDocument, ReaderOptions, property_warning, report_dropped};
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{ContentLine, logical_lines, parse_content_line};
use crate::rfc::vcard::core::{VCard, VCardParameters, VCardProperty, VCardVersion, names};
use crate::rfc::vcard::transcode::{DynTranscoder, ParseContext, TranscodeError};

type Lines = Peekable<IntoIter<(usize, String)>>;

/// Parses every card in a plain-text document.
///
/// Text outside `BEGIN:VCARD`/`END:VCARD` is ignored.
///
/// ## Errors
/// Returns an error if a card is not terminated by `END:VCARD`.
#[tracing::instrument(skip(input, options), fields(input_len = input.len()))]
pub fn parse_text_document(input: &str, options: &ReaderOptions) -> ParseResult<Vec<ParsedDocument>> {
    tracing::debug!("Parsing vCard text document");

    let mut lines: Lines = logical_lines(input).into_iter().peekable();
    let mut documents = Vec::new();

    while let Some((line_num, line)) = lines.next() {
        if is_marker(&line, "BEGIN") {
            documents.push(read_card(&mut lines, line_num, options)?);
        } else {
            tracing::trace!(line = line_num, "Ignoring text outside of a vCard");
        }
    }

    tracing::debug!(count = documents.len(), "vCard text document parsed");
    Ok(documents)
}

/// Parses a document expected to hold exactly one card.
///
/// ## Errors
/// Returns an error if there is no card or it is malformed. Extra cards are
/// ignored.
pub fn parse_single(input: &str, options: &ReaderOptions) -> ParseResult<ParsedDocument> {
    parse_text_document(input, options)?
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingBegin, 1, "no BEGIN:VCARD found"))
}

/// Parses every card with the built-in transcoders, discarding warnings.
///
/// ## Errors
/// See [`parse_text_document`].
pub fn parse(input: &str) -> ParseResult<Vec<VCard>> {
    Ok(parse_text_document(input, &ReaderOptions::default())?
        .into_iter()
        .map(|doc| doc.vcard)
        .collect())
}

/// Whether a line is `BEGIN:VCARD` or `END:VCARD` (for `marker` BEGIN/END).
fn is_marker(line: &str, marker: &str) -> bool {
    line.split_once(':').is_some_and(|(name, value)| {
        name.trim().eq_ignore_ascii_case(marker) && value.trim().eq_ignore_ascii_case("VCARD")
    })
}

/// Reads one card; the BEGIN line has been consumed.
fn read_card(lines: &mut Lines, begin_line: usize, options: &ReaderOptions) -> ParseResult<ParsedDocument> {
    let mut vcard = VCard::with_version(VCardVersion::V2_1);
    let mut warnings = Vec::new();
    let mut saw_version = false;

    loop {
        let Some((line_num, line)) = lines.next() else {
            return Err(ParseError::new(
                ParseErrorKind::MissingEnd,
                begin_line,
                "missing END:VCARD",
            ));
        };

        if is_marker(&line, "END") {
            break;
        }

        if is_marker(&line, "BEGIN") {
            // A card with no property to hold it.
            let nested = read_card(lines, line_num, options)?;
            warnings.push(format!("line {line_num}: nested vCard outside of a property ignored"));
            warnings.extend(nested.warnings);
            continue;
        }

        let content = match parse_content_line(&line, line_num, vcard.version == VCardVersion::V4_0) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(line = line_num, error = %e, "Skipping malformed line");
                warnings.push(format!("line {line_num}: {}", e.message));
                continue;
            }
        };

        if content.name == "VERSION" {
            match VCardVersion::from_version_str(content.value.trim()) {
                Some(version) => {
                    vcard.version = version;
                    saw_version = true;
                }
                None => warnings.push(property_warning(
                    Some(line_num),
                    "VERSION",
                    &format!("Unknown version \"{}\"", content.value.trim()),
                )),
            }
            continue;
        }

        read_property(lines, content, line_num, &mut vcard, &mut warnings, options)?;
    }

    if !saw_version {
        warnings.push(format!(
            "line {begin_line}: No VERSION property found; assuming {}",
            vcard.version
        ));
    }

    Ok(ParsedDocument { vcard, warnings })
}

fn read_property(
    lines: &mut Lines,
    content: ContentLine,
    line_num: usize,
    vcard: &mut VCard,
    warnings: &mut Vec<String>,
    options: &ReaderOptions,
) -> ParseResult<()> {
    let ContentLine {
        group,
        name,
        params,
        value,
    } = content;

    let transcoder = options.registry.for_decode(&name);
    let mut ctx = ParseContext::new(vcard.version, options.compatibility);

    let decoded = transcoder.decode_text(&value, params.clone(), &mut ctx);
    warnings.extend(
        ctx.warnings
            .iter()
            .map(|w| property_warning(Some(line_num), &name, w)),
    );

    let property = match decoded {
        Ok(property) => Some(property),
        Err(TranscodeError::EmbeddedVCardText(text)) => {
            read_embedded(lines, transcoder.as_ref(), &text, params, line_num, &name, warnings, options)?
        }
        Err(e) => {
            report_dropped(warnings, Some(line_num), &name, &e);
            None
        }
    };

    if let Some(mut property) = property {
        property.group = group;
        vcard.add_property(property);
    }
    Ok(())
}

/// Reads the nested card of an AGENT-like property.
///
/// An empty `text` means the card follows on the next lines (vCard 2.1);
/// otherwise `text` is the card itself.
#[expect(clippy::too_many_arguments)]
fn read_embedded(
    lines: &mut Lines,
    transcoder: &dyn DynTranscoder,
    text: &str,
    mut params: VCardParameters,
    line_num: usize,
    name: &str,
    warnings: &mut Vec<String>,
    options: &ReaderOptions,
) -> ParseResult<Option<VCardProperty>> {
    params.remove(names::VALUE);

    let nested = if text.is_empty() {
        let begins = lines
            .peek()
            .is_some_and(|(_, next)| is_marker(next, "BEGIN"));
        match lines.next_if(|_| begins) {
            Some((begin, _)) => Some(read_card(lines, begin, options)?),
            None => None,
        }
    } else {
        parse_text_document(text, options)?.into_iter().next()
    };

    let Some(nested) = nested else {
        warnings.push(property_warning(
            Some(line_num),
            name,
            "Embedded vCard expected but not found",
        ));
        return Ok(None);
    };

    warnings.extend(nested.warnings);
    let property = transcoder.embed_card(nested.vcard, params);
    if property.is_none() {
        warnings.push(property_warning(
            Some(line_num),
            name,
            "Property cannot hold an embedded vCard",
        ));
    }
    Ok(property)
}
