//! xCard (RFC 6351) serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::error::{WriteError, WriteResult};
use super::{Selected, WriterOptions, product_id_property, select_properties};
use crate::rfc::vcard::core::{VCard, VCardParameters, VCardProperty, VCardVersion, names};
use crate::rfc::vcard::transcode::{DynTranscoder, TranscodeError, XCardElement};

/// xCard is always version 4.0.
const VERSION: VCardVersion = VCardVersion::V4_0;

/// One encoded property element and the parameters to write with it.
struct PropertyXml {
    element: XCardElement,
    parameters: VCardParameters,
}

/// Top-level entries of a `<vcard>` element. Grouped properties share one
/// `<group>` wrapper, placed where the group first appears.
enum Slot {
    Property(PropertyXml),
    Group(String, Vec<PropertyXml>),
}

/// Serializes cards as an xCard document.
///
/// ## Summary
/// Produces `<vcards xmlns="urn:ietf:params:xml:ns:vcard-4.0">` holding
/// one `<vcard>` per card. Each property becomes an element named after it,
/// with a `<parameters>` block when it has parameters and value children
/// named after their data type.
///
/// ## Errors
/// [`WriteError::NoTranscoder`] if a property type has no transcoder;
/// [`WriteError::Xml`] if the XML cannot be produced.
#[tracing::instrument(skip(cards, options), fields(count = cards.len()))]
pub fn write_xcard(cards: &[VCard], options: &WriterOptions, indent: bool) -> WriteResult<String> {
    let slots = cards
        .iter()
        .map(|card| card_slots(card, options))
        .collect::<WriteResult<Vec<_>>>()?;

    let mut writer = if indent {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("vcards");
    if let Some(namespace) = VERSION.xml_namespace() {
        root.push_attribute(("xmlns", namespace));
    }
    writer.write_event(Event::Start(root))?;

    for card in &slots {
        writer.write_event(Event::Start(BytesStart::new("vcard")))?;
        for slot in card {
            match slot {
                Slot::Property(property) => write_property(&mut writer, property)?,
                Slot::Group(name, properties) => {
                    let mut group = BytesStart::new("group");
                    group.push_attribute(("name", name.as_str()));
                    writer.write_event(Event::Start(group))?;
                    for property in properties {
                        write_property(&mut writer, property)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new("group")))?;
                }
            }
        }
        writer.write_event(Event::End(BytesEnd::new("vcard")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("vcards")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| {
        tracing::error!("Generated invalid UTF-8 in xCard: {}", e);
        WriteError::Xml("invalid UTF-8 in xCard output".to_string())
    })
}

/// Encodes a card's properties, grouping as it goes.
fn card_slots(card: &VCard, options: &WriterOptions) -> WriteResult<Vec<Slot>> {
    let mut slots: Vec<Slot> = Vec::new();

    let selected = select_properties(card, VERSION, options)?;
    let mut encoded = Vec::with_capacity(selected.len() + 1);
    for Selected {
        property,
        transcoder,
    } in &selected
    {
        encoded.push((property.group.clone(), encode(property, transcoder.as_ref(), card)?));
    }

    if options.add_prodid {
        let prodid = product_id_property(VERSION);
        let transcoder = options
            .registry
            .for_property(&prodid)
            .ok_or_else(|| WriteError::NoTranscoder {
                type_name: prodid.value_type_name(),
            })?;
        encoded.push((None, encode(&prodid, transcoder.as_ref(), card)?));
    }

    for (group, property) in encoded {
        let Some(property) = property else {
            continue;
        };
        let Some(group) = group else {
            slots.push(Slot::Property(property));
            continue;
        };

        let existing = slots.iter_mut().find_map(|slot| match slot {
            Slot::Group(name, members) if name.eq_ignore_ascii_case(&group) => Some(members),
            _ => None,
        });
        match existing {
            Some(members) => members.push(property),
            None => slots.push(Slot::Group(group, vec![property])),
        }
    }

    Ok(slots)
}

/// `None` when the property cannot be written as xCard.
fn encode(
    property: &VCardProperty,
    transcoder: &dyn DynTranscoder,
    card: &VCard,
) -> WriteResult<Option<PropertyXml>> {
    let name = transcoder.wire_name_of(property)?;
    let mut element = XCardElement::new(name);

    match transcoder.encode_xml(property, &mut element) {
        Ok(()) => {}
        Err(TranscodeError::SkipMe(reason)) => {
            tracing::debug!(property = name, reason = %reason, "Property skipped");
            return Ok(None);
        }
        Err(TranscodeError::EmbeddedVCard(_)) => {
            tracing::debug!(property = name, "Embedded vCard cannot be written as xCard");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    }

    let mut parameters = transcoder.parameters_for(property, VERSION, card)?;
    parameters.remove(names::VALUE);

    Ok(Some(PropertyXml {
        element,
        parameters,
    }))
}

fn write_property<W: std::io::Write>(writer: &mut Writer<W>, property: &PropertyXml) -> WriteResult<()> {
    let name = property.element.property_name.as_str();
    writer.write_event(Event::Start(BytesStart::new(name)))?;

    if !property.parameters.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("parameters")))?;
        for parameter in property.parameters.iter() {
            let parameter_name = parameter.name.to_ascii_lowercase();
            let value_type = if parameter.name == names::PREF {
                "integer"
            } else {
                "text"
            };
            writer.write_event(Event::Start(BytesStart::new(parameter_name.as_str())))?;
            for value in &parameter.values {
                write_text_element(writer, value_type, value)?;
            }
            writer.write_event(Event::End(BytesEnd::new(parameter_name.as_str())))?;
        }
        writer.write_event(Event::End(BytesEnd::new("parameters")))?;
    }

    for child in property.element.children() {
        write_text_element(writer, &child.name, &child.value)?;
    }

    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_text_element<W: std::io::Write>(writer: &mut Writer<W>, name: &str, text: &str) -> WriteResult<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(name)))?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::UtcOffset;
    use crate::rfc::vcard::parse::{ReaderOptions, parse_xcard};
    use crate::rfc::vcard::property::{
        Agent, FormattedName, Note, StructuredName, Telephone, Timezone,
    };

    fn plain() -> WriterOptions {
        WriterOptions::new().with_add_prodid(false)
    }

    #[test]
    fn writes_document() {
        let mut card = VCard::new();
        card.add(FormattedName::new("A & B"));
        card.add(Timezone::from_offset(UtcOffset::new(-5, 0)));

        let xml = write_xcard(&[card], &plain(), false).expect("writes");
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<vcards xmlns=\"urn:ietf:params:xml:ns:vcard-4.0\"><vcard>\
<fn><text>A &amp; B</text></fn>\
<tz><utc-offset>-0500</utc-offset></tz>\
</vcard></vcards>"
        );
    }

    #[test]
    fn parameters_block() {
        let mut card = VCard::new();
        let tel = card.add(Telephone::new("+1-555"));
        tel.parameters.set_all("TYPE", vec!["home".into(), "voice".into()]);
        tel.parameters.set_pref(Some(1));

        let xml = write_xcard(&[card], &plain(), false).expect("writes");
        assert!(xml.contains(
            "<tel><parameters><type><text>home</text><text>voice</text></type>\
<pref><integer>1</integer></pref></parameters><text>+1-555</text></tel>"
        ));
    }

    #[test]
    fn groups_are_gathered() {
        let mut card = VCard::new();
        card.add(Note::new("one")).group = Some("item1".into());
        card.add(FormattedName::new("A"));
        card.add(Note::new("two")).group = Some("item1".into());

        let xml = write_xcard(&[card], &plain(), false).expect("writes");
        assert!(xml.contains(
            "<vcard><group name=\"item1\"><note><text>one</text></note><note><text>two</text></note></group>\
<fn><text>A</text></fn></vcard>"
        ));
    }

    #[test]
    fn embedded_and_prodid() {
        let mut card = VCard::new();
        card.add(FormattedName::new("A"));
        card.add(Agent::VCard(Box::default()));

        let options = WriterOptions::new().with_version_strict(false);
        let xml = write_xcard(&[card], &options, true).expect("writes");
        assert!(!xml.contains("<agent>"));
        assert!(xml.contains("<prodid>"));
        assert!(xml.contains('\n'));
    }

    #[test_log::test]
    fn round_trips_through_reader() {
        let mut card = VCard::new();
        card.add(FormattedName::new("John <Doe>"));
        card.add(StructuredName::simple("Doe", "John"));
        card.add(Timezone::from_text("America/New_York"));
        let tel = card.add(Telephone::new("+1-555"));
        tel.group = Some("item1".into());
        tel.parameters.add_type("home");

        let xml = write_xcard(std::slice::from_ref(&card), &plain(), true).expect("writes");
        let read = parse_xcard(&xml, &ReaderOptions::default())
            .expect("reads back")
            .remove(0);
        assert!(read.warnings.is_empty(), "{:?}", read.warnings);
        assert_eq!(read.vcard.properties, card.properties);
    }
}
