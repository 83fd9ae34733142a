//! jCard writer behaviour seen from the output stream.

use kunai_core::constants::PRODUCT_ID;
use kunai_rfc::rfc::vcard::build::{JCardWriter, WriteError, WriterOptions};
use kunai_rfc::rfc::vcard::core::{VCard, VCardProperty};
use kunai_rfc::rfc::vcard::property::{Agent, FormattedName, Kind, Mailer, ProductId};
use kunai_test::{bare_writer, card_with, jcard_json, jcard_properties, jcard_property_names};

fn mixed_card() -> VCard {
    let mut card = VCard::new();
    card.add(FormattedName::new("John Doe"));
    card.add(Mailer::new("Mutt"));
    card.add(Kind::new("individual"));
    card.add(Agent::Url("http://example.com/agent".into()));
    card
}

#[test_log::test]
fn strict_filter_drops_properties_without_v4_support() {
    let json = jcard_json(&[mixed_card()], bare_writer(), false).expect("writes");
    assert_eq!(
        jcard_property_names(&json).expect("jcard"),
        ["version", "fn", "kind"]
    );
}

#[test_log::test]
fn lenient_writer_keeps_everything() {
    let json = jcard_json(&[mixed_card()], bare_writer().with_version_strict(false), false)
        .expect("writes");
    assert_eq!(
        jcard_property_names(&json).expect("jcard"),
        ["version", "fn", "mailer", "kind", "agent"]
    );
}

#[test]
fn version_survives_when_everything_is_filtered() {
    let card = card_with(VCardProperty::new(Mailer::new("Mutt")));
    let json = jcard_json(&[card], bare_writer(), false).expect("writes");
    let properties = jcard_properties(&json).expect("jcard");
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0], serde_json::json!(["version", {}, "text", "4.0"]));
}

#[test]
fn generated_prodid_replaces_existing_one() {
    let mut card = VCard::new();
    card.add(ProductId::new("-//Other//EN"));
    card.add(FormattedName::new("A"));

    let json = jcard_json(&[card], WriterOptions::default(), false).expect("writes");
    let properties = jcard_properties(&json).expect("jcard");
    assert_eq!(
        jcard_property_names(&json).expect("jcard"),
        ["version", "fn", "prodid"]
    );
    assert_eq!(properties[2][3], PRODUCT_ID);
}

#[test]
fn group_and_parameters_are_written() {
    let mut card = VCard::new();
    let name = card.add(FormattedName::new("A"));
    name.group = Some("item1".into());
    name.parameters.set_all("TYPE", vec!["work".into(), "home".into()]);
    name.parameters.set("LANGUAGE", "en");

    let json = jcard_json(&[card], bare_writer(), false).expect("writes");
    let fn_property = &jcard_properties(&json).expect("jcard")[1];
    assert_eq!(
        *fn_property,
        serde_json::json!([
            "fn",
            {"group": "item1", "type": ["work", "home"], "language": "en"},
            "text",
            "A"
        ])
    );
}

#[test]
fn wrapped_stream_holds_every_card() {
    let cards = [
        card_with(VCardProperty::new(FormattedName::new("A"))),
        card_with(VCardProperty::new(FormattedName::new("B"))),
    ];
    let json = jcard_json(&cards, bare_writer(), true).expect("writes");
    let array = json.as_array().expect("outer array");
    assert_eq!(array.len(), 2);
    assert_eq!(array[1][1][1][3], "B");

    let empty = jcard_json(&[], bare_writer(), true).expect("writes");
    assert_eq!(empty, serde_json::json!([]));
}

#[test]
fn unregistered_type_fails_loudly() {
    #[derive(Debug, Clone, PartialEq)]
    struct Unknown;

    let mut out = Vec::new();
    let mut writer = JCardWriter::with_options(&mut out, bare_writer());
    let err = writer
        .write(&card_with(VCardProperty::new(Unknown)))
        .expect_err("no transcoder");
    assert!(matches!(err, WriteError::NoTranscoder { .. }));
    writer.close().expect("close still works");
    drop(writer);
    assert!(out.is_empty());
}
