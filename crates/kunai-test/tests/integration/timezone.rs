//! TZ: the UTC-offset / free-text property in every version.

use kunai_rfc::rfc::vcard::core::{UtcOffset, VCardProperty, VCardVersion};
use kunai_rfc::rfc::vcard::parse::{ReaderOptions, parse_single};
use kunai_rfc::rfc::vcard::property::{Timezone, TimezoneTranscoder};
use kunai_rfc::rfc::vcard::transcode::TranscoderRegistry;
use kunai_test::{bare_writer, card_with, text_lines};

fn read(version: &str, line: &str) -> kunai_rfc::rfc::vcard::ParsedDocument {
    let input = format!("BEGIN:VCARD\r\nVERSION:{version}\r\n{line}\r\nEND:VCARD\r\n");
    parse_single(&input, &ReaderOptions::default()).expect("document reads")
}

#[test]
fn offset_is_written_per_version() {
    let card = card_with(VCardProperty::new(Timezone::from_offset(UtcOffset::new(-5, 0))));

    let expected = [
        (VCardVersion::V2_1, "TZ:-0500"),
        (VCardVersion::V3_0, "TZ:-05:00"),
        (VCardVersion::V4_0, "TZ;VALUE=utc-offset:-0500"),
    ];
    for (version, line) in expected {
        let lines = text_lines(&card, version, &bare_writer()).expect("writes");
        assert_eq!(lines, [line], "version {version}");
    }
}

#[test]
fn zone_label_is_written_per_version() {
    let card = card_with(VCardProperty::new(Timezone::from_text("America/New_York")));

    let v4 = text_lines(&card, VCardVersion::V4_0, &bare_writer()).expect("writes");
    assert_eq!(v4, ["TZ:America/New_York"]);

    let v3 = text_lines(&card, VCardVersion::V3_0, &bare_writer()).expect("writes");
    assert_eq!(v3, ["TZ;VALUE=text:America/New_York"]);

    let v21 = text_lines(&card, VCardVersion::V2_1, &bare_writer()).expect("writes");
    assert_eq!(v21, ["TZ:"]);

    let report = card.validate(VCardVersion::V2_1, &TranscoderRegistry::new());
    assert_eq!(report.for_property(&card.properties[0]).len(), 1);
    assert!(
        card.validate(VCardVersion::V4_0, &TranscoderRegistry::new())
            .for_property(&card.properties[0])
            .is_empty()
    );
}

#[test]
fn offset_wins_in_v3_and_text_wins_in_v4() {
    let card = card_with(VCardProperty::new(Timezone::new(
        UtcOffset::new(-5, 0),
        "America/New_York",
    )));
    let v3 = text_lines(&card, VCardVersion::V3_0, &bare_writer()).expect("writes");
    assert_eq!(v3, ["TZ:-05:00"]);
    let v4 = text_lines(&card, VCardVersion::V4_0, &bare_writer()).expect("writes");
    assert_eq!(v4, ["TZ:America/New_York"]);
}

#[test_log::test]
fn resolving_transcoder_derives_legacy_offset() {
    let card = card_with(VCardProperty::new(Timezone::from_text("America/New_York")));
    let options = bare_writer().with_transcoder(TimezoneTranscoder::resolving());
    let lines = text_lines(&card, VCardVersion::V2_1, &options).expect("writes");
    assert_eq!(lines, ["TZ:-0500"]);
}

#[test_log::test]
fn lenient_v3_fallback_warns() {
    let doc = read("3.0", "TZ:Eastern");
    assert_eq!(doc.vcard.first::<Timezone>(), Some(&Timezone::from_text("Eastern")));
    assert_eq!(doc.warnings.len(), 1);
}

#[test_log::test]
fn v4_fallback_is_silent() {
    let doc = read("4.0", "TZ:Eastern");
    assert_eq!(doc.vcard.first::<Timezone>(), Some(&Timezone::from_text("Eastern")));
    assert!(doc.warnings.is_empty());
}

#[test_log::test]
fn declared_offset_must_parse() {
    let doc = read("4.0", "TZ;VALUE=utc-offset:Eastern");
    assert!(!doc.vcard.has::<Timezone>());
    assert_eq!(doc.warnings.len(), 1);

    let legacy = read("2.1", "TZ:Eastern");
    assert!(!legacy.vcard.has::<Timezone>());
    assert_eq!(legacy.warnings.len(), 1);
}
