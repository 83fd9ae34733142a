//! Unrecognized properties survive untouched.

use kunai_rfc::rfc::vcard::core::VCardVersion;
use kunai_rfc::rfc::vcard::parse::{ReaderOptions, parse_jcard, parse_single};
use kunai_rfc::rfc::vcard::property::RawProperty;
use kunai_test::{bare_writer, text_lines};

#[test_log::test]
fn unknown_text_property_is_kept_verbatim() {
    let input = "BEGIN:VCARD\r\nVERSION:4.0\r\nX-SKYPE;X-NETWORK=home:live:jo\\,doe\r\nEND:VCARD\r\n";
    let doc = parse_single(input, &ReaderOptions::default()).expect("never fails");
    assert!(doc.warnings.is_empty());

    let raw = doc.vcard.first::<RawProperty>().expect("raw property");
    assert_eq!(raw.name, "X-SKYPE");
    assert_eq!(raw.value, "live:jo\\,doe");

    let lines = text_lines(&doc.vcard, VCardVersion::V4_0, &bare_writer()).expect("writes");
    assert_eq!(lines, ["X-SKYPE;X-NETWORK=home:live:jo\\,doe"]);
}

#[test_log::test]
fn unknown_jcard_property_keeps_its_data_type() {
    let input = r#"["vcard",[["version",{},"text","4.0"],["x-count",{},"integer","42"]]]"#;
    let doc = parse_jcard(input, &ReaderOptions::default())
        .expect("reads")
        .remove(0);
    let raw = doc.vcard.first::<RawProperty>().expect("raw property");
    assert_eq!(raw.name, "X-COUNT");
    assert_eq!(raw.value, "42");
    assert_eq!(
        raw.data_type,
        Some(kunai_rfc::rfc::vcard::core::VCardDataType::Integer)
    );
}
