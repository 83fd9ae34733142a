//! Transcoders that decline to write a value leave the rest of the card alone.

use kunai_rfc::rfc::vcard::build::escape::escape_text;
use kunai_rfc::rfc::vcard::build::write_xcard;
use kunai_rfc::rfc::vcard::core::{VCard, VCardDataType, VCardParameters, VCardVersion};
use kunai_rfc::rfc::vcard::parse::values::unescape_text;
use kunai_rfc::rfc::vcard::property::FormattedName;
use kunai_rfc::rfc::vcard::transcode::{ParseContext, TranscodeError, TranscodeResult, Transcoder};
use kunai_test::{bare_writer, jcard_json, jcard_property_names, text_lines};

#[derive(Debug, Clone, PartialEq)]
struct Label(String);

/// Writes nothing for an empty label.
struct LabelTranscoder;

impl Transcoder for LabelTranscoder {
    type Value = Label;

    fn property_name(&self) -> &str {
        "X-LABEL"
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::Text)
    }

    fn write_text(&self, value: &Label, version: VCardVersion) -> TranscodeResult<String> {
        if value.0.is_empty() {
            return Err(TranscodeError::SkipMe("label is empty".to_string()));
        }
        Ok(escape_text(&value.0, version))
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<Label> {
        Ok(Label(unescape_text(value)))
    }
}

fn card() -> VCard {
    let mut card = VCard::new();
    card.add(FormattedName::new("Jo"));
    card.add(Label(String::new()));
    card.add(Label("desk".to_string()));
    card
}

#[test_log::test]
fn text_writer_omits_skipped_property() {
    let writer = bare_writer().with_transcoder(LabelTranscoder);
    for version in [VCardVersion::V2_1, VCardVersion::V3_0, VCardVersion::V4_0] {
        let lines = text_lines(&card(), version, &writer).expect("skip is not a failure");
        assert_eq!(lines, ["FN:Jo", "X-LABEL:desk"], "{version}");
    }
}

#[test_log::test]
fn jcard_writer_omits_skipped_property() {
    let writer = bare_writer().with_transcoder(LabelTranscoder);
    let json = jcard_json(&[card(), card()], writer, true).expect("skip is not a failure");

    let cards = json.as_array().expect("wrapped in an array");
    assert_eq!(cards.len(), 2);
    for jcard in cards {
        assert_eq!(
            jcard_property_names(jcard).expect("jcard"),
            ["version", "fn", "x-label"]
        );
    }
}

#[test_log::test]
fn xcard_writer_omits_skipped_property() {
    let writer = bare_writer().with_transcoder(LabelTranscoder);
    let xml = write_xcard(&[card()], &writer, false).expect("skip is not a failure");
    assert_eq!(xml.matches("<x-label>").count(), 1);
    assert!(xml.contains("<x-label><text>desk</text></x-label>"), "{xml}");
    assert!(xml.contains("<fn><text>Jo</text></fn>"));
}
