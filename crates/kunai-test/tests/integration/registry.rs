//! Custom transcoders: new property kinds and overrides of built-in ones.

use kunai_rfc::rfc::vcard::build::escape::escape_text;
use kunai_rfc::rfc::vcard::build::{WriteError, serialize_card};
use kunai_rfc::rfc::vcard::core::{VCard, VCardDataType, VCardParameters, VCardVersion};
use kunai_rfc::rfc::vcard::parse::values::unescape_text;
use kunai_rfc::rfc::vcard::parse::{ReaderOptions, parse_single};
use kunai_rfc::rfc::vcard::property::{FormattedName, RawProperty};
use kunai_rfc::rfc::vcard::transcode::{ParseContext, TranscodeResult, Transcoder};
use kunai_test::{bare_writer, text_lines};

#[derive(Debug, Clone, PartialEq)]
struct Nickname(String);

struct NicknameTranscoder;

impl Transcoder for NicknameTranscoder {
    type Value = Nickname;

    fn property_name(&self) -> &str {
        "NICKNAME"
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::Text)
    }

    fn supported_versions(&self, _value: &Nickname) -> &'static [VCardVersion] {
        &[VCardVersion::V3_0, VCardVersion::V4_0]
    }

    fn write_text(&self, value: &Nickname, version: VCardVersion) -> TranscodeResult<String> {
        Ok(escape_text(&value.0, version))
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<Nickname> {
        Ok(Nickname(unescape_text(value)))
    }
}

/// Writes FN in upper case, replacing the built-in FN transcoder.
struct ShoutingName;

impl Transcoder for ShoutingName {
    type Value = FormattedName;

    fn property_name(&self) -> &str {
        "FN"
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::Text)
    }

    fn write_text(&self, value: &FormattedName, version: VCardVersion) -> TranscodeResult<String> {
        Ok(escape_text(&value.0.to_uppercase(), version))
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<FormattedName> {
        Ok(FormattedName::new(unescape_text(value).to_uppercase()))
    }
}

const INPUT: &str = "BEGIN:VCARD\r\nVERSION:4.0\r\nFN:Jo\r\nNICKNAME:Jojo\\, the great\r\nEND:VCARD\r\n";

#[test_log::test]
fn unregistered_name_decodes_as_raw() {
    let doc = parse_single(INPUT, &ReaderOptions::default()).expect("reads");
    assert!(doc.vcard.has::<RawProperty>());
    assert!(!doc.vcard.has::<Nickname>());
}

#[test_log::test]
fn registered_transcoder_decodes_and_encodes() {
    let reader = ReaderOptions::default().with_transcoder(NicknameTranscoder);
    let doc = parse_single(INPUT, &reader).expect("reads");
    assert_eq!(
        doc.vcard.first::<Nickname>(),
        Some(&Nickname("Jojo, the great".to_string()))
    );

    let writer = bare_writer().with_transcoder(NicknameTranscoder);
    let lines = text_lines(&doc.vcard, VCardVersion::V3_0, &writer).expect("writes");
    assert_eq!(lines, ["FN:Jo", "NICKNAME:Jojo\\, the great"]);

    let legacy = text_lines(&doc.vcard, VCardVersion::V2_1, &writer).expect("writes");
    assert_eq!(legacy, ["FN:Jo"]);
}

#[test]
fn writing_unregistered_type_fails() {
    let mut card = VCard::new();
    card.add(FormattedName::new("Jo"));
    card.add(Nickname("Jojo".to_string()));

    let err = serialize_card(&card, VCardVersion::V4_0, &bare_writer()).expect_err("no transcoder");
    let WriteError::NoTranscoder { type_name } = err else {
        panic!("unexpected error: {err}");
    };
    assert!(type_name.ends_with("Nickname"));
}

#[test_log::test]
fn custom_transcoder_overrides_built_in() {
    let reader = ReaderOptions::default().with_transcoder(ShoutingName);
    let doc = parse_single(INPUT, &reader).expect("reads");
    assert_eq!(doc.vcard.first::<FormattedName>(), Some(&FormattedName::new("JO")));

    let mut card = VCard::new();
    card.add(FormattedName::new("quiet"));
    let writer = bare_writer().with_transcoder(ShoutingName);
    let lines = text_lines(&card, VCardVersion::V4_0, &writer).expect("writes");
    assert_eq!(lines, ["FN:QUIET"]);
}
