//! PHOTO: the binary-or-reference property.

use kunai_core::types::CompatibilityMode;
use kunai_rfc::rfc::vcard::build::serialize_card;
use kunai_rfc::rfc::vcard::core::{Encoding, VCard, VCardDataType, VCardProperty, VCardVersion};
use kunai_rfc::rfc::vcard::parse::{ReaderOptions, parse_single};
use kunai_rfc::rfc::vcard::property::{IMAGE_TYPES, MediaKind, Photo};
use kunai_test::bare_writer;
use kunai_rfc::rfc::vcard::transcode::TranscoderRegistry;

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
const JPEG_BASE64: &str = "/9j/4AAQ";
const URL: &str = "http://example.com/me.jpg";

fn jpeg() -> Option<MediaKind> {
    Some(MediaKind::from_type_name(IMAGE_TYPES, "JPEG"))
}

/// Value and parameters as written for `version`.
fn encode(photo: Photo, version: VCardVersion) -> (String, kunai_rfc::rfc::vcard::core::VCardParameters) {
    let property = VCardProperty::new(photo);
    let registry = TranscoderRegistry::new();
    let transcoder = registry.for_property(&property).expect("PHOTO is built in");
    let value = transcoder.encode_text(&property, version).expect("encodes");
    let parameters = transcoder
        .parameters_for(&property, version, &VCard::new())
        .expect("parameters");
    (value, parameters)
}

#[test]
fn reference_in_v4_has_uri_and_media_type() {
    let (value, parameters) = encode(Photo::url(URL, jpeg()), VCardVersion::V4_0);
    assert_eq!(value, URL);
    assert_eq!(parameters.value_type(), Some(VCardDataType::Uri));
    assert_eq!(parameters.media_type(), Some("image/jpeg"));
}

#[test]
fn reference_in_v21_has_url_and_no_media_type() {
    let (value, parameters) = encode(Photo::url(URL, jpeg()), VCardVersion::V2_1);
    assert_eq!(value, URL);
    assert_eq!(parameters.value_type(), Some(VCardDataType::Url));
    assert_eq!(parameters.media_type(), None);
}

#[test]
fn inline_data_in_v4_is_a_data_uri() {
    let (value, parameters) = encode(Photo::data(JPEG_BYTES.to_vec(), jpeg()), VCardVersion::V4_0);
    assert_eq!(value, format!("data:image/jpeg;base64,{JPEG_BASE64}"));
    assert_eq!(parameters.value_type(), Some(VCardDataType::Uri));
    assert_eq!(parameters.encoding(), None);
    assert!(parameters.types().is_empty());
}

#[test]
fn inline_data_in_v3_is_bare_base64() {
    let (value, parameters) = encode(Photo::data(JPEG_BYTES.to_vec(), jpeg()), VCardVersion::V3_0);
    assert_eq!(value, JPEG_BASE64);
    assert_eq!(parameters.encoding(), Some(Encoding::B));
    assert_eq!(parameters.types(), ["JPEG"]);
}

#[test_log::test]
fn data_uri_is_read_back_as_bytes() {
    let input = format!(
        "BEGIN:VCARD\r\nVERSION:4.0\r\nPHOTO:data:image/jpeg;base64,{JPEG_BASE64}\r\nEND:VCARD\r\n"
    );
    let doc = parse_single(&input, &ReaderOptions::default()).expect("reads");
    let photo = doc.vcard.first::<Photo>().expect("photo decoded");
    assert_eq!(photo.0.bytes(), Some(JPEG_BYTES));
    assert_eq!(
        photo.0.content_type.as_ref().and_then(|c| c.media_type.as_deref()),
        Some("image/jpeg")
    );
}

#[test_log::test]
fn outlook_folded_base64_is_tolerated() {
    let input = "BEGIN:VCARD\r\nVERSION:3.0\r\nPHOTO;ENCODING=b;TYPE=JPEG:/9j/ 4AAQ\r\nEND:VCARD\r\n";
    let options = ReaderOptions::default().with_compatibility(CompatibilityMode::Outlook);
    let doc = parse_single(input, &options).expect("reads");
    let photo = doc.vcard.first::<Photo>().expect("photo decoded");
    assert_eq!(photo.0.bytes(), Some(JPEG_BYTES));
}

#[test_log::test]
fn media_type_outside_table_survives_every_version() {
    let photo = Photo::url(
        "http://example.com/me",
        Some(MediaKind::from_media_type(IMAGE_TYPES, "image/webp")),
    );
    let mut card = VCard::new();
    card.add(photo.clone());

    for version in [VCardVersion::V2_1, VCardVersion::V3_0, VCardVersion::V4_0] {
        let text = serialize_card(&card, version, &bare_writer()).expect("writes");
        let doc = parse_single(&text, &ReaderOptions::default()).expect("reads");
        assert!(doc.warnings.is_empty(), "{version}: {:?}", doc.warnings);
        assert_eq!(doc.vcard.first::<Photo>(), Some(&photo), "{version}");
    }
}
