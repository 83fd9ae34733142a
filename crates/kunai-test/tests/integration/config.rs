//! Library objects built from the `kunai_core` settings.

use kunai_core::config::{ReaderConfig, WriterConfig};
use kunai_core::types::CompatibilityMode;
use kunai_rfc::rfc::vcard::build::{JCardWriter, WriterOptions, serialize_card, target_version};
use kunai_rfc::rfc::vcard::core::VCardVersion;
use kunai_rfc::rfc::vcard::parse::ReaderOptions;
use kunai_rfc::rfc::vcard::property::{FormattedName, Mailer};
use kunai_rfc::rfc::vcard::VCard;

fn card() -> VCard {
    let mut card = VCard::new();
    card.add(FormattedName::new("A"));
    card.add(Mailer::new("Mutt"));
    card
}

#[test]
fn writer_settings_drive_jcard_output() {
    let config = WriterConfig {
        add_prodid: false,
        version_strict: false,
        indent: true,
        wrap_in_array: true,
        target_version: "4.0".to_string(),
    };

    let mut out = Vec::new();
    {
        let mut writer = JCardWriter::with_settings(&mut out, &config);
        writer.write(&card()).expect("writes");
    }
    let text = String::from_utf8(out).expect("utf-8");
    assert!(text.starts_with('['));
    assert!(text.ends_with(']'));
    assert!(text.contains('\n'));
    assert!(text.contains("\"mailer\""));
    assert!(!text.contains("\"prodid\""));
}

#[test]
fn target_version_drives_text_output() {
    let config = WriterConfig {
        add_prodid: false,
        target_version: "3.0".to_string(),
        ..WriterConfig::default()
    };
    let version = target_version(&config).expect("known version");
    assert_eq!(version, VCardVersion::V3_0);

    let text = serialize_card(&card(), version, &WriterOptions::from(&config)).expect("writes");
    assert!(text.contains("VERSION:3.0\r\n"));
    assert!(text.contains("MAILER:Mutt\r\n"));
}

#[test]
fn reader_settings_carry_compatibility_mode() {
    let config = ReaderConfig {
        compatibility_mode: CompatibilityMode::MacAddressBook,
    };
    let options = ReaderOptions::from(&config);
    assert_eq!(options.compatibility, CompatibilityMode::MacAddressBook);
}
