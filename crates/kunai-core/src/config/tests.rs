//! Tests for configuration module.

use super::*;

#[test_log::test]
fn test_load_defaults() {
    tracing::debug!("Loading configuration with defaults");

    let settings = Settings::load().expect("defaults should deserialize");

    assert!(settings.writer.add_prodid);
    assert!(settings.writer.version_strict);
    assert!(!settings.writer.indent);
    assert!(!settings.writer.wrap_in_array);
    assert_eq!(settings.writer.target_version, "4.0");
    assert_eq!(settings.reader.compatibility_mode, CompatibilityMode::Rfc);
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_writer_config_default_matches_loader() {
    let config = WriterConfig::default();

    assert!(config.add_prodid);
    assert!(config.version_strict);
    assert!(!config.indent);
    assert_eq!(config.target_version, "4.0");
}

#[test]
fn test_compatibility_mode_deserialize() {
    let settings: ReaderConfig = Config::builder()
        .set_default("compatibility_mode", "mac_address_book")
        .expect("default should be accepted")
        .build()
        .expect("config should build")
        .try_deserialize()
        .expect("reader config should deserialize");

    assert_eq!(
        settings.compatibility_mode,
        CompatibilityMode::MacAddressBook
    );
    assert!(settings.compatibility_mode.strips_base64_whitespace());
}

#[test]
fn test_rfc_mode_is_strict() {
    assert!(!CompatibilityMode::Rfc.strips_base64_whitespace());
    assert!(CompatibilityMode::Outlook.strips_base64_whitespace());
    assert_eq!(CompatibilityMode::Outlook.to_string(), "outlook");
}
