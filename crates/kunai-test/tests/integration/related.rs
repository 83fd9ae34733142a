//! RELATED: one warning when there is nothing to point at.

use kunai_rfc::rfc::vcard::core::{ALL_VERSIONS, VCard, VCardProperty};
use kunai_rfc::rfc::vcard::property::Related;
use kunai_rfc::rfc::vcard::transcode::TranscoderRegistry;

#[test]
fn empty_related_warns_once_in_every_version() {
    let property = VCardProperty::new(Related::default());
    let registry = TranscoderRegistry::new();
    let transcoder = registry.for_property(&property).expect("RELATED is built in");

    for &version in ALL_VERSIONS {
        let warnings = transcoder.validate_property(&property, version, &VCard::new());
        assert_eq!(warnings.len(), 1, "version {version}");
    }
}

#[test]
fn related_with_value_is_valid() {
    let registry = TranscoderRegistry::new();
    for related in [Related::uri("urn:uuid:1234"), Related::text("Jane")] {
        let property = VCardProperty::new(related);
        let transcoder = registry.for_property(&property).expect("RELATED is built in");
        for &version in ALL_VERSIONS {
            assert!(
                transcoder
                    .validate_property(&property, version, &VCard::new())
                    .is_empty()
            );
        }
    }
}
