//! hCard pages read end to end.

use kunai_rfc::rfc::vcard::core::VCardVersion;
use kunai_rfc::rfc::vcard::parse::{ReaderOptions, parse_hcard};
use kunai_rfc::rfc::vcard::property::{Email, FormattedName, Note, Telephone};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Contacts</title></head>
<body>
  <div class="vcard">
    <span class="fn">Jane <del>Q.</del> Doe</span>
    <div class="tel"><span class="type">Work</span>: <span class="value">+1-555-0100</span></div>
    <a class="email" href="mailto:jane@example.com?subject=hi">write me</a>
    <p class="note">First<br>Second</p>
    <span class="unknown-class">ignored</span>
  </div>
</body>
</html>"#;

#[test_log::test]
fn reads_contact_from_page() {
    let docs = parse_hcard(PAGE, &ReaderOptions::default()).expect("reads");
    assert_eq!(docs.len(), 1);
    let card = &docs[0].vcard;
    assert_eq!(card.version, VCardVersion::V3_0);

    assert_eq!(card.first::<FormattedName>(), Some(&FormattedName::new("Jane Doe")));
    assert_eq!(card.first::<Email>(), Some(&Email::new("jane@example.com")));
    assert_eq!(card.first::<Note>(), Some(&Note::new("First\nSecond")));

    let tel = card
        .properties
        .iter()
        .find(|p| p.is::<Telephone>())
        .expect("tel read");
    assert_eq!(tel.downcast_ref::<Telephone>(), Some(&Telephone::new("+1-555-0100")));
    assert_eq!(tel.parameters.types(), ["work"]);
}
