//! Cards shared by the round-trip tests.

use crate::rfc::vcard::core::{UtcOffset, VCard};
use crate::rfc::vcard::property::{
    Email, FormattedName, Note, StructuredName, Telephone, Timezone, Title,
};

/// A card every version and dialect can hold without loss.
pub fn portable_card() -> VCard {
    let mut card = VCard::new();
    card.add(FormattedName::new("Doe, John"));
    card.add(StructuredName::simple("Doe", "John"));
    card.add(Title::new("Engineer; Platform"));
    card.add(Note::new("First line\nSecond, with comma"));

    let tel = card.add(Telephone::new("+1-555-555-5555"));
    tel.group = Some("item1".to_string());
    tel.parameters.add_type("home");

    card.add(Email::new("john@example.com")).group = Some("item1".to_string());
    card.add(Timezone::from_offset(UtcOffset::new(-5, 0)));
    card
}

pub const OUTLOOK_21: &str = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
N:Doe;John;;;\r\n\
FN:John Doe\r\n\
TEL;HOME;VOICE:+1-555-555-5555\r\n\
EMAIL;PREF;INTERNET:john@example.com\r\n\
END:VCARD\r\n";
