//! RFC data formats.

pub mod vcard;
