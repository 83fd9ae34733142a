//! vCard transcoding (RFC 6350, RFC 2426, vCard 2.1).
//!
//! ## Overview
//!
//! A [`VCard`] is a list of type-erased [`VCardProperty`] envelopes. Each
//! envelope holds a typed value (a [`property::FormattedName`], a
//! [`property::Timezone`], ...) plus its group label and parameters.
//!
//! Every property kind has one [`transcode::Transcoder`] that encodes and
//! decodes its value in every dialect and version. The
//! [`transcode::TranscoderRegistry`] picks one by wire name when reading and
//! by value type when writing. Registering a transcoder for a new value type
//! is all it takes to support a custom property.
//!
//! ## Usage
//!
//! ### Reading
//!
//! ```rust
//! use kunai_rfc::rfc::vcard::parse::{ReaderOptions, parse_single};
//! use kunai_rfc::rfc::vcard::property::FormattedName;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:4.0\r\n\
//! FN:John Doe\r\n\
//! END:VCARD\r\n";
//!
//! let doc = parse_single(input, &ReaderOptions::default()).expect("valid vCard");
//! assert_eq!(doc.vcard.first::<FormattedName>(), Some(&FormattedName::new("John Doe")));
//! ```
//!
//! ### Writing
//!
//! ```rust
//! use kunai_rfc::rfc::vcard::build::{WriterOptions, serialize_card};
//! use kunai_rfc::rfc::vcard::property::Note;
//! use kunai_rfc::rfc::vcard::{VCard, VCardVersion};
//!
//! let mut card = VCard::new();
//! card.add(Note::new("Call after 5, not before"));
//!
//! let options = WriterOptions::new().with_add_prodid(false);
//! let text = serialize_card(&card, VCardVersion::V3_0, &options).expect("all types registered");
//! assert!(text.contains("NOTE:Call after 5\\, not before\r\n"));
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Versions, data types, parameters, the property envelope, the card
//! - [`transcode`] - The transcoder contract and registry
//! - [`property`] - Built-in property values and transcoders
//! - [`parse`] - Plain-text, xCard, jCard and hCard readers
//! - [`build`] - Plain-text, xCard and jCard writers
//! - [`validation`] - Advisory checks grouped by property

pub mod build;
pub mod core;
pub mod parse;
pub mod property;
pub mod transcode;
pub mod validation;

#[cfg(test)]
mod tests;

pub use build::{JCardWriter, WriteError, WriteResult, WriterOptions, serialize, write_xcard};
pub use core::{VCard, VCardDataType, VCardParameter, VCardParameters, VCardProperty, VCardVersion};
pub use parse::{
    ParseError, ParseResult, ParsedDocument, ReaderOptions, parse, parse_hcard, parse_jcard,
    parse_single, parse_text_document, parse_xcard,
};
pub use transcode::{Transcoder, TranscodeError, TranscoderRegistry};
pub use validation::ValidationWarnings;
