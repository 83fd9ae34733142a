//! vCard readers.
//!
//! One reader per dialect, all driven by the same [`ReaderOptions`]:
//!
//! - [`parse_text_document`]: plain text, versions 2.1, 3.0 and 4.0
//! - [`parse_xcard`]: xCard (RFC 6351)
//! - [`parse_jcard`]: jCard (RFC 7095)
//! - [`parse_hcard`]: hCard microformat embedded in HTML
//!
//! ## Usage
//!
//! ```rust
//! use kunai_rfc::rfc::vcard::parse::{ReaderOptions, parse_text_document};
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:3.0\r\n\
//! FN:John Doe\r\n\
//! N:Doe;John;;;\r\n\
//! TZ:Eastern\r\n\
//! END:VCARD\r\n";
//!
//! let docs = parse_text_document(input, &ReaderOptions::default()).expect("valid vCard");
//! assert_eq!(docs[0].vcard.properties.len(), 3);
//! assert_eq!(docs[0].warnings.len(), 1);
//! ```
//!
//! Properties that cannot be decoded never fail a read. They are left out of
//! the card and described in [`ParsedDocument::warnings`].

mod document;
mod error;
mod hcard;
mod jcard;
mod lexer;
mod markup;
mod parser;
pub mod values;
mod xcard;

pub use document::{ParsedDocument, ReaderOptions};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use hcard::parse_hcard;
pub use jcard::parse_jcard;
pub use lexer::{ContentLine, logical_lines, parse_content_line, unfold};
pub use parser::{parse, parse_single, parse_text_document};
pub use values::{split_component, split_structured, unescape_text};
pub use xcard::parse_xcard;
