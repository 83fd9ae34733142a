//! Property transcoding.
//!
//! Each property kind has one [`Transcoder`] that knows how to turn its value
//! into text, xCard, jCard and back (plus hCard, decode only) for every
//! version. The [`TranscoderRegistry`] picks the transcoder: by wire name
//! when decoding, by value type when encoding.

mod error;
mod hcard_element;
mod jcard_value;
mod registry;
mod transcoder;
mod xcard_element;

pub use error::{TranscodeError, TranscodeResult};
pub use hcard_element::{HCardElement, HCardNode};
pub use jcard_value::JCardValue;
pub use registry::TranscoderRegistry;
pub use transcoder::{DynTranscoder, ParseContext, Transcoder};
pub use xcard_element::{XCardChild, XCardElement};
