//! Core vCard types.
//!
//! Versions, data-type tags, the parameter multi-map with its legality
//! table, the type-erased property envelope and the card itself.

mod data_type;
mod encoding;
pub mod legality;
mod parameter;
mod property;
mod utc_offset;
mod vcard;
mod version;

pub use data_type::VCardDataType;
pub use encoding::Encoding;
pub use parameter::{Pid, VCardParameter, VCardParameters, names, types};
pub use property::{PropertyValue, VCardProperty};
pub use utc_offset::{InvalidUtcOffset, UtcOffset};
pub use vcard::VCard;
pub use version::{ALL_VERSIONS, VCardVersion};
