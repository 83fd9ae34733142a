//! vCard transcoding library.
//!
//! Reads and writes contact cards in the plain-text (vCard 2.1, 3.0, 4.0),
//! XML (xCard), JSON (jCard) and HTML microformat (hCard, read-only) dialects
//! through one per-property transcoder contract.

pub mod error;
pub mod rfc;
