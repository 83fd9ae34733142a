//! Built-in property values and their transcoders.

mod agent;
mod binary;
mod raw;
mod related;
mod structured_name;
mod text;
mod timezone;

use std::sync::Arc;

use crate::rfc::vcard::transcode::DynTranscoder;

pub use agent::{Agent, AgentTranscoder};
pub use binary::{
    BinaryProperty, BinarySource, BinaryTranscoder, BinaryValue, IMAGE_TYPES, KEY_TYPES,
    KnownMedia, Key, Logo, MediaKind, Photo, SOUND_TYPES, Sound,
};
pub use raw::{RawProperty, RawTranscoder};
pub use related::{Related, RelatedTranscoder};
pub use structured_name::{StructuredName, StructuredNameTranscoder};
pub use text::{
    CalendarRequestUri, CalendarUri, Email, FormattedName, FreeBusyUrl, Impp, Kind, Mailer,
    Member, Note, ProductId, Role, Source, Telephone, TextProperty, TextTranscoder, Title, Url,
};
pub use timezone::{Timezone, TimezoneTranscoder};

/// The built-in catalogue, one transcoder per property kind.
#[must_use]
pub fn standard_transcoders() -> Vec<Arc<dyn DynTranscoder>> {
    vec![
        Arc::new(TextTranscoder::<FormattedName>::new()),
        Arc::new(TextTranscoder::<Note>::new()),
        Arc::new(TextTranscoder::<Title>::new()),
        Arc::new(TextTranscoder::<Role>::new()),
        Arc::new(TextTranscoder::<Email>::new()),
        Arc::new(TextTranscoder::<Telephone>::new()),
        Arc::new(TextTranscoder::<Kind>::new()),
        Arc::new(TextTranscoder::<ProductId>::new()),
        Arc::new(TextTranscoder::<Mailer>::new()),
        Arc::new(TextTranscoder::<Url>::new()),
        Arc::new(TextTranscoder::<Source>::new()),
        Arc::new(TextTranscoder::<Member>::new()),
        Arc::new(TextTranscoder::<Impp>::new()),
        Arc::new(TextTranscoder::<FreeBusyUrl>::new()),
        Arc::new(TextTranscoder::<CalendarUri>::new()),
        Arc::new(TextTranscoder::<CalendarRequestUri>::new()),
        Arc::new(StructuredNameTranscoder),
        Arc::new(TimezoneTranscoder::new()),
        Arc::new(BinaryTranscoder::<Photo>::new()),
        Arc::new(BinaryTranscoder::<Logo>::new()),
        Arc::new(BinaryTranscoder::<Sound>::new()),
        Arc::new(BinaryTranscoder::<Key>::new()),
        Arc::new(RelatedTranscoder),
        Arc::new(AgentTranscoder),
        Arc::new(RawTranscoder::default()),
    ]
}
