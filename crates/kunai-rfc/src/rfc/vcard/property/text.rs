//! Single-string properties (FN, EMAIL, URL, ...).

use std::fmt;
use std::marker::PhantomData;

use crate::rfc::vcard::build::escape::escape_text;
use crate::rfc::vcard::core::{ALL_VERSIONS, VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::parse::values::unescape_text;
use crate::rfc::vcard::transcode::{
    HCardElement, ParseContext, TranscodeError, TranscodeResult, Transcoder,
};

/// A property whose value is one string.
pub trait TextProperty: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    /// Wire name, uppercase.
    const NAME: &'static str;
    /// Data type of the value in every version.
    const DATA_TYPE: VCardDataType;
    const VERSIONS: &'static [VCardVersion] = ALL_VERSIONS;
    /// URI scheme stripped from an hCard link (`mailto:`, `tel:`).
    const LINK_SCHEME: Option<&'static str> = None;

    fn from_text(value: String) -> Self;
    fn text(&self) -> &str;
}

/// Transcoder shared by every [`TextProperty`].
pub struct TextTranscoder<P>(PhantomData<fn() -> P>);

impl<P> TextTranscoder<P> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<P> Default for TextTranscoder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TextProperty> Transcoder for TextTranscoder<P> {
    type Value = P;

    fn property_name(&self) -> &str {
        P::NAME
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(P::DATA_TYPE)
    }

    fn supported_versions(&self, _value: &P) -> &'static [VCardVersion] {
        P::VERSIONS
    }

    fn write_text(&self, value: &P, version: VCardVersion) -> TranscodeResult<String> {
        Ok(escape_text(value.text(), version))
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<P> {
        Ok(P::from_text(unescape_text(value)))
    }

    fn parse_html(
        &self,
        element: &HCardElement,
        parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<P> {
        for type_value in element.types() {
            parameters.add_type(type_value);
        }

        let href = element.attr("href").filter(|h| !h.is_empty());
        if let (Some(scheme), Some(href)) = (P::LINK_SCHEME, href)
            && let Some(target) = strip_prefix_ignore_case(href, scheme)
        {
            let target = target.split_once('?').map_or(target, |(t, _)| t);
            return Ok(P::from_text(target.to_string()));
        }

        if P::DATA_TYPE == VCardDataType::Uri {
            let link = href.or_else(|| element.attr("src").filter(|s| !s.is_empty()));
            if let Some(link) = link {
                return Ok(P::from_text(link.to_string()));
            }
        }

        let value = element.value();
        if value.is_empty() && P::DATA_TYPE == VCardDataType::Uri {
            return Err(TranscodeError::cannot_parse("element has no link or text"));
        }
        Ok(P::from_text(value))
    }
}

pub(crate) fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

macro_rules! text_property {
    ($(#[$meta:meta])* $ty:ident, $name:literal, $data_type:ident $(, versions = $versions:expr)? $(, link = $scheme:literal)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $ty(pub String);

        impl $ty {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn value(&self) -> &str {
                &self.0
            }
        }

        impl TextProperty for $ty {
            const NAME: &'static str = $name;
            const DATA_TYPE: VCardDataType = VCardDataType::$data_type;
            $(const VERSIONS: &'static [VCardVersion] = $versions;)?
            $(const LINK_SCHEME: Option<&'static str> = Some($scheme);)?

            fn from_text(value: String) -> Self {
                Self(value)
            }

            fn text(&self) -> &str {
                &self.0
            }
        }
    };
}

use VCardVersion::{V2_1, V3_0, V4_0};

text_property!(
    /// FN: the formatted display name.
    FormattedName, "FN", Text
);
text_property!(Note, "NOTE", Text);
text_property!(Title, "TITLE", Text);
text_property!(Role, "ROLE", Text);
text_property!(
    /// EMAIL address.
    Email, "EMAIL", Text, link = "mailto:"
);
text_property!(
    /// TEL, kept as free text in every version.
    Telephone, "TEL", Text, link = "tel:"
);
text_property!(
    /// KIND: individual, group, org or location.
    Kind, "KIND", Text, versions = &[V4_0]
);
text_property!(
    /// PRODID: identifies the software that produced the card.
    ProductId, "PRODID", Text, versions = &[V3_0, V4_0]
);
text_property!(Mailer, "MAILER", Text, versions = &[V2_1, V3_0]);

text_property!(Url, "URL", Uri);
text_property!(Source, "SOURCE", Uri);
text_property!(
    /// MEMBER of a group card.
    Member, "MEMBER", Uri, versions = &[V4_0]
);
text_property!(
    /// IMPP: instant messaging address.
    Impp, "IMPP", Uri, versions = &[V3_0, V4_0]
);
text_property!(FreeBusyUrl, "FBURL", Uri, versions = &[V4_0]);
text_property!(CalendarUri, "CALURI", Uri, versions = &[V4_0]);
text_property!(CalendarRequestUri, "CALADRURI", Uri, versions = &[V4_0]);
