//! PHOTO, LOGO, SOUND and KEY: inline data or a reference to it.
//!
//! | version | reference              | inline data                              |
//! |---------|------------------------|------------------------------------------|
//! | 2.1     | VALUE=URL, TYPE        | base64, ENCODING=BASE64, TYPE            |
//! | 3.0     | VALUE=URI, TYPE        | base64, ENCODING=B, TYPE                 |
//! | 4.0     | VALUE=URI, MEDIATYPE   | `data:` URI, VALUE=URI, no ENCODING/TYPE |

use std::fmt;
use std::marker::PhantomData;

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};

use crate::rfc::vcard::core::{
    Encoding, VCard, VCardDataType, VCardParameters, VCardVersion, names,
};
use crate::rfc::vcard::transcode::{
    HCardElement, JCardValue, ParseContext, TranscodeError, TranscodeResult, Transcoder,
    XCardElement,
};

use super::text::strip_prefix_ignore_case;

/// A well-known content type for one property category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownMedia {
    /// TYPE parameter spelling used by 2.1 and 3.0.
    pub type_name: &'static str,
    pub media_type: &'static str,
    pub extension: &'static str,
}

const fn known(type_name: &'static str, media_type: &'static str, extension: &'static str) -> KnownMedia {
    KnownMedia {
        type_name,
        media_type,
        extension,
    }
}

pub const IMAGE_TYPES: &[KnownMedia] = &[
    known("JPEG", "image/jpeg", "jpg"),
    known("GIF", "image/gif", "gif"),
    known("PNG", "image/png", "png"),
    known("BMP", "image/bmp", "bmp"),
    known("TIFF", "image/tiff", "tiff"),
];

pub const SOUND_TYPES: &[KnownMedia] = &[
    known("AAC", "audio/aac", "aac"),
    known("MIDI", "audio/midi", "mid"),
    known("MP3", "audio/mp3", "mp3"),
    known("MPEG", "audio/mpeg", "mpeg"),
    known("OGG", "audio/ogg", "ogg"),
    known("WAV", "audio/wav", "wav"),
];

pub const KEY_TYPES: &[KnownMedia] = &[
    known("PGP", "application/pgp-keys", "pgp"),
    known("GPG", "application/gpg", "gpg"),
    known("X509", "application/x509", "crt"),
];

/// Content type of a binary value: the legacy TYPE name and, when known,
/// the media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaKind {
    pub type_name: String,
    pub media_type: Option<String>,
}

impl MediaKind {
    #[must_use]
    pub fn from_known(known: &KnownMedia) -> Self {
        Self {
            type_name: known.type_name.to_string(),
            media_type: Some(known.media_type.to_string()),
        }
    }

    /// Looks up a TYPE parameter value. A value that looks like a media type
    /// is treated as one.
    #[must_use]
    pub fn from_type_name(table: &[KnownMedia], name: &str) -> Self {
        if name.contains('/') {
            return Self::from_media_type(table, name);
        }
        table
            .iter()
            .find(|k| k.type_name.eq_ignore_ascii_case(name))
            .map_or_else(
                || Self {
                    type_name: name.to_ascii_uppercase(),
                    media_type: None,
                },
                Self::from_known,
            )
    }

    /// Looks up a media type. Unknown ones keep their subtype as TYPE name.
    #[must_use]
    pub fn from_media_type(table: &[KnownMedia], media_type: &str) -> Self {
        table
            .iter()
            .find(|k| k.media_type.eq_ignore_ascii_case(media_type))
            .map_or_else(
                || Self {
                    type_name: media_type
                        .rsplit_once('/')
                        .map_or(media_type, |(_, sub)| sub)
                        .to_ascii_uppercase(),
                    media_type: Some(media_type.to_ascii_lowercase()),
                },
                Self::from_known,
            )
    }

    /// Fills in a missing media type as `<category>/<type name>`, so a TYPE
    /// name outside the table still reads back as a media type.
    #[must_use]
    pub fn or_category(mut self, category: &str) -> Self {
        if self.media_type.is_none() {
            self.media_type = Some(format!("{category}/{}", self.type_name.to_ascii_lowercase()));
        }
        self
    }

    /// Guesses from a file extension in a URL.
    #[must_use]
    pub fn from_url(table: &[KnownMedia], url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let (_, extension) = path.rsplit_once('.')?;
        table
            .iter()
            .find(|k| k.extension.eq_ignore_ascii_case(extension))
            .map(Self::from_known)
    }
}

/// Where the bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinarySource {
    Reference(String),
    Data(Vec<u8>),
}

/// Value shared by every binary property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryValue {
    pub source: BinarySource,
    pub content_type: Option<MediaKind>,
}

impl BinaryValue {
    #[must_use]
    pub fn url(url: impl Into<String>, content_type: Option<MediaKind>) -> Self {
        Self {
            source: BinarySource::Reference(url.into()),
            content_type,
        }
    }

    #[must_use]
    pub fn data(data: Vec<u8>, content_type: Option<MediaKind>) -> Self {
        Self {
            source: BinarySource::Data(data),
            content_type,
        }
    }

    /// Replaces any inline data with a reference.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.source = BinarySource::Reference(url.into());
    }

    /// Replaces any reference with inline data.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.source = BinarySource::Data(data);
    }

    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        match &self.source {
            BinarySource::Reference(url) => Some(url),
            BinarySource::Data(_) => None,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.source {
            BinarySource::Data(data) => Some(data),
            BinarySource::Reference(_) => None,
        }
    }

    fn media_type(&self) -> Option<&str> {
        self.content_type.as_ref()?.media_type.as_deref()
    }

    fn data_uri(&self, data: &[u8]) -> String {
        let media_type = self.media_type().unwrap_or("application/octet-stream");
        format!("data:{media_type};base64,{}", STANDARD.encode(data))
    }
}

/// A property whose value is a [`BinaryValue`].
pub trait BinaryProperty: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    const NAME: &'static str;
    /// Content types recognized for this property.
    const MEDIA: &'static [KnownMedia];
    /// Top-level media type (`image`, `audio`, ...) for TYPE names outside
    /// [`Self::MEDIA`].
    const CATEGORY: &'static str;

    fn from_binary(value: BinaryValue) -> Self;
    fn binary(&self) -> &BinaryValue;
}

/// Transcoder shared by every [`BinaryProperty`].
pub struct BinaryTranscoder<P>(PhantomData<fn() -> P>);

impl<P> BinaryTranscoder<P> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<P> Default for BinaryTranscoder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: BinaryProperty> BinaryTranscoder<P> {
    fn build(source: BinarySource, content_type: Option<MediaKind>) -> P {
        P::from_binary(BinaryValue {
            source,
            content_type,
        })
    }

    /// Parses a `data:` URI into bytes and its media type.
    fn parse_data_uri(uri: &str) -> TranscodeResult<(Vec<u8>, Option<MediaKind>)> {
        let rest = strip_prefix_ignore_case(uri, "data:")
            .ok_or_else(|| TranscodeError::cannot_parse("not a data URI"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| TranscodeError::cannot_parse("data URI has no payload"))?;

        let mut parts = header.split(';');
        let media_type = parts.next().filter(|m| m.contains('/'));
        let is_base64 = parts.any(|p| p.eq_ignore_ascii_case("base64"));

        let data = if is_base64 {
            decode_base64(payload, true)?
        } else {
            percent_decode(payload)
        };
        let content_type = media_type.map(|m| MediaKind::from_media_type(P::MEDIA, m));
        Ok((data, content_type))
    }

    /// Content type declared by the parameters, which are consumed.
    fn take_content_type(parameters: &mut VCardParameters, version: VCardVersion) -> Option<MediaKind> {
        let media_type = parameters
            .remove(names::MEDIATYPE)
            .into_iter()
            .next()
            .map(|m| MediaKind::from_media_type(P::MEDIA, &m));

        match version {
            VCardVersion::V2_1 | VCardVersion::V3_0 => {
                let type_name = parameters.remove(names::TYPE).into_iter().next();
                media_type.or_else(|| {
                    type_name.map(|t| MediaKind::from_type_name(P::MEDIA, &t).or_category(P::CATEGORY))
                })
            }
            VCardVersion::V4_0 => media_type,
        }
    }

    fn parse_value(
        value: &str,
        data_type: Option<&VCardDataType>,
        content_type: Option<MediaKind>,
        ctx: &ParseContext,
    ) -> TranscodeResult<P> {
        let value = value.trim();

        if strip_prefix_ignore_case(value, "data:").is_some() {
            let (data, embedded_type) = Self::parse_data_uri(value)?;
            return Ok(Self::build(BinarySource::Data(data), embedded_type.or(content_type)));
        }

        if data_type.is_some_and(VCardDataType::is_reference) || ctx.version == VCardVersion::V4_0 {
            let content_type = content_type.or_else(|| MediaKind::from_url(P::MEDIA, value));
            return Ok(Self::build(BinarySource::Reference(value.to_string()), content_type));
        }

        match decode_base64(value, ctx.compatibility.strips_base64_whitespace()) {
            Ok(data) => Ok(Self::build(BinarySource::Data(data), content_type)),
            Err(_) if looks_like_uri(value) => {
                Ok(Self::build(BinarySource::Reference(value.to_string()), content_type))
            }
            Err(e) => Err(e),
        }
    }
}

impl<P: BinaryProperty> Transcoder for BinaryTranscoder<P> {
    type Value = P;

    fn property_name(&self) -> &str {
        P::NAME
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        match version {
            VCardVersion::V3_0 => Some(VCardDataType::Binary),
            VCardVersion::V2_1 | VCardVersion::V4_0 => None,
        }
    }

    fn data_type(&self, value: &P, version: VCardVersion) -> Option<VCardDataType> {
        match (&value.binary().source, version) {
            (BinarySource::Reference(_), VCardVersion::V2_1) => Some(VCardDataType::Url),
            (BinarySource::Reference(_), _) | (BinarySource::Data(_), VCardVersion::V4_0) => {
                Some(VCardDataType::Uri)
            }
            (BinarySource::Data(_), VCardVersion::V3_0) => Some(VCardDataType::Binary),
            (BinarySource::Data(_), VCardVersion::V2_1) => None,
        }
    }

    fn prepare_parameters(
        &self,
        value: &P,
        parameters: &mut VCardParameters,
        version: VCardVersion,
        _card: &VCard,
    ) {
        let binary = value.binary();
        let type_name = binary.content_type.as_ref().map(|c| c.type_name.as_str());

        match (&binary.source, version) {
            (BinarySource::Reference(_), VCardVersion::V2_1 | VCardVersion::V3_0) => {
                parameters.remove(names::ENCODING);
                if let Some(type_name) = type_name {
                    parameters.set(names::TYPE, type_name);
                }
            }
            (BinarySource::Reference(_), VCardVersion::V4_0) => {
                parameters.remove(names::ENCODING);
                if let Some(media_type) = binary.media_type() {
                    parameters.set_media_type(Some(media_type));
                }
            }
            (BinarySource::Data(_), VCardVersion::V2_1 | VCardVersion::V3_0) => {
                parameters.set_encoding(Encoding::base64_for(version).as_ref());
                if let Some(type_name) = type_name {
                    parameters.set(names::TYPE, type_name);
                }
            }
            (BinarySource::Data(_), VCardVersion::V4_0) => {
                parameters.remove(names::ENCODING);
                parameters.remove(names::MEDIATYPE);
                if let Some(type_name) = type_name {
                    parameters.remove_type(type_name);
                }
            }
        }
    }

    fn write_text(&self, value: &P, version: VCardVersion) -> TranscodeResult<String> {
        let binary = value.binary();
        Ok(match &binary.source {
            BinarySource::Reference(url) => url.clone(),
            BinarySource::Data(data) if version == VCardVersion::V4_0 => binary.data_uri(data),
            BinarySource::Data(data) => STANDARD.encode(data),
        })
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<P> {
        parameters.remove(names::ENCODING);
        let content_type = Self::take_content_type(parameters, ctx.version);
        Self::parse_value(value, data_type, content_type, ctx)
    }

    fn write_xml(&self, value: &P, element: &mut XCardElement) -> TranscodeResult<()> {
        element.append("uri", self.write_text(value, VCardVersion::V4_0)?);
        Ok(())
    }

    fn parse_xml(
        &self,
        element: &XCardElement,
        parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<P> {
        let Some(uri) = element.first("uri") else {
            return Err(TranscodeError::missing_xml_elements(&["uri"]));
        };
        let content_type = Self::take_content_type(parameters, VCardVersion::V4_0);
        Self::parse_value(uri, Some(&VCardDataType::Uri), content_type, ctx)
    }

    fn write_json(&self, value: &P) -> TranscodeResult<JCardValue> {
        Ok(JCardValue::single(self.write_text(value, VCardVersion::V4_0)?))
    }

    fn parse_json(
        &self,
        value: &JCardValue,
        data_type: Option<&VCardDataType>,
        parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<P> {
        let content_type = Self::take_content_type(parameters, VCardVersion::V4_0);
        let data_type = data_type.cloned().unwrap_or(VCardDataType::Uri);
        Self::parse_value(&value.as_single(), Some(&data_type), content_type, ctx)
    }

    fn parse_html(
        &self,
        element: &HCardElement,
        _parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<P> {
        let link = ["src", "href", "data"]
            .iter()
            .find_map(|attr| element.attr(attr).filter(|v| !v.is_empty()))
            .map_or_else(|| element.value(), ToString::to_string);
        if link.is_empty() {
            return Err(TranscodeError::cannot_parse("element has no link"));
        }

        let content_type = element
            .attr("type")
            .filter(|t| !t.is_empty())
            .map(|t| MediaKind::from_media_type(P::MEDIA, t));
        Self::parse_value(&link, Some(&VCardDataType::Uri), content_type, ctx)
    }

    fn validate(&self, value: &P, _version: VCardVersion, _card: &VCard) -> Vec<String> {
        let empty = match &value.binary().source {
            BinarySource::Reference(url) => url.trim().is_empty(),
            BinarySource::Data(data) => data.is_empty(),
        };
        if empty {
            vec!["Property has neither a URL nor binary data attached to it.".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Decodes base64, tolerating missing padding.
fn decode_base64(value: &str, strip_whitespace: bool) -> TranscodeResult<Vec<u8>> {
    let cleaned: String;
    let value = if strip_whitespace {
        cleaned = value.chars().filter(|c| !c.is_whitespace()).collect();
        cleaned.as_str()
    } else {
        value
    };
    STANDARD
        .decode(value)
        .or_else(|_| STANDARD_NO_PAD.decode(value))
        .map_err(|e| TranscodeError::cannot_parse(format!("invalid base64: {e}")))
}

fn looks_like_uri(value: &str) -> bool {
    value
        .split_once(':')
        .is_some_and(|(scheme, rest)| {
            !scheme.is_empty()
                && !rest.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
        && !value.chars().any(char::is_whitespace)
}

fn percent_decode(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && let Some(hex) = value.get(i + 1..i + 3)
            && let Ok(byte) = u8::from_str_radix(hex, 16)
        {
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}

macro_rules! binary_property {
    ($(#[$meta:meta])* $ty:ident, $name:literal, $media:expr, $category:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $ty(pub BinaryValue);

        impl $ty {
            #[must_use]
            pub fn url(url: impl Into<String>, content_type: Option<MediaKind>) -> Self {
                Self(BinaryValue::url(url, content_type))
            }

            #[must_use]
            pub fn data(data: Vec<u8>, content_type: Option<MediaKind>) -> Self {
                Self(BinaryValue::data(data, content_type))
            }
        }

        impl BinaryProperty for $ty {
            const NAME: &'static str = $name;
            const MEDIA: &'static [KnownMedia] = $media;
            const CATEGORY: &'static str = $category;

            fn from_binary(value: BinaryValue) -> Self {
                Self(value)
            }

            fn binary(&self) -> &BinaryValue {
                &self.0
            }
        }
    };
}

binary_property!(
    /// PHOTO of the contact.
    Photo, "PHOTO", IMAGE_TYPES, "image"
);
binary_property!(
    /// LOGO of an organization.
    Logo, "LOGO", IMAGE_TYPES, "image"
);
binary_property!(Sound, "SOUND", SOUND_TYPES, "audio");
binary_property!(
    /// KEY: public key or certificate.
    Key, "KEY", KEY_TYPES, "application"
);

#[cfg(test)]
mod tests {
    use kunai_core::types::CompatibilityMode;

    use super::*;
    use crate::rfc::vcard::core::VCardProperty;
    use crate::rfc::vcard::transcode::DynTranscoder;

    use VCardVersion::{V2_1, V3_0, V4_0};

    const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    fn jpeg() -> Option<MediaKind> {
        Some(MediaKind::from_type_name(IMAGE_TYPES, "jpeg"))
    }

    fn ctx(version: VCardVersion) -> ParseContext {
        ParseContext::new(version, CompatibilityMode::Rfc)
    }

    fn emitted(photo: Photo, version: VCardVersion) -> (String, VCardParameters) {
        let t = BinaryTranscoder::<Photo>::new();
        let prop = VCardProperty::new(photo);
        let card = VCard::with_version(version);
        (
            t.encode_text(&prop, version).expect("writes"),
            t.parameters_for(&prop, version, &card).expect("parameters"),
        )
    }

    #[test]
    fn known_media_lookups() {
        let kind = MediaKind::from_media_type(IMAGE_TYPES, "IMAGE/PNG");
        assert_eq!(kind.type_name, "PNG");
        let unknown = MediaKind::from_media_type(IMAGE_TYPES, "image/webp");
        assert_eq!(unknown.type_name, "WEBP");
        assert_eq!(unknown.media_type.as_deref(), Some("image/webp"));
        assert_eq!(
            MediaKind::from_url(IMAGE_TYPES, "http://example.com/me.JPG?size=2"),
            jpeg()
        );
    }

    #[test]
    fn reference_parameters_per_version() {
        let url = "http://example.com/photo.jpg";

        let (text, params) = emitted(Photo::url(url, jpeg()), V4_0);
        assert_eq!(text, url);
        assert_eq!(params.value_type(), Some(VCardDataType::Uri));
        assert_eq!(params.media_type(), Some("image/jpeg"));

        let (text, params) = emitted(Photo::url(url, jpeg()), V2_1);
        assert_eq!(text, url);
        assert_eq!(params.value_type(), Some(VCardDataType::Url));
        assert_eq!(params.media_type(), None);
        assert_eq!(params.types(), ["JPEG"]);
    }

    #[test]
    fn inline_data_per_version() {
        let b64 = STANDARD.encode(JPEG_BYTES);

        let (text, params) = emitted(Photo::data(JPEG_BYTES.to_vec(), jpeg()), V4_0);
        assert_eq!(text, format!("data:image/jpeg;base64,{b64}"));
        assert_eq!(params.value_type(), Some(VCardDataType::Uri));
        assert!(params.encoding().is_none());
        assert!(params.types().is_empty());

        let (text, params) = emitted(Photo::data(JPEG_BYTES.to_vec(), jpeg()), V3_0);
        assert_eq!(text, b64);
        assert_eq!(params.encoding(), Some(Encoding::B));
        assert_eq!(params.types(), ["JPEG"]);
        assert_eq!(params.value_type(), None);

        let (_, params) = emitted(Photo::data(JPEG_BYTES.to_vec(), jpeg()), V2_1);
        assert_eq!(params.encoding(), Some(Encoding::Base64));
        assert_eq!(params.value_type(), None);
    }

    #[test]
    fn decode_legacy_base64_consumes_parameters() {
        let t = BinaryTranscoder::<Photo>::new();
        let mut params = VCardParameters::new();
        params.set(names::ENCODING, "b");
        params.set(names::TYPE, "JPEG");

        let photo = t
            .parse_text(&STANDARD.encode(JPEG_BYTES), None, &mut params, &mut ctx(V3_0))
            .expect("parses");
        assert_eq!(photo, Photo::data(JPEG_BYTES.to_vec(), jpeg()));
        assert!(params.is_empty());
    }

    #[test]
    fn decode_legacy_without_value_falls_back_to_uri() {
        let t = BinaryTranscoder::<Photo>::new();
        let photo = t
            .parse_text("http://example.com/a.gif", None, &mut VCardParameters::new(), &mut ctx(V2_1))
            .expect("parses");
        assert_eq!(photo.0.reference(), Some("http://example.com/a.gif"));

        let err = t
            .parse_text("not base64 at all!", None, &mut VCardParameters::new(), &mut ctx(V2_1))
            .expect_err("neither base64 nor URI");
        assert!(err.is_cannot_parse());
    }

    #[test]
    fn decode_data_uri() {
        let t = BinaryTranscoder::<Photo>::new();
        let uri = format!("data:image/jpeg;base64,{}", STANDARD.encode(JPEG_BYTES));
        let photo = t
            .parse_text(&uri, None, &mut VCardParameters::new(), &mut ctx(V4_0))
            .expect("parses");
        assert_eq!(photo, Photo::data(JPEG_BYTES.to_vec(), jpeg()));
    }

    #[test]
    fn compatibility_mode_strips_folded_whitespace() {
        let t = BinaryTranscoder::<Photo>::new();
        let b64 = STANDARD.encode(JPEG_BYTES);
        let folded = format!("{} {}", &b64[..4], &b64[4..]);

        let rfc = t.parse_text(&folded, None, &mut VCardParameters::new(), &mut ctx(V2_1));
        assert!(rfc.is_err());

        let mut outlook = ParseContext::new(V2_1, CompatibilityMode::Outlook);
        let photo = t
            .parse_text(&folded, None, &mut VCardParameters::new(), &mut outlook)
            .expect("parses");
        assert_eq!(photo.0.bytes(), Some(JPEG_BYTES));
    }

    #[test]
    fn html_image_source() {
        let t = BinaryTranscoder::<Photo>::new();
        let element = HCardElement::new("img")
            .with_attr("class", "photo")
            .with_attr("src", "http://example.com/me.png");
        let photo = t
            .parse_html(&element, &mut VCardParameters::new(), &mut ctx(V3_0))
            .expect("parses");
        assert_eq!(
            photo,
            Photo::url(
                "http://example.com/me.png",
                Some(MediaKind::from_type_name(IMAGE_TYPES, "png"))
            )
        );
    }

    #[test]
    fn type_outside_table_keeps_media_type() {
        let t = BinaryTranscoder::<Photo>::new();
        let webp = Some(MediaKind::from_media_type(IMAGE_TYPES, "image/webp"));
        let photo = Photo::url("http://example.com/me", webp);

        for version in [V2_1, V3_0, V4_0] {
            let (text, mut params) = emitted(photo.clone(), version);
            let data_type = params.value_type();
            params.remove(names::VALUE);
            let read = t
                .parse_text(&text, data_type.as_ref(), &mut params, &mut ctx(version))
                .expect("parses");
            assert_eq!(read, photo, "{version}");
        }
    }

    #[test]
    fn unknown_type_name_takes_category() {
        let kind = MediaKind::from_type_name(SOUND_TYPES, "flac").or_category("audio");
        assert_eq!(kind.type_name, "FLAC");
        assert_eq!(kind.media_type.as_deref(), Some("audio/flac"));
        assert_eq!(
            MediaKind::from_type_name(IMAGE_TYPES, "JPEG").or_category("image"),
            MediaKind::from_known(&IMAGE_TYPES[0])
        );
    }

    #[test]
    fn setting_one_source_clears_the_other() {
        let mut value = BinaryValue::url("http://example.com/", None);
        value.set_data(vec![1, 2, 3]);
        assert_eq!(value.reference(), None);
        value.set_url("http://example.com/");
        assert_eq!(value.bytes(), None);
    }

    #[test]
    fn empty_value_warns() {
        let t = BinaryTranscoder::<Sound>::new();
        let warnings = t.validate(&Sound::data(Vec::new(), None), V4_0, &VCard::new());
        assert_eq!(warnings.len(), 1);
    }
}
