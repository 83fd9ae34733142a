//! TZ: a UTC offset, a zone label, or both.
//!
//! Which of the two shapes goes on the wire depends on the version:
//!
//! | version | offset only       | text only          | both              |
//! |---------|-------------------|--------------------|-------------------|
//! | 2.1     | `-0500`           | empty (warning)    | `-0500`           |
//! | 3.0     | `-05:00`          | text, VALUE=text   | `-05:00`          |
//! | 4.0     | `-0500`, VALUE=utc-offset | text       | text              |
//!
//! Decoding mirrors it: 2.1 only accepts an offset, 3.0 and hCard fall back
//! to text with a warning when the offset does not parse, 4.0 falls back
//! silently unless VALUE=utc-offset was declared.

use std::str::FromStr;

use chrono::Utc;
use chrono_tz::{OffsetComponents, Tz};

use crate::rfc::vcard::build::escape::escape_text;
use crate::rfc::vcard::core::{UtcOffset, VCard, VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::parse::values::unescape_text;
use crate::rfc::vcard::transcode::{
    HCardElement, JCardValue, ParseContext, TranscodeError, TranscodeResult, Transcoder,
    XCardElement,
};

/// Timezone property (TZ).
///
/// At least one of the two fields must be set for the property to validate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timezone {
    pub offset: Option<UtcOffset>,
    /// Free-form label, usually a zone identifier such as "America/New_York".
    pub text: Option<String>,
}

impl Timezone {
    #[must_use]
    pub fn from_offset(offset: UtcOffset) -> Self {
        Self {
            offset: Some(offset),
            text: None,
        }
    }

    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            offset: None,
            text: Some(text.into()),
        }
    }

    #[must_use]
    pub fn new(offset: UtcOffset, text: impl Into<String>) -> Self {
        Self {
            offset: Some(offset),
            text: Some(text.into()),
        }
    }

    /// Standard (non-DST) offset of the zone named by `text`.
    ///
    /// Returns `None` when there is no text or it is not a known zone ID.
    #[must_use]
    pub fn resolve_offset(&self) -> Option<UtcOffset> {
        let tz = Tz::from_str(self.text.as_deref()?.trim()).ok()?;
        let now = Utc::now().naive_utc();
        let base = chrono::TimeZone::offset_from_utc_datetime(&tz, &now).base_utc_offset();
        i32::try_from(base.num_seconds())
            .ok()
            .map(UtcOffset::from_seconds)
    }
}

/// Transcoder for [`Timezone`].
///
/// By default a text-only timezone written as vCard 2.1 comes out empty.
/// [`TimezoneTranscoder::resolving`] instead looks the label up in the zone
/// database and writes its standard offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimezoneTranscoder {
    resolve_ids: bool,
}

impl TimezoneTranscoder {
    #[must_use]
    pub const fn new() -> Self {
        Self { resolve_ids: false }
    }

    #[must_use]
    pub const fn resolving() -> Self {
        Self { resolve_ids: true }
    }

    fn legacy_offset(&self, value: &Timezone) -> Option<UtcOffset> {
        value
            .offset
            .or_else(|| if self.resolve_ids { value.resolve_offset() } else { None })
    }

    /// 3.0 rule: declared text wins, otherwise try an offset and fall back
    /// to text with a warning.
    fn parse_lenient(value: String, data_type: Option<&VCardDataType>, ctx: &mut ParseContext) -> Timezone {
        if data_type == Some(&VCardDataType::Text) {
            return Timezone::from_text(value);
        }
        match UtcOffset::parse(&value) {
            Ok(offset) => Timezone::from_offset(offset),
            Err(_) => {
                ctx.warn(format!("Unable to parse UTC offset.  Treating as text: {value}"));
                Timezone::from_text(value)
            }
        }
    }

    /// 4.0 rule: declared text wins, declared offset must parse, otherwise
    /// try an offset and fall back to text silently.
    fn parse_strict(value: String, data_type: Option<&VCardDataType>) -> TranscodeResult<Timezone> {
        if data_type == Some(&VCardDataType::Text) {
            return Ok(Timezone::from_text(value));
        }
        match UtcOffset::parse(&value) {
            Ok(offset) => Ok(Timezone::from_offset(offset)),
            Err(e) if data_type == Some(&VCardDataType::UtcOffset) => {
                Err(TranscodeError::cannot_parse(e.to_string()))
            }
            Err(_) => Ok(Timezone::from_text(value)),
        }
    }
}

impl Transcoder for TimezoneTranscoder {
    type Value = Timezone;

    fn property_name(&self) -> &str {
        "TZ"
    }

    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType> {
        match version {
            VCardVersion::V2_1 | VCardVersion::V3_0 => Some(VCardDataType::UtcOffset),
            VCardVersion::V4_0 => Some(VCardDataType::Text),
        }
    }

    fn data_type(&self, value: &Timezone, version: VCardVersion) -> Option<VCardDataType> {
        let has_offset = value.offset.is_some();
        let has_text = value.text.is_some();
        let offset = match version {
            VCardVersion::V2_1 => true,
            VCardVersion::V3_0 => has_offset || !has_text,
            VCardVersion::V4_0 => has_offset && !has_text,
        };
        Some(if offset {
            VCardDataType::UtcOffset
        } else {
            VCardDataType::Text
        })
    }

    fn write_text(&self, value: &Timezone, version: VCardVersion) -> TranscodeResult<String> {
        let text = value.text.as_deref().map(|t| escape_text(t, version));
        let written = match version {
            VCardVersion::V2_1 => self.legacy_offset(value).map(|o| o.format(false)),
            VCardVersion::V3_0 => value.offset.map(|o| o.format(true)).or(text),
            VCardVersion::V4_0 => text.or_else(|| value.offset.map(|o| o.format(false))),
        };
        Ok(written.unwrap_or_default())
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<Timezone> {
        let value = unescape_text(value.trim());
        if value.is_empty() {
            return Ok(Timezone::default());
        }

        match ctx.version {
            VCardVersion::V2_1 => UtcOffset::parse(&value)
                .map(Timezone::from_offset)
                .map_err(|e| TranscodeError::cannot_parse(e.to_string())),
            VCardVersion::V3_0 => Ok(Self::parse_lenient(value, data_type, ctx)),
            VCardVersion::V4_0 => Self::parse_strict(value, data_type),
        }
    }

    fn write_xml(&self, value: &Timezone, element: &mut XCardElement) -> TranscodeResult<()> {
        match (&value.text, value.offset) {
            (Some(text), _) => element.append("text", text.as_str()),
            (None, Some(offset)) => element.append("utc-offset", offset.format(false)),
            (None, None) => element.append("text", ""),
        }
        Ok(())
    }

    fn parse_xml(
        &self,
        element: &XCardElement,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<Timezone> {
        if let Some(text) = element.first("text").filter(|t| !t.is_empty()) {
            return Ok(Timezone::from_text(text));
        }
        if let Some(offset) = element.first("utc-offset").filter(|o| !o.is_empty()) {
            return UtcOffset::parse(offset)
                .map(Timezone::from_offset)
                .map_err(|e| TranscodeError::cannot_parse(e.to_string()));
        }
        Err(TranscodeError::missing_xml_elements(&["text", "utc-offset"]))
    }

    fn write_json(&self, value: &Timezone) -> TranscodeResult<JCardValue> {
        let written = match (&value.text, value.offset) {
            (Some(text), _) => text.clone(),
            (None, Some(offset)) => offset.format(true),
            (None, None) => String::new(),
        };
        Ok(JCardValue::single(written))
    }

    fn parse_json(
        &self,
        value: &JCardValue,
        data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<Timezone> {
        let value = value.as_single();
        if value.is_empty() {
            return Ok(Timezone::default());
        }
        Self::parse_strict(value, data_type)
    }

    fn parse_html(
        &self,
        element: &HCardElement,
        _parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<Timezone> {
        let value = element.value();
        if value.is_empty() {
            return Ok(Timezone::default());
        }
        Ok(Self::parse_lenient(value, None, ctx))
    }

    fn validate(&self, value: &Timezone, version: VCardVersion, _card: &VCard) -> Vec<String> {
        let mut warnings = Vec::new();

        if value.offset.is_none() && value.text.is_none() {
            warnings.push("Property does not have text or UTC offset values associated with it.".to_string());
        }

        if version == VCardVersion::V2_1 && self.legacy_offset(value).is_none() {
            warnings.push("Property requires a UTC offset for its value in version 2.1.".to_string());
        }

        if value.offset.is_some_and(|o| !o.has_valid_minutes()) {
            warnings.push("Minute offset must be between 0 and 59.".to_string());
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use kunai_core::types::CompatibilityMode;

    use super::*;

    use VCardVersion::{V2_1, V3_0, V4_0};

    fn ctx(version: VCardVersion) -> ParseContext {
        ParseContext::new(version, CompatibilityMode::Rfc)
    }

    fn eastern() -> UtcOffset {
        UtcOffset::new(-5, 0)
    }

    fn parse(
        version: VCardVersion,
        value: &str,
        data_type: Option<VCardDataType>,
    ) -> (TranscodeResult<Timezone>, Vec<String>) {
        let mut ctx = ctx(version);
        let result = TimezoneTranscoder::new().parse_text(
            value,
            data_type.as_ref(),
            &mut VCardParameters::new(),
            &mut ctx,
        );
        (result, ctx.warnings)
    }

    #[test]
    fn encode_table() {
        let t = TimezoneTranscoder::new();
        let offset = Timezone::from_offset(eastern());
        let text = Timezone::from_text("America/New_York");
        let both = Timezone::new(eastern(), "America/New_York");

        let cases: &[(&Timezone, VCardVersion, &str, VCardDataType)] = &[
            (&offset, V2_1, "-0500", VCardDataType::UtcOffset),
            (&offset, V3_0, "-05:00", VCardDataType::UtcOffset),
            (&offset, V4_0, "-0500", VCardDataType::UtcOffset),
            (&text, V2_1, "", VCardDataType::UtcOffset),
            (&text, V3_0, "America/New_York", VCardDataType::Text),
            (&text, V4_0, "America/New_York", VCardDataType::Text),
            (&both, V2_1, "-0500", VCardDataType::UtcOffset),
            (&both, V3_0, "-05:00", VCardDataType::UtcOffset),
            (&both, V4_0, "America/New_York", VCardDataType::Text),
        ];

        for (value, version, expected, data_type) in cases {
            assert_eq!(
                t.write_text(value, *version).expect("writes"),
                *expected,
                "{value:?} in {version}"
            );
            assert_eq!(t.data_type(value, *version).as_ref(), Some(data_type));
        }
    }

    #[test]
    fn decode_table() {
        let text = || Timezone::from_text("America/New_York");
        let offset = || Timezone::from_offset(eastern());

        assert_eq!(parse(V2_1, "-0500", None).0, Ok(offset()));
        assert!(matches!(
            parse(V2_1, "America/New_York", None).0,
            Err(TranscodeError::CannotParse(_))
        ));

        assert_eq!(parse(V3_0, "America/New_York", Some(VCardDataType::Text)).0, Ok(text()));
        assert_eq!(parse(V3_0, "-05:00", None), (Ok(offset()), vec![]));
        let (result, warnings) = parse(V3_0, "America/New_York", None);
        assert_eq!(result, Ok(text()));
        assert_eq!(
            warnings,
            vec!["Unable to parse UTC offset.  Treating as text: America/New_York".to_string()]
        );

        assert_eq!(parse(V4_0, "-0500", Some(VCardDataType::Text)).0, Ok(Timezone::from_text("-0500")));
        assert_eq!(parse(V4_0, "-0500", Some(VCardDataType::UtcOffset)).0, Ok(offset()));
        assert!(matches!(
            parse(V4_0, "America/New_York", Some(VCardDataType::UtcOffset)).0,
            Err(TranscodeError::CannotParse(_))
        ));
        assert_eq!(parse(V4_0, "America/New_York", None), (Ok(text()), vec![]));
    }

    #[test]
    fn empty_value_is_empty_timezone() {
        assert_eq!(parse(V2_1, "", None).0, Ok(Timezone::default()));
    }

    #[test]
    fn xml_prefers_text_then_offset() {
        let t = TimezoneTranscoder::new();
        let mut element = XCardElement::new("tz");
        t.write_xml(&Timezone::from_offset(eastern()), &mut element)
            .expect("writes");
        assert_eq!(element.first("utc-offset"), Some("-0500"));

        let parsed = t
            .parse_xml(&element, &mut VCardParameters::new(), &mut ctx(V4_0))
            .expect("parses");
        assert_eq!(parsed, Timezone::from_offset(eastern()));

        let empty = XCardElement::new("tz");
        let err = t
            .parse_xml(&empty, &mut VCardParameters::new(), &mut ctx(V4_0))
            .expect_err("no children");
        assert_eq!(
            err,
            TranscodeError::MissingXmlElements {
                expected: vec!["text".into(), "utc-offset".into()]
            }
        );
    }

    #[test]
    fn json_uses_extended_offset() {
        let t = TimezoneTranscoder::new();
        let json = t
            .write_json(&Timezone::from_offset(eastern()))
            .expect("writes");
        assert_eq!(json.as_single(), "-05:00");
        let parsed = t
            .parse_json(
                &json,
                Some(&VCardDataType::UtcOffset),
                &mut VCardParameters::new(),
                &mut ctx(V4_0),
            )
            .expect("parses");
        assert_eq!(parsed, Timezone::from_offset(eastern()));
    }

    #[test]
    fn html_falls_back_to_text_with_warning() {
        let element = HCardElement::new("span")
            .with_attr("class", "tz")
            .with_text("Eastern");
        let mut ctx = ctx(V3_0);
        let parsed = TimezoneTranscoder::new()
            .parse_html(&element, &mut VCardParameters::new(), &mut ctx)
            .expect("parses");
        assert_eq!(parsed, Timezone::from_text("Eastern"));
        assert_eq!(ctx.warnings.len(), 1);
    }

    #[test]
    fn validation() {
        let t = TimezoneTranscoder::new();
        let card = VCard::new();

        assert_eq!(t.validate(&Timezone::default(), V4_0, &card).len(), 1);
        assert_eq!(t.validate(&Timezone::default(), V2_1, &card).len(), 2);
        assert!(t.validate(&Timezone::from_text("America/New_York"), V4_0, &card).is_empty());
        assert_eq!(
            t.validate(&Timezone::from_text("America/New_York"), V2_1, &card),
            vec!["Property requires a UTC offset for its value in version 2.1.".to_string()]
        );
        assert_eq!(
            t.validate(&Timezone::from_offset(UtcOffset::new(1, 60)), V4_0, &card),
            vec!["Minute offset must be between 0 and 59.".to_string()]
        );
    }

    #[test]
    fn resolving_transcoder_writes_standard_offset() {
        let t = TimezoneTranscoder::resolving();
        let tz = Timezone::from_text("America/New_York");
        assert_eq!(t.write_text(&tz, V2_1).expect("writes"), "-0500");
        assert!(t.validate(&tz, V2_1, &VCard::new()).is_empty());

        let unknown = Timezone::from_text("Mars/Olympus_Mons");
        assert_eq!(t.write_text(&unknown, V2_1).expect("writes"), "");
        assert_eq!(unknown.resolve_offset(), None);
    }

    #[test]
    fn resolve_half_hour_zone() {
        let tz = Timezone::from_text("Asia/Kolkata");
        assert_eq!(tz.resolve_offset(), Some(UtcOffset::new(5, 30)));
    }
}
