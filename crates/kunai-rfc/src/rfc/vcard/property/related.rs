//! RELATED: a link to another entity, as a URI or free text.

use crate::rfc::vcard::build::escape::escape_text;
use crate::rfc::vcard::core::{VCard, VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::parse::values::unescape_text;
use crate::rfc::vcard::transcode::{
    HCardElement, JCardValue, ParseContext, TranscodeError, TranscodeResult, Transcoder,
    XCardElement,
};

/// Related entity. The URI wins when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Related {
    pub uri: Option<String>,
    pub text: Option<String>,
}

impl Related {
    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            text: None,
        }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            uri: None,
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RelatedTranscoder;

impl Transcoder for RelatedTranscoder {
    type Value = Related;

    fn property_name(&self) -> &str {
        "RELATED"
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::Uri)
    }

    fn supported_versions(&self, _value: &Related) -> &'static [VCardVersion] {
        &[VCardVersion::V4_0]
    }

    fn data_type(&self, value: &Related, _version: VCardVersion) -> Option<VCardDataType> {
        if value.uri.is_none() && value.text.is_some() {
            Some(VCardDataType::Text)
        } else {
            Some(VCardDataType::Uri)
        }
    }

    fn write_text(&self, value: &Related, version: VCardVersion) -> TranscodeResult<String> {
        Ok(match (&value.uri, &value.text) {
            (Some(uri), _) => uri.clone(),
            (None, Some(text)) => escape_text(text, version),
            (None, None) => String::new(),
        })
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<Related> {
        if data_type == Some(&VCardDataType::Text) {
            return Ok(Related::text(unescape_text(value)));
        }
        Ok(Related::uri(value.trim()))
    }

    fn write_xml(&self, value: &Related, element: &mut XCardElement) -> TranscodeResult<()> {
        match (&value.uri, &value.text) {
            (Some(uri), _) => element.append("uri", uri.as_str()),
            (None, Some(text)) => element.append("text", text.as_str()),
            (None, None) => element.append("uri", ""),
        }
        Ok(())
    }

    fn parse_xml(
        &self,
        element: &XCardElement,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<Related> {
        if let Some(uri) = element.first("uri") {
            return Ok(Related::uri(uri));
        }
        if let Some(text) = element.first("text") {
            return Ok(Related::text(text));
        }
        Err(TranscodeError::missing_xml_elements(&["uri", "text"]))
    }

    fn write_json(&self, value: &Related) -> TranscodeResult<JCardValue> {
        let written = value
            .uri
            .as_deref()
            .or(value.text.as_deref())
            .unwrap_or_default();
        Ok(JCardValue::single(written))
    }

    fn parse_json(
        &self,
        value: &JCardValue,
        data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<Related> {
        let value = value.as_single();
        if data_type == Some(&VCardDataType::Text) {
            return Ok(Related::text(value));
        }
        Ok(Related::uri(value))
    }

    fn parse_html(
        &self,
        element: &HCardElement,
        parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<Related> {
        for type_value in element.types() {
            parameters.add_type(type_value);
        }
        if let Some(href) = element.attr("href").filter(|h| !h.is_empty()) {
            return Ok(Related::uri(href));
        }
        Ok(Related::text(element.value()))
    }

    fn validate(&self, value: &Related, _version: VCardVersion, _card: &VCard) -> Vec<String> {
        if value.uri.is_none() && value.text.is_none() {
            vec!["Property has neither a URI nor a text value associated with it.".to_string()]
        } else {
            Vec::new()
        }
    }
}
