//! Properties with no registered transcoder.
//!
//! Raw values are stored and re-emitted exactly as read, escapes included.

use crate::rfc::vcard::core::{VCard, VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::transcode::{
    JCardValue, ParseContext, TranscodeResult, Transcoder, XCardElement,
};

/// An unrecognized or experimental property (e.g. `X-SKYPE`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperty {
    /// Wire name as read.
    pub name: String,
    /// Literal value, still escaped.
    pub value: String,
    /// Declared data type, if any.
    pub data_type: Option<VCardDataType>,
}

impl RawProperty {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            data_type: None,
        }
    }
}

/// Transcoder for [`RawProperty`].
///
/// The registered instance has an empty name and takes the wire name from
/// each value. Readers create named instances for each unknown name.
#[derive(Debug, Clone, Default)]
pub struct RawTranscoder {
    name: String,
}

impl RawTranscoder {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_ascii_uppercase(),
        }
    }

    fn build(&self, value: impl Into<String>, data_type: Option<VCardDataType>) -> RawProperty {
        RawProperty {
            name: self.name.clone(),
            value: value.into(),
            data_type,
        }
    }
}

impl Transcoder for RawTranscoder {
    type Value = RawProperty;

    fn property_name(&self) -> &str {
        &self.name
    }

    fn wire_name<'a>(&'a self, value: &'a RawProperty) -> &'a str {
        &value.name
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        None
    }

    fn data_type(&self, value: &RawProperty, _version: VCardVersion) -> Option<VCardDataType> {
        value.data_type.clone()
    }

    fn write_text(&self, value: &RawProperty, _version: VCardVersion) -> TranscodeResult<String> {
        Ok(value.value.clone())
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<RawProperty> {
        Ok(self.build(value, data_type.cloned()))
    }

    fn write_xml(&self, value: &RawProperty, element: &mut XCardElement) -> TranscodeResult<()> {
        element.append_value(value.data_type.as_ref(), value.value.as_str());
        Ok(())
    }

    fn parse_xml(
        &self,
        element: &XCardElement,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<RawProperty> {
        // An empty element is an empty value.
        let (data_type, value) = element.first_value().unwrap_or((None, ""));
        Ok(self.build(value, data_type))
    }

    fn write_json(&self, value: &RawProperty) -> TranscodeResult<JCardValue> {
        Ok(JCardValue::single(value.value.as_str()))
    }

    fn parse_json(
        &self,
        value: &JCardValue,
        data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<RawProperty> {
        Ok(self.build(value.as_single(), data_type.cloned()))
    }

    fn validate(&self, value: &RawProperty, _version: VCardVersion, _card: &VCard) -> Vec<String> {
        let legal = !value.name.is_empty()
            && value
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if legal {
            Vec::new()
        } else {
            vec![format!("Property name \"{}\" contains illegal characters.", value.name)]
        }
    }
}
