//! N: the structured name.

use crate::rfc::vcard::build::escape::escape_text;
use crate::rfc::vcard::core::{VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::parse::values::{split_component, split_structured};
use crate::rfc::vcard::transcode::{
    HCardElement, JCardValue, ParseContext, TranscodeResult, Transcoder, XCardElement,
};

/// Structured name (N property).
///
/// All components are optional and may hold several values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredName {
    /// Family names (surnames).
    pub family: Vec<String>,
    /// Given names (first names).
    pub given: Vec<String>,
    /// Additional names (middle names).
    pub additional: Vec<String>,
    /// Honorific prefixes (e.g., "Mr.", "Dr.").
    pub prefixes: Vec<String>,
    /// Honorific suffixes (e.g., "Jr.", "M.D.").
    pub suffixes: Vec<String>,
}

/// xCard element and hCard class for each component, in wire order.
const COMPONENTS: [(&str, &str); 5] = [
    ("surname", "family-name"),
    ("given", "given-name"),
    ("additional", "additional-name"),
    ("prefix", "honorific-prefix"),
    ("suffix", "honorific-suffix"),
];

impl StructuredName {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a structured name with family and given names.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: vec![family.into()],
            given: vec![given.into()],
            ..Self::default()
        }
    }

    /// Returns whether every component is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components().iter().all(|c| c.is_empty())
    }

    fn components(&self) -> [&Vec<String>; 5] {
        [
            &self.family,
            &self.given,
            &self.additional,
            &self.prefixes,
            &self.suffixes,
        ]
    }

    fn from_components(mut components: Vec<Vec<String>>) -> Self {
        components.resize_with(5, Vec::new);
        let mut it = components.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Self {
            family: next(),
            given: next(),
            additional: next(),
            prefixes: next(),
            suffixes: next(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredNameTranscoder;

impl Transcoder for StructuredNameTranscoder {
    type Value = StructuredName;

    fn property_name(&self) -> &str {
        "N"
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        Some(VCardDataType::Text)
    }

    fn write_text(&self, value: &StructuredName, version: VCardVersion) -> TranscodeResult<String> {
        let components: Vec<String> = value
            .components()
            .iter()
            .map(|values| {
                values
                    .iter()
                    .map(|v| escape_text(v, version))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();
        Ok(components.join(";"))
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<StructuredName> {
        let components = split_structured(value)
            .into_iter()
            .map(|c| split_component(c).into_iter().filter(|v| !v.is_empty()).collect::<Vec<_>>())
            .collect();
        Ok(StructuredName::from_components(components))
    }

    fn write_xml(&self, value: &StructuredName, element: &mut XCardElement) -> TranscodeResult<()> {
        for ((name, _), values) in COMPONENTS.iter().zip(value.components()) {
            if values.is_empty() {
                element.append(*name, "");
            }
            for v in values {
                element.append(*name, v.as_str());
            }
        }
        Ok(())
    }

    fn parse_xml(
        &self,
        element: &XCardElement,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<StructuredName> {
        let components = COMPONENTS
            .iter()
            .map(|(name, _)| {
                element
                    .all(name)
                    .into_iter()
                    .filter(|v| !v.is_empty())
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        Ok(StructuredName::from_components(components))
    }

    fn write_json(&self, value: &StructuredName) -> TranscodeResult<JCardValue> {
        let components: Vec<Vec<String>> = value.components().into_iter().cloned().collect();
        Ok(JCardValue::structured(&components))
    }

    fn parse_json(
        &self,
        value: &JCardValue,
        _data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<StructuredName> {
        let components = value
            .as_structured()
            .into_iter()
            .map(|values| values.into_iter().filter(|v| !v.is_empty()).collect::<Vec<_>>())
            .collect();
        Ok(StructuredName::from_components(components))
    }

    fn parse_html(
        &self,
        element: &HCardElement,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<StructuredName> {
        let components = COMPONENTS
            .iter()
            .map(|(_, class)| {
                element
                    .find_by_class(class, false)
                    .into_iter()
                    .map(HCardElement::value)
                    .filter(|v| !v.is_empty())
                    .collect::<Vec<_>>()
            })
            .collect();
        Ok(StructuredName::from_components(components))
    }
}
