//! The per-property transcoder contract.
//!
//! A [`Transcoder`] is written once per property kind against its concrete
//! value type. [`DynTranscoder`] is the type-erased face of the same object
//! that readers, writers and the registry work with; every `Transcoder` gets
//! it through a blanket impl, which is also where the generic parameter
//! policy (VALUE derivation, PREF translation) lives.

use std::any::TypeId;

use kunai_core::types::CompatibilityMode;

use super::error::{TranscodeError, TranscodeResult};
use super::hcard_element::HCardElement;
use super::jcard_value::JCardValue;
use super::xcard_element::XCardElement;
use crate::rfc::vcard::build::escape::escape_text;
use crate::rfc::vcard::core::{
    ALL_VERSIONS, PropertyValue, VCard, VCardDataType, VCardParameters, VCardProperty,
    VCardVersion, names, types,
};
use crate::rfc::vcard::parse::values::unescape_text;

/// State threaded through one document's decode.
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Version of the document being read.
    pub version: VCardVersion,
    pub compatibility: CompatibilityMode,
    /// Non-fatal problems noticed while decoding the current property.
    pub warnings: Vec<String>,
}

impl ParseContext {
    #[must_use]
    pub fn new(version: VCardVersion, compatibility: CompatibilityMode) -> Self {
        Self {
            version,
            compatibility,
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Encodes and decodes one property kind in every dialect and version.
///
/// Only the plain-text pair is required. The xCard, jCard and hCard methods
/// default to going through the text codec with version 4.0 escaping, which
/// is right for any property whose value is a single string.
pub trait Transcoder: Send + Sync + 'static {
    /// Concrete property value this transcoder handles.
    type Value: PropertyValue + Clone;

    /// Wire name, uppercase (e.g. "TZ").
    fn property_name(&self) -> &str;

    /// Wire name for a particular value. Only differs from
    /// [`Transcoder::property_name`] for properties that carry their own name.
    fn wire_name<'a>(&'a self, _value: &'a Self::Value) -> &'a str {
        self.property_name()
    }

    /// Data type implied when no VALUE parameter is present.
    fn default_data_type(&self, version: VCardVersion) -> Option<VCardDataType>;

    /// Versions this value can be written in.
    fn supported_versions(&self, _value: &Self::Value) -> &'static [VCardVersion] {
        ALL_VERSIONS
    }

    /// Data type actually written for this value.
    fn data_type(&self, _value: &Self::Value, version: VCardVersion) -> Option<VCardDataType> {
        self.default_data_type(version)
    }

    /// Adjusts the outgoing parameters after the generic VALUE and PREF
    /// handling has run.
    fn prepare_parameters(
        &self,
        _value: &Self::Value,
        _parameters: &mut VCardParameters,
        _version: VCardVersion,
        _card: &VCard,
    ) {
    }

    /// Plain-text value, already escaped for `version`.
    ///
    /// ## Errors
    /// [`TranscodeError::SkipMe`] or [`TranscodeError::EmbeddedVCard`] when the
    /// value cannot be written as text.
    fn write_text(&self, value: &Self::Value, version: VCardVersion) -> TranscodeResult<String>;

    /// Decodes an escaped plain-text value.
    ///
    /// Recognized parameters (ENCODING, MEDIATYPE) may be consumed from
    /// `parameters`; whatever is left is stored on the property.
    ///
    /// ## Errors
    /// [`TranscodeError::CannotParse`] when the value does not fit the grammar
    /// and no fallback applies.
    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<Self::Value>;

    /// Appends value children to an xCard property element.
    ///
    /// ## Errors
    /// Same as [`Transcoder::write_text`].
    fn write_xml(&self, value: &Self::Value, element: &mut XCardElement) -> TranscodeResult<()> {
        let text = self.write_text(value, VCardVersion::V4_0)?;
        let data_type = self.data_type(value, VCardVersion::V4_0);
        element.append_value(data_type.as_ref(), unescape_text(&text));
        Ok(())
    }

    /// Decodes an xCard property element.
    ///
    /// ## Errors
    /// [`TranscodeError::MissingXmlElements`] when no value child is present.
    fn parse_xml(
        &self,
        element: &XCardElement,
        parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<Self::Value> {
        let default = self.default_data_type(VCardVersion::V4_0);
        let expected = default.as_ref().map_or("unknown", VCardDataType::as_str);
        let Some((data_type, value)) = element.first_value() else {
            return Err(TranscodeError::missing_xml_elements(&[expected]));
        };
        let escaped = escape_text(value, VCardVersion::V4_0);
        self.parse_text(&escaped, data_type.as_ref(), parameters, ctx)
    }

    /// jCard value slot(s).
    ///
    /// ## Errors
    /// Same as [`Transcoder::write_text`].
    fn write_json(&self, value: &Self::Value) -> TranscodeResult<JCardValue> {
        let text = self.write_text(value, VCardVersion::V4_0)?;
        Ok(JCardValue::single(unescape_text(&text)))
    }

    /// Decodes jCard value slot(s).
    ///
    /// ## Errors
    /// Same as [`Transcoder::parse_text`].
    fn parse_json(
        &self,
        value: &JCardValue,
        data_type: Option<&VCardDataType>,
        parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<Self::Value> {
        let escaped = escape_text(&value.as_single(), VCardVersion::V4_0);
        self.parse_text(&escaped, data_type, parameters, ctx)
    }

    /// Decodes an hCard element.
    ///
    /// ## Errors
    /// Same as [`Transcoder::parse_text`].
    fn parse_html(
        &self,
        element: &HCardElement,
        parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<Self::Value> {
        let escaped = escape_text(&element.value(), VCardVersion::V3_0);
        self.parse_text(&escaped, None, parameters, ctx)
    }

    /// Builds a value around a nested card the reader parsed after this
    /// transcoder returned [`TranscodeError::EmbeddedVCardText`].
    fn embed(&self, _card: VCard) -> Option<Self::Value> {
        None
    }

    /// Semantic problems with the value for `version`. Never fails.
    fn validate(&self, _value: &Self::Value, _version: VCardVersion, _card: &VCard) -> Vec<String> {
        Vec::new()
    }
}

/// Type-erased transcoder working on [`VCardProperty`] envelopes.
pub trait DynTranscoder: Send + Sync {
    /// Registered wire name, uppercase; empty for the raw catch-all.
    fn name(&self) -> &str;

    /// `TypeId` of the value type handled.
    fn value_type_id(&self) -> TypeId;

    /// Name of the value type handled, for diagnostics.
    fn value_type_name(&self) -> &'static str;

    /// Wire name to emit for this property.
    ///
    /// ## Errors
    /// [`TranscodeError::TypeMismatch`] if the property holds another type.
    fn wire_name_of<'a>(&'a self, property: &'a VCardProperty) -> TranscodeResult<&'a str>;

    /// ## Errors
    /// [`TranscodeError::TypeMismatch`] if the property holds another type.
    fn versions_of(&self, property: &VCardProperty) -> TranscodeResult<&'static [VCardVersion]>;

    /// ## Errors
    /// [`TranscodeError::TypeMismatch`] if the property holds another type.
    fn data_type_of(
        &self,
        property: &VCardProperty,
        version: VCardVersion,
    ) -> TranscodeResult<Option<VCardDataType>>;

    /// The exact parameters to emit for `version`.
    ///
    /// ## Errors
    /// [`TranscodeError::TypeMismatch`] if the property holds another type.
    fn parameters_for(
        &self,
        property: &VCardProperty,
        version: VCardVersion,
        card: &VCard,
    ) -> TranscodeResult<VCardParameters>;

    /// ## Errors
    /// See [`Transcoder::write_text`].
    fn encode_text(&self, property: &VCardProperty, version: VCardVersion)
    -> TranscodeResult<String>;

    /// Decodes a text value. VALUE is taken out of `parameters` and passed
    /// to the transcoder as the declared data type.
    ///
    /// ## Errors
    /// See [`Transcoder::parse_text`].
    fn decode_text(
        &self,
        value: &str,
        parameters: VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<VCardProperty>;

    /// ## Errors
    /// See [`Transcoder::write_xml`].
    fn encode_xml(&self, property: &VCardProperty, element: &mut XCardElement)
    -> TranscodeResult<()>;

    /// ## Errors
    /// See [`Transcoder::parse_xml`].
    fn decode_xml(
        &self,
        element: &XCardElement,
        parameters: VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<VCardProperty>;

    /// ## Errors
    /// See [`Transcoder::write_json`].
    fn encode_json(&self, property: &VCardProperty) -> TranscodeResult<JCardValue>;

    /// ## Errors
    /// See [`Transcoder::parse_json`].
    fn decode_json(
        &self,
        value: &JCardValue,
        data_type: Option<&VCardDataType>,
        parameters: VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<VCardProperty>;

    /// ## Errors
    /// See [`Transcoder::parse_html`].
    fn decode_html(
        &self,
        element: &HCardElement,
        parameters: VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<VCardProperty>;

    /// Wraps a nested card, if this property kind can hold one.
    fn embed_card(&self, card: VCard, parameters: VCardParameters) -> Option<VCardProperty>;

    /// Transcoder-specific warnings. A type mismatch yields one warning.
    fn validate_property(
        &self,
        property: &VCardProperty,
        version: VCardVersion,
        card: &VCard,
    ) -> Vec<String>;
}

impl<T: Transcoder> DynTranscoder for T {
    fn name(&self) -> &str {
        self.property_name()
    }

    fn value_type_id(&self) -> TypeId {
        TypeId::of::<T::Value>()
    }

    fn value_type_name(&self) -> &'static str {
        std::any::type_name::<T::Value>()
    }

    fn wire_name_of<'a>(&'a self, property: &'a VCardProperty) -> TranscodeResult<&'a str> {
        Ok(self.wire_name(downcast::<T::Value>(property)?))
    }

    fn versions_of(&self, property: &VCardProperty) -> TranscodeResult<&'static [VCardVersion]> {
        Ok(self.supported_versions(downcast::<T::Value>(property)?))
    }

    fn data_type_of(
        &self,
        property: &VCardProperty,
        version: VCardVersion,
    ) -> TranscodeResult<Option<VCardDataType>> {
        Ok(self.data_type(downcast::<T::Value>(property)?, version))
    }

    fn parameters_for(
        &self,
        property: &VCardProperty,
        version: VCardVersion,
        card: &VCard,
    ) -> TranscodeResult<VCardParameters> {
        let value = downcast::<T::Value>(property)?;
        let mut parameters = property.parameters.clone();

        parameters.remove(names::VALUE);
        let data_type = self.data_type(value, version);
        if data_type.is_some() && data_type != self.default_data_type(version) {
            parameters.set_value_type(data_type.as_ref());
        }

        translate_pref(&mut parameters, version);
        self.prepare_parameters(value, &mut parameters, version, card);
        Ok(parameters)
    }

    fn encode_text(
        &self,
        property: &VCardProperty,
        version: VCardVersion,
    ) -> TranscodeResult<String> {
        self.write_text(downcast::<T::Value>(property)?, version)
    }

    fn decode_text(
        &self,
        value: &str,
        mut parameters: VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<VCardProperty> {
        let data_type = parameters.value_type();
        parameters.remove(names::VALUE);
        let decoded = self.parse_text(value, data_type.as_ref(), &mut parameters, ctx)?;
        Ok(VCardProperty::new(decoded).with_parameters(parameters))
    }

    fn encode_xml(
        &self,
        property: &VCardProperty,
        element: &mut XCardElement,
    ) -> TranscodeResult<()> {
        self.write_xml(downcast::<T::Value>(property)?, element)
    }

    fn decode_xml(
        &self,
        element: &XCardElement,
        mut parameters: VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<VCardProperty> {
        parameters.remove(names::VALUE);
        let decoded = self.parse_xml(element, &mut parameters, ctx)?;
        Ok(VCardProperty::new(decoded).with_parameters(parameters))
    }

    fn encode_json(&self, property: &VCardProperty) -> TranscodeResult<JCardValue> {
        self.write_json(downcast::<T::Value>(property)?)
    }

    fn decode_json(
        &self,
        value: &JCardValue,
        data_type: Option<&VCardDataType>,
        mut parameters: VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<VCardProperty> {
        parameters.remove(names::VALUE);
        let decoded = self.parse_json(value, data_type, &mut parameters, ctx)?;
        Ok(VCardProperty::new(decoded).with_parameters(parameters))
    }

    fn decode_html(
        &self,
        element: &HCardElement,
        mut parameters: VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<VCardProperty> {
        let decoded = self.parse_html(element, &mut parameters, ctx)?;
        Ok(VCardProperty::new(decoded).with_parameters(parameters))
    }

    fn embed_card(&self, card: VCard, parameters: VCardParameters) -> Option<VCardProperty> {
        self.embed(card)
            .map(|value| VCardProperty::new(value).with_parameters(parameters))
    }

    fn validate_property(
        &self,
        property: &VCardProperty,
        version: VCardVersion,
        card: &VCard,
    ) -> Vec<String> {
        match downcast::<T::Value>(property) {
            Ok(value) => self.validate(value, version, card),
            Err(e) => vec![e.to_string()],
        }
    }
}

fn downcast<V: PropertyValue>(property: &VCardProperty) -> TranscodeResult<&V> {
    property
        .downcast_ref::<V>()
        .ok_or_else(|| TranscodeError::TypeMismatch {
            expected: std::any::type_name::<V>(),
            found: property.value_type_name(),
        })
}

/// Moves preference between the PREF parameter (4.0) and TYPE=pref (2.1, 3.0).
fn translate_pref(parameters: &mut VCardParameters, version: VCardVersion) {
    match version {
        VCardVersion::V2_1 | VCardVersion::V3_0 => {
            if !parameters.remove(names::PREF).is_empty() && !parameters.has_type(types::PREF) {
                parameters.add_type(types::PREF);
            }
        }
        VCardVersion::V4_0 => {
            if parameters.remove_type(types::PREF) && parameters.pref().is_none() {
                parameters.set_pref(Some(1));
            }
        }
    }
}
