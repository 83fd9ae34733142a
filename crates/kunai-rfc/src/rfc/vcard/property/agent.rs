//! AGENT: someone acting on the contact's behalf (2.1 and 3.0 only).
//!
//! The agent is either a URL or a whole nested card. A nested card cannot be
//! written by the transcoder itself; it reports
//! [`TranscodeError::EmbeddedVCard`] and leaves the layout to the writer.
//! When decoding, it reports [`TranscodeError::EmbeddedVCardText`] so the
//! reader can parse the nested card and hand it back through
//! [`Transcoder::embed`].

use crate::rfc::vcard::core::{VCard, VCardDataType, VCardParameters, VCardVersion};
use crate::rfc::vcard::parse::values::unescape_text;
use crate::rfc::vcard::transcode::{
    HCardElement, ParseContext, TranscodeError, TranscodeResult, Transcoder,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Agent {
    Url(String),
    VCard(Box<VCard>),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AgentTranscoder;

impl Transcoder for AgentTranscoder {
    type Value = Agent;

    fn property_name(&self) -> &str {
        "AGENT"
    }

    fn default_data_type(&self, _version: VCardVersion) -> Option<VCardDataType> {
        None
    }

    fn supported_versions(&self, _value: &Agent) -> &'static [VCardVersion] {
        &[VCardVersion::V2_1, VCardVersion::V3_0]
    }

    fn data_type(&self, value: &Agent, version: VCardVersion) -> Option<VCardDataType> {
        match (value, version) {
            (Agent::Url(_), VCardVersion::V2_1) => Some(VCardDataType::Url),
            (Agent::Url(_), _) => Some(VCardDataType::Uri),
            (Agent::VCard(_), _) => None,
        }
    }

    fn write_text(&self, value: &Agent, _version: VCardVersion) -> TranscodeResult<String> {
        match value {
            Agent::Url(url) => Ok(url.clone()),
            Agent::VCard(card) => Err(TranscodeError::EmbeddedVCard(card.clone())),
        }
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&VCardDataType>,
        _parameters: &mut VCardParameters,
        ctx: &mut ParseContext,
    ) -> TranscodeResult<Agent> {
        if data_type.is_some_and(VCardDataType::is_reference) {
            return Ok(Agent::Url(unescape_text(value.trim())));
        }
        match ctx.version {
            // The nested card follows on the next lines.
            VCardVersion::V2_1 => Err(TranscodeError::EmbeddedVCardText(String::new())),
            VCardVersion::V3_0 | VCardVersion::V4_0 => {
                Err(TranscodeError::EmbeddedVCardText(unescape_text(value)))
            }
        }
    }

    fn parse_html(
        &self,
        element: &HCardElement,
        _parameters: &mut VCardParameters,
        _ctx: &mut ParseContext,
    ) -> TranscodeResult<Agent> {
        if element.has_class("vcard") {
            return Err(TranscodeError::EmbeddedVCardText(String::new()));
        }
        if let Some(href) = element.attr("href").filter(|h| !h.is_empty()) {
            return Ok(Agent::Url(href.to_string()));
        }
        let value = element.value();
        if value.is_empty() {
            return Err(TranscodeError::cannot_parse("element has no link or nested card"));
        }
        Ok(Agent::Url(value))
    }

    fn embed(&self, card: VCard) -> Option<Agent> {
        Some(Agent::VCard(Box::new(card)))
    }
}
