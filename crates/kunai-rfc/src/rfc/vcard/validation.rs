//! ## Summary
//! Card validation.
//!
//! Validation never blocks reading or writing. It gathers advisory messages
//! into a [`ValidationWarnings`] report, grouped by the property that caused
//! them. Document-level problems (a required property is missing) are
//! grouped under no property.

use std::fmt;

use crate::rfc::vcard::core::{VCard, VCardProperty, VCardVersion};
use crate::rfc::vcard::property::{FormattedName, StructuredName};
use crate::rfc::vcard::transcode::TranscoderRegistry;

/// Messages for one property, or for the card as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning<'a> {
    /// The offending property; `None` for document-level messages.
    pub property: Option<&'a VCardProperty>,
    /// Property name as written on the wire, when there is a property.
    pub property_name: Option<String>,
    pub messages: Vec<String>,
}

/// ## Summary
/// A validation report.
///
/// Groups are in property order, document-level messages first. A property
/// that produced no messages has no group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationWarnings<'a> {
    groups: Vec<ValidationWarning<'a>>,
}

impl<'a> ValidationWarnings<'a> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups, not messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationWarning<'a>> {
        self.groups.iter()
    }

    /// Messages recorded against this exact property instance.
    #[must_use]
    pub fn for_property(&self, property: &VCardProperty) -> &[String] {
        self.groups
            .iter()
            .find(|g| g.property.is_some_and(|p| std::ptr::eq(p, property)))
            .map_or(&[], |g| g.messages.as_slice())
    }

    /// Document-level messages.
    #[must_use]
    pub fn for_document(&self) -> &[String] {
        self.groups
            .iter()
            .find(|g| g.property.is_none())
            .map_or(&[], |g| g.messages.as_slice())
    }

    /// Every message, in report order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.messages.iter().map(String::as_str))
    }

    fn push(&mut self, property: Option<&'a VCardProperty>, property_name: Option<String>, messages: Vec<String>) {
        if messages.is_empty() {
            return;
        }
        self.groups.push(ValidationWarning {
            property,
            property_name,
            messages,
        });
    }
}

impl<'r, 'a> IntoIterator for &'r ValidationWarnings<'a> {
    type Item = &'r ValidationWarning<'a>;
    type IntoIter = std::slice::Iter<'r, ValidationWarning<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl fmt::Display for ValidationWarnings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            let label = group.property_name.as_deref().unwrap_or("VCARD");
            for message in &group.messages {
                writeln!(f, "[{label}] {message}")?;
            }
        }
        Ok(())
    }
}

impl VCard {
    /// ## Summary
    /// Checks this card against `version`.
    ///
    /// For each property, in order: whether its kind exists in `version`,
    /// whether its parameters are legal there, and whatever its transcoder
    /// checks. The card must also carry the properties `version` requires
    /// (FN in 4.0, FN and N in 3.0, N in 2.1).
    #[must_use]
    pub fn validate<'a>(&'a self, version: VCardVersion, registry: &TranscoderRegistry) -> ValidationWarnings<'a> {
        let mut report = ValidationWarnings::default();

        report.push(None, None, self.document_messages(version));

        for property in &self.properties {
            let Some(transcoder) = registry.for_property(property) else {
                report.push(
                    Some(property),
                    Some(property.value_type_name().to_string()),
                    vec![format!(
                        "No transcoder is registered for {}.",
                        property.value_type_name()
                    )],
                );
                continue;
            };

            let mut messages = Vec::new();
            if let Ok(versions) = transcoder.versions_of(property)
                && !versions.contains(&version)
            {
                messages.push(format!("Property is not supported in version {version}."));
            }
            messages.extend(property.parameters.validate(version));
            messages.extend(transcoder.validate_property(property, version, self));

            let name = transcoder
                .wire_name_of(property)
                .map_or_else(|_| transcoder.name().to_string(), str::to_string);
            report.push(Some(property), Some(name), messages);
        }

        report
    }

    fn document_messages(&self, version: VCardVersion) -> Vec<String> {
        let (needs_fn, needs_n) = match version {
            VCardVersion::V2_1 => (false, true),
            VCardVersion::V3_0 => (true, true),
            VCardVersion::V4_0 => (true, false),
        };

        let mut messages = Vec::new();
        if needs_fn && !self.has::<FormattedName>() {
            messages.push(format!("An FN property is required in version {version}."));
        }
        if needs_n && !self.has::<StructuredName>() {
            messages.push(format!("An N property is required in version {version}."));
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::property::{Kind, Related, Telephone, Timezone};

    fn named() -> VCard {
        let mut card = VCard::new();
        card.add(FormattedName::new("John Doe"));
        card.add(StructuredName::simple("Doe", "John"));
        card
    }

    #[test]
    fn valid_card_has_empty_report() {
        let registry = TranscoderRegistry::new();
        let card = named();
        for version in [VCardVersion::V2_1, VCardVersion::V3_0, VCardVersion::V4_0] {
            let report = card.validate(version, &registry);
            assert!(report.is_empty(), "{version}: {report}");
        }
    }

    #[test]
    fn required_properties_per_version() {
        let registry = TranscoderRegistry::new();
        let empty = VCard::new();

        assert_eq!(empty.validate(VCardVersion::V4_0, &registry).for_document().len(), 1);
        assert_eq!(empty.validate(VCardVersion::V3_0, &registry).for_document().len(), 2);

        let mut only_fn = VCard::new();
        only_fn.add(FormattedName::new("A"));
        let report = only_fn.validate(VCardVersion::V2_1, &registry);
        assert_eq!(report.for_document(), ["An N property is required in version 2.1."]);
    }

    #[test]
    fn groups_follow_property_order() {
        let registry = TranscoderRegistry::new();
        let mut card = named();
        card.add(Kind::new("individual"));
        card.add(Related::default());
        card.add(Timezone::from_text("America/New_York"));

        let report = card.validate(VCardVersion::V2_1, &registry);
        let names: Vec<_> = report.iter().map(|g| g.property_name.as_deref()).collect();
        assert_eq!(names, [Some("KIND"), Some("RELATED"), Some("TZ")]);

        let related = &card.properties[3];
        assert!(
            report
                .for_property(related)
                .contains(&"Property is not supported in version 2.1.".to_string())
        );
    }

    #[test]
    fn related_without_value_warns_once_per_version() {
        let registry = TranscoderRegistry::new();
        let mut card = named();
        card.add(Related::default());
        let report = card.validate(VCardVersion::V4_0, &registry);
        assert_eq!(report.for_property(&card.properties[2]).len(), 1);
    }

    #[test]
    fn illegal_parameters_are_reported() {
        let registry = TranscoderRegistry::new();
        let mut card = named();
        let tel = card.add(Telephone::new("+1-555"));
        tel.parameters.set("PREF", "200");
        tel.parameters.add_type("x400");

        let report = card.validate(VCardVersion::V4_0, &registry);
        let messages = report.for_property(&card.properties[2]);
        assert_eq!(messages.len(), 2, "{messages:?}");
    }

    #[test]
    fn unregistered_type_is_reported() {
        #[derive(Debug, Clone, PartialEq)]
        struct Custom;

        let registry = TranscoderRegistry::new();
        let mut card = named();
        card.add(Custom);
        let report = card.validate(VCardVersion::V4_0, &registry);
        assert_eq!(report.len(), 1);
        assert!(report.to_string().contains("] No transcoder is registered for"));
    }
}
