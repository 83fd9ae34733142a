//! vCard document type.

use super::property::{PropertyValue, VCardProperty};
use super::version::VCardVersion;

/// A complete vCard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VCard {
    /// Version the card was read as, or is meant to be written as.
    pub version: VCardVersion,
    /// All properties in order of appearance.
    pub properties: Vec<VCardProperty>,
}

impl VCard {
    /// Creates an empty vCard 4.0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty vCard with the specified version.
    #[must_use]
    pub fn with_version(version: VCardVersion) -> Self {
        Self {
            version,
            properties: Vec::new(),
        }
    }

    /// Adds a property envelope.
    pub fn add_property(&mut self, property: VCardProperty) {
        self.properties.push(property);
    }

    /// Wraps a typed value in an envelope, adds it and returns the envelope
    /// for further tweaking (group, parameters).
    pub fn add<T: PropertyValue>(&mut self, value: T) -> &mut VCardProperty {
        let index = self.properties.len();
        self.properties.push(VCardProperty::new(value));
        &mut self.properties[index]
    }

    /// First property value of type `T`.
    #[must_use]
    pub fn first<T: 'static>(&self) -> Option<&T> {
        self.properties.iter().find_map(|p| p.downcast_ref::<T>())
    }

    /// Every property value of type `T`, in order.
    pub fn all<T: 'static>(&self) -> impl Iterator<Item = &T> {
        self.properties.iter().filter_map(|p| p.downcast_ref::<T>())
    }

    /// Whether any property holds a `T`.
    #[must_use]
    pub fn has<T: 'static>(&self) -> bool {
        self.properties.iter().any(|p| p.is::<T>())
    }

    /// Removes every property holding a `T`, returning how many were removed.
    pub fn remove_all<T: 'static>(&mut self) -> usize {
        let before = self.properties.len();
        self.properties.retain(|p| !p.is::<T>());
        before - self.properties.len()
    }

    /// Properties sharing a group label, in order.
    pub fn group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a VCardProperty> {
        self.properties
            .iter()
            .filter(move |p| p.group.as_deref().is_some_and(|g| g.eq_ignore_ascii_case(group)))
    }
}
