//! The property envelope shared by every property kind.

use std::any::{Any, TypeId};
use std::fmt;

use super::parameter::VCardParameters;

/// Object-safe view of a property's typed value.
///
/// Implemented for every `'static` type that is `Debug + Clone + PartialEq`,
/// so property kinds are plain data structs and never implement this by hand.
pub trait PropertyValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn clone_value(&self) -> Box<dyn PropertyValue>;
    fn eq_value(&self, other: &dyn PropertyValue) -> bool;
    /// Rust type name, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<T> PropertyValue for T
where
    T: Any + fmt::Debug + Clone + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_value(&self) -> Box<dyn PropertyValue> {
        Box::new(self.clone())
    }

    fn eq_value(&self, other: &dyn PropertyValue) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// One property instance: group label, parameters and a typed value.
///
/// The value is type-erased so one card can hold any mix of property kinds;
/// use [`VCardProperty::downcast_ref`] to get the concrete value back.
pub struct VCardProperty {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Stored parameters. Writers derive VALUE and ENCODING themselves.
    pub parameters: VCardParameters,
    value: Box<dyn PropertyValue>,
}

impl VCardProperty {
    /// Wraps a typed value with no group and no parameters.
    #[must_use]
    pub fn new<T: PropertyValue>(value: T) -> Self {
        Self::from_boxed(Box::new(value))
    }

    #[must_use]
    pub fn from_boxed(value: Box<dyn PropertyValue>) -> Self {
        Self {
            group: None,
            parameters: VCardParameters::new(),
            value,
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parameters.add(name, value);
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: VCardParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// The erased value.
    #[must_use]
    pub fn value(&self) -> &dyn PropertyValue {
        &*self.value
    }

    /// `TypeId` of the concrete value, used for encode-side transcoder lookup.
    #[must_use]
    pub fn value_type_id(&self) -> TypeId {
        (*self.value).as_any().type_id()
    }

    #[must_use]
    pub fn value_type_name(&self) -> &'static str {
        (*self.value).type_name()
    }

    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        (*self.value).as_any().is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        (*self.value).as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        (*self.value).as_any_mut().downcast_mut::<T>()
    }
}

impl Clone for VCardProperty {
    fn clone(&self) -> Self {
        Self {
            group: self.group.clone(),
            parameters: self.parameters.clone(),
            value: (*self.value).clone_value(),
        }
    }
}

impl PartialEq for VCardProperty {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group
            && self.parameters == other.parameters
            && (*self.value).eq_value(&*other.value)
    }
}

impl fmt::Debug for VCardProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VCardProperty")
            .field("group", &self.group)
            .field("parameters", &self.parameters)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Nickname(String);

    #[derive(Debug, Clone, PartialEq)]
    struct Other(u8);

    #[test]
    fn downcast_round_trip() {
        let mut prop = VCardProperty::new(Nickname("Jim".into())).with_group("item1");
        assert!(prop.is::<Nickname>());
        assert!(!prop.is::<Other>());
        assert_eq!(prop.downcast_ref::<Nickname>(), Some(&Nickname("Jim".into())));
        assert_eq!(prop.value_type_id(), TypeId::of::<Nickname>());

        if let Some(nick) = prop.downcast_mut::<Nickname>() {
            nick.0.push_str("my");
        }
        assert_eq!(prop.downcast_ref::<Nickname>(), Some(&Nickname("Jimmy".into())));
    }

    #[test]
    fn equality_compares_erased_values() {
        let a = VCardProperty::new(Nickname("a".into()));
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, VCardProperty::new(Nickname("b".into())));
        assert_ne!(a, VCardProperty::new(Other(1)));
        assert_ne!(a, b.with_parameter("TYPE", "home"));
    }
}
