//! The value children of one xCard property element.

use crate::rfc::vcard::core::VCardDataType;

/// One child element of an xCard property element, e.g. `<text>Doe</text>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XCardChild {
    /// Local element name (a data type name or a structured component name).
    pub name: String,
    pub value: String,
}

/// The value side of an xCard property element.
///
/// Parameters live in their own `<parameters>` block and are handled by the
/// xCard reader and writer; transcoders only see and produce value children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XCardElement {
    /// Property element name, lowercase.
    pub property_name: String,
    children: Vec<XCardChild>,
}

impl XCardElement {
    #[must_use]
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into().to_ascii_lowercase(),
            children: Vec::new(),
        }
    }

    /// Appends a child element.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.children.push(XCardChild {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Appends a value child named after a data type, `<unknown>` when none.
    pub fn append_value(&mut self, data_type: Option<&VCardDataType>, value: impl Into<String>) {
        let name = data_type.map_or("unknown", VCardDataType::as_str);
        self.append(name, value);
    }

    #[must_use]
    pub fn children(&self) -> &[XCardChild] {
        &self.children
    }

    /// Text of the first child with this name.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.children
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.value.as_str())
    }

    /// Text of every child with this name.
    #[must_use]
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.children
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.value.as_str())
            .collect()
    }

    /// The first child whose name is a data type, along with that type.
    /// `<unknown>` yields `None` as the type.
    #[must_use]
    pub fn first_value(&self) -> Option<(Option<VCardDataType>, &str)> {
        self.children.first().map(|c| {
            let data_type = if c.name.eq_ignore_ascii_case("unknown") {
                None
            } else {
                Some(VCardDataType::from_name(&c.name))
            };
            (data_type, c.value.as_str())
        })
    }
}
