//! A minimal HTML element tree for hCard decoding.

/// A node in an [`HCardElement`] tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HCardNode {
    Element(HCardElement),
    Text(String),
}

/// An HTML element as seen by hCard property decoders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HCardElement {
    /// Tag name, lowercase.
    pub tag: String,
    /// Attributes in document order, names lowercase.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<HCardNode>,
}

impl HCardElement {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes
            .push((name.to_ascii_lowercase(), value.into()));
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(HCardNode::Element(child));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(HCardNode::Text(text.into()));
        self
    }

    /// Attribute value by name (case-insensitive).
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Names in the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.classes().any(|c| c.eq_ignore_ascii_case(name))
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|n| match n {
            HCardNode::Element(e) => Some(e),
            HCardNode::Text(_) => None,
        })
    }

    /// Descendants carrying a class, in document order. When `include_self`
    /// is set the element itself is considered first.
    #[must_use]
    pub fn find_by_class(&self, class: &str, include_self: bool) -> Vec<&Self> {
        let mut found = Vec::new();
        if include_self && self.has_class(class) {
            found.push(self);
        }
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Self>) {
        for child in self.child_elements() {
            if child.has_class(class) {
                found.push(child);
            }
            child.collect_by_class(class, found);
        }
    }

    /// The property value this element carries.
    ///
    /// `abbr` elements yield their `title`. If the subtree has `value`-classed
    /// elements only their text counts; nested `value` elements inside another
    /// one are not counted twice. Otherwise the element's own text is used.
    #[must_use]
    pub fn value(&self) -> String {
        if let Some(title) = self.abbr_title() {
            return title.to_string();
        }

        let value_elements = self.find_by_class("value", false);
        if value_elements.is_empty() {
            return self.text_value();
        }

        let mut value = String::new();
        for (i, element) in value_elements.iter().enumerate() {
            let nested = value_elements[..i]
                .iter()
                .any(|outer| outer.contains(element));
            if nested {
                continue;
            }
            match element.abbr_title() {
                Some(title) => value.push_str(title),
                None => value.push_str(&element.text_value()),
            }
        }
        value.trim().to_string()
    }

    /// Lowercased text of every `type`-classed descendant.
    #[must_use]
    pub fn types(&self) -> Vec<String> {
        self.find_by_class("type", false)
            .into_iter()
            .map(|e| e.text_value().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    fn abbr_title(&self) -> Option<&str> {
        if self.tag == "abbr" {
            self.attr("title").filter(|t| !t.is_empty())
        } else {
            None
        }
    }

    fn contains(&self, other: &Self) -> bool {
        self.child_elements()
            .any(|child| std::ptr::eq(child, other) || child.contains(other))
    }

    fn text_value(&self) -> String {
        let mut value = String::new();
        self.visit_for_value(&mut value);
        value.trim().to_string()
    }

    fn visit_for_value(&self, value: &mut String) {
        for node in &self.children {
            match node {
                HCardNode::Text(text) => push_normalized(value, text),
                HCardNode::Element(e) if e.has_class("type") || e.tag == "del" => {}
                HCardNode::Element(e) if e.tag == "br" => value.push('\n'),
                HCardNode::Element(e) => e.visit_for_value(value),
            }
        }
    }
}

/// Appends text with whitespace runs collapsed to single spaces.
fn push_normalized(out: &mut String, text: &str) {
    let mut last_space = out.ends_with(' ');
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(c);
            last_space = false;
        }
    }
}
