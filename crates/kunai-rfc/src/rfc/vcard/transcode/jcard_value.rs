//! The value slot(s) of a jCard property array.

use serde_json::Value;

/// The values that follow the datatype slot in a jCard property array.
///
/// `["tel", {}, "uri", "tel:+1-555"]` has one value; multi-valued properties
/// (CATEGORIES) list several; structured ones (N, ADR) hold one array per
/// component.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JCardValue {
    values: Vec<Value>,
}

impl JCardValue {
    /// One scalar value.
    #[must_use]
    pub fn single(value: impl Into<Value>) -> Self {
        Self {
            values: vec![value.into()],
        }
    }

    /// Several scalar values.
    #[must_use]
    pub fn multi<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// A structured value. Components with one entry are written as plain
    /// strings, others as arrays.
    #[must_use]
    pub fn structured(components: &[Vec<String>]) -> Self {
        let component = |parts: &Vec<String>| match parts.as_slice() {
            [] => Value::String(String::new()),
            [one] => Value::String(one.clone()),
            many => Value::Array(many.iter().cloned().map(Value::String).collect()),
        };
        Self {
            values: vec![Value::Array(components.iter().map(component).collect())],
        }
    }

    /// Wraps already-built JSON values.
    #[must_use]
    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// The first value rendered as a string. Arrays yield their first
    /// element; null yields an empty string.
    #[must_use]
    pub fn as_single(&self) -> String {
        self.values.first().map(scalar_string).unwrap_or_default()
    }

    /// Every value rendered as a string.
    #[must_use]
    pub fn as_multi(&self) -> Vec<String> {
        self.values.iter().map(scalar_string).collect()
    }

    /// Structured components. A scalar first value is treated as a single
    /// component.
    #[must_use]
    pub fn as_structured(&self) -> Vec<Vec<String>> {
        match self.values.first() {
            Some(Value::Array(components)) => components
                .iter()
                .map(|c| match c {
                    Value::Array(parts) => parts.iter().map(scalar_string).collect(),
                    other => {
                        let s = scalar_string(other);
                        if s.is_empty() { Vec::new() } else { vec![s] }
                    }
                })
                .collect(),
            Some(other) => vec![vec![scalar_string(other)]],
            None => Vec::new(),
        }
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.first().map(scalar_string).unwrap_or_default(),
        other => other.to_string(),
    }
}
