//! vCard parameter types.

use std::fmt;
use std::str::FromStr;

use super::data_type::VCardDataType;
use super::encoding::Encoding;
use super::legality;
use super::version::VCardVersion;

/// Well-known parameter names.
pub mod names {
    pub const ALTID: &str = "ALTID";
    pub const CALSCALE: &str = "CALSCALE";
    pub const CHARSET: &str = "CHARSET";
    pub const ENCODING: &str = "ENCODING";
    pub const GEO: &str = "GEO";
    pub const INDEX: &str = "INDEX";
    pub const LABEL: &str = "LABEL";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const LEVEL: &str = "LEVEL";
    pub const MEDIATYPE: &str = "MEDIATYPE";
    pub const PID: &str = "PID";
    pub const PREF: &str = "PREF";
    pub const SORT_AS: &str = "SORT-AS";
    pub const TYPE: &str = "TYPE";
    pub const TZ: &str = "TZ";
    pub const VALUE: &str = "VALUE";
}

/// Common TYPE values.
pub mod types {
    pub const HOME: &str = "home";
    pub const WORK: &str = "work";
    pub const PREF: &str = "pref";

    // Telephone types
    pub const VOICE: &str = "voice";
    pub const FAX: &str = "fax";
    pub const CELL: &str = "cell";
    pub const VIDEO: &str = "video";
    pub const PAGER: &str = "pager";
    pub const TEXT: &str = "text";
    pub const TEXTPHONE: &str = "textphone";

    // Email types
    pub const INTERNET: &str = "internet";
    pub const X400: &str = "x400";

    // Related types
    pub const CONTACT: &str = "contact";
    pub const FRIEND: &str = "friend";
    pub const COLLEAGUE: &str = "colleague";
    pub const SPOUSE: &str = "spouse";
    pub const CHILD: &str = "child";
    pub const PARENT: &str = "parent";
    pub const AGENT: &str = "agent";
    pub const EMERGENCY: &str = "emergency";
}

/// A single named parameter.
///
/// Parameters can have multiple values (e.g., TYPE=home,work).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values, never empty while held by [`VCardParameters`].
    pub values: Vec<String>,
}

impl VCardParameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::multi(name, vec![value.into()])
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

/// A PID parameter value: a local ID plus an optional CLIENTPIDMAP reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pid {
    pub local_id: u32,
    pub client_pid_map_ref: Option<u32>,
}

impl Pid {
    #[must_use]
    pub const fn new(local_id: u32, client_pid_map_ref: Option<u32>) -> Self {
        Self {
            local_id,
            client_pid_map_ref,
        }
    }
}

impl FromStr for Pid {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (local, client) = match s.trim().split_once('.') {
            Some((local, client)) => (local, Some(client)),
            None => (s.trim(), None),
        };
        let digits = |v: &str| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit());
        if !digits(local) || !client.is_none_or(digits) {
            return Err(());
        }
        let local_id = local.parse().map_err(|_e| ())?;
        let client_pid_map_ref = client.map(str::parse).transpose().map_err(|_e| ())?;
        Ok(Self::new(local_id, client_pid_map_ref))
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.client_pid_map_ref {
            Some(client) => write!(f, "{}.{client}", self.local_id),
            None => write!(f, "{}", self.local_id),
        }
    }
}

/// The ordered parameter multi-map attached to one property.
///
/// Names are matched case-insensitively and stored uppercase. A name is
/// either absent or maps to at least one value; removing the last value
/// removes the name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCardParameters {
    entries: Vec<VCardParameter>,
}

impl VCardParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &VCardParameter> {
        self.entries.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Whether a parameter is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// All values of a parameter; empty when absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &[String] {
        self.position(name)
            .map_or(&[], |i| self.entries[i].values.as_slice())
    }

    /// First value of a parameter.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).first().map(String::as_str)
    }

    /// Appends a value, keeping any existing ones.
    pub fn add(&mut self, name: &str, value: impl Into<String>) {
        match self.position(name) {
            Some(i) => self.entries[i].values.push(value.into()),
            None => self.entries.push(VCardParameter::new(name, value)),
        }
    }

    /// Replaces all values of a parameter with a single one.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.set_all(name, vec![value.into()]);
    }

    /// Replaces all values of a parameter. An empty list removes it.
    pub fn set_all(&mut self, name: &str, values: Vec<String>) {
        if values.is_empty() {
            self.remove(name);
            return;
        }
        match self.position(name) {
            Some(i) => self.entries[i].values = values,
            None => self.entries.push(VCardParameter::multi(name, values)),
        }
    }

    /// Removes a parameter, returning its values.
    pub fn remove(&mut self, name: &str) -> Vec<String> {
        self.position(name)
            .map(|i| self.entries.remove(i).values)
            .unwrap_or_default()
    }

    /// Removes one value (case-insensitive). Returns whether it was present.
    pub fn remove_value(&mut self, name: &str, value: &str) -> bool {
        let Some(i) = self.position(name) else {
            return false;
        };
        let values = &mut self.entries[i].values;
        let before = values.len();
        values.retain(|v| !v.eq_ignore_ascii_case(value));
        let removed = values.len() != before;
        if values.is_empty() {
            self.entries.remove(i);
        }
        removed
    }

    /// Merges another set in, appending values.
    pub fn extend(&mut self, other: &Self) {
        for param in &other.entries {
            for value in &param.values {
                self.add(&param.name, value.clone());
            }
        }
    }

    // --- TYPE ---

    #[must_use]
    pub fn types(&self) -> &[String] {
        self.get(names::TYPE)
    }

    /// Whether a TYPE value is present (case-insensitive).
    #[must_use]
    pub fn has_type(&self, value: &str) -> bool {
        self.types().iter().any(|t| t.eq_ignore_ascii_case(value))
    }

    pub fn add_type(&mut self, value: impl Into<String>) {
        self.add(names::TYPE, value);
    }

    pub fn remove_type(&mut self, value: &str) -> bool {
        self.remove_value(names::TYPE, value)
    }

    // --- PID ---

    /// Parsed PID values; malformed entries are skipped.
    #[must_use]
    pub fn pids(&self) -> Vec<Pid> {
        self.get(names::PID)
            .iter()
            .filter_map(|v| v.parse().ok())
            .collect()
    }

    pub fn add_pid(&mut self, pid: Pid) {
        self.add(names::PID, pid.to_string());
    }

    // --- PREF ---

    /// The PREF value, if present and numeric.
    #[must_use]
    pub fn pref(&self) -> Option<u32> {
        self.first(names::PREF).and_then(|v| v.trim().parse().ok())
    }

    pub fn set_pref(&mut self, pref: Option<u32>) {
        match pref {
            Some(p) => self.set(names::PREF, p.to_string()),
            None => {
                self.remove(names::PREF);
            }
        }
    }

    // --- ALTID ---

    #[must_use]
    pub fn alt_id(&self) -> Option<&str> {
        self.first(names::ALTID)
    }

    pub fn set_alt_id(&mut self, alt_id: Option<&str>) {
        self.set_optional(names::ALTID, alt_id);
    }

    // --- VALUE ---

    #[must_use]
    pub fn value_type(&self) -> Option<VCardDataType> {
        self.first(names::VALUE).map(VCardDataType::from_name)
    }

    pub fn set_value_type(&mut self, data_type: Option<&VCardDataType>) {
        self.set_optional(names::VALUE, data_type.map(VCardDataType::as_str));
    }

    // --- ENCODING ---

    #[must_use]
    pub fn encoding(&self) -> Option<Encoding> {
        self.first(names::ENCODING).map(Encoding::from_name)
    }

    pub fn set_encoding(&mut self, encoding: Option<&Encoding>) {
        self.set_optional(names::ENCODING, encoding.map(Encoding::as_str));
    }

    // --- MEDIATYPE ---

    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        self.first(names::MEDIATYPE)
    }

    pub fn set_media_type(&mut self, media_type: Option<&str>) {
        self.set_optional(names::MEDIATYPE, media_type);
    }

    // --- LANGUAGE ---

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.first(names::LANGUAGE)
    }

    pub fn set_language(&mut self, language: Option<&str>) {
        self.set_optional(names::LANGUAGE, language);
    }

    fn set_optional(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(v) => self.set(name, v),
            None => {
                self.remove(name);
            }
        }
    }

    /// Checks the parameters against what `version` allows.
    ///
    /// Returns one message per problem; an empty list means the parameters
    /// are legal.
    #[must_use]
    pub fn validate(&self, version: VCardVersion) -> Vec<String> {
        let mut warnings = Vec::new();

        for param in &self.entries {
            if let Some(versions) = legality::parameter_versions(&param.name)
                && !versions.contains(&version)
            {
                warnings.push(format!(
                    "{} parameter is not supported in version {version}.",
                    param.name
                ));
            }

            for value in &param.values {
                if let Some(versions) = legality::value_versions(&param.name, value)
                    && !versions.contains(&version)
                {
                    warnings.push(format!(
                        "{} parameter value \"{value}\" is not supported in version {version}.",
                        param.name
                    ));
                }
            }
        }

        if let Some(raw) = self.first(names::PREF) {
            match raw.trim().parse::<u32>() {
                Ok(1..=100) => {}
                Ok(_) => warnings.push(format!(
                    "PREF parameter value must be between 1 and 100 inclusive: \"{raw}\"."
                )),
                Err(_) => {
                    warnings.push(format!("PREF parameter value must be an integer: \"{raw}\"."));
                }
            }
        }

        for raw in self.get(names::PID) {
            if raw.parse::<Pid>().is_err() {
                warnings.push(format!(
                    "PID parameter value must be an integer or two integers separated by a dot: \"{raw}\"."
                ));
            }
        }

        warnings
    }
}

impl<'a> IntoIterator for &'a VCardParameters {
    type Item = &'a VCardParameter;
    type IntoIter = std::slice::Iter<'a, VCardParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<VCardParameter> for VCardParameters {
    fn from_iter<I: IntoIterator<Item = VCardParameter>>(iter: I) -> Self {
        let mut params = Self::new();
        for param in iter {
            let mut values = params.get(&param.name).to_vec();
            values.extend(param.values);
            params.set_all(&param.name, values);
        }
        params
    }
}
