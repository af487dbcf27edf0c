//! The normalized, format-independent view of a configuration file.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::format::ConfigFormat;
use crate::parse::ParseError;

/// A decoded configuration value.
///
/// YAML and JSON both decode into this one model. Floats keep the YAML
/// special values (`.inf`, `-.inf`, `.nan`), which JSON cannot express.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<ConfigValue>),
    Mapping(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Short name of the value's kind, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The value of a `Float`; integers are not converted.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_mapping(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` if this value is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Look up `index` if this value is a sequence.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&ConfigValue> {
        self.as_sequence().and_then(|items| items.get(index))
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Top-level mapping of a decoded configuration file.
///
/// Keys are unique; iteration order is sorted and carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedConfig(BTreeMap<String, ConfigValue>);

impl NormalizedConfig {
    /// An empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from a decoded document.
    ///
    /// `null` (an empty document) becomes an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NotAMapping`] if the document's top level is a
    /// sequence or a scalar.
    pub fn from_document(value: ConfigValue, format: ConfigFormat) -> Result<Self, ParseError> {
        match value {
            ConfigValue::Mapping(map) => Ok(Self(map)),
            ConfigValue::Null => Ok(Self::new()),
            other => Err(ParseError::NotAMapping {
                format,
                found: other.kind(),
            }),
        }
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    /// Top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Top-level entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, ConfigValue> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, ConfigValue> {
        self.0
    }
}

impl From<BTreeMap<String, ConfigValue>> for NormalizedConfig {
    fn from(map: BTreeMap<String, ConfigValue>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, ConfigValue)> for NormalizedConfig {
    fn from_iter<I: IntoIterator<Item = (K, ConfigValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
