//! JSON decoder.

use serde_json::Value;

use crate::format::ConfigFormat;
use crate::normalized::{ConfigValue, NormalizedConfig};
use crate::parse::ParseError;

/// Decode JSON content into a normalized mapping.
///
/// Whitespace-only content is treated as an empty document. Duplicate keys
/// keep the last value.
///
/// # Errors
///
/// Returns [`ParseError::Json`] with the decoder's line/column if the content
/// is not well-formed JSON, or [`ParseError::NotAMapping`] if the top level is
/// not an object.
pub fn parse_json(content: &[u8]) -> Result<NormalizedConfig, ParseError> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(NormalizedConfig::new());
    }

    let value: Value = serde_json::from_slice(content).map_err(|e| ParseError::Json {
        line: e.line(),
        column: e.column(),
        source: e,
    })?;

    NormalizedConfig::from_document(value.into(), ConfigFormat::Json)
}

impl From<Value> for ConfigValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            // Integers outside the i64 range degrade to floats.
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
