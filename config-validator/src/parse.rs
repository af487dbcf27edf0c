//! Content parser: raw bytes plus a format tag in, normalized mapping out.

use thiserror::Error;

use crate::format::ConfigFormat;
use crate::format::json::parse_json;
use crate::format::yaml::parse_yaml;
use crate::normalized::NormalizedConfig;

/// Errors from decoding configuration content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// No decoder exists for the given format.
    #[error("unsupported configuration type: {0}")]
    UnsupportedFormat(ConfigFormat),

    /// The content is not well-formed JSON.
    #[error("failed to unmarshal JSON content: {source}")]
    Json {
        /// 1-based line reported by the decoder.
        line: usize,
        /// 1-based column reported by the decoder.
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The content is not well-formed YAML.
    #[error("failed to unmarshal YAML content: {source}")]
    Yaml {
        /// 1-based line reported by the scanner.
        line: usize,
        /// 1-based column reported by the scanner.
        column: usize,
        #[source]
        source: yaml_rust::ScanError,
    },

    /// A scalar carries a core tag (`!!int`, `!!bool`, ...) its text does not fit.
    #[error("invalid value {value:?} for tag {tag} at line {line}, column {column}")]
    InvalidTaggedScalar {
        tag: String,
        value: String,
        line: usize,
        column: usize,
    },

    /// A YAML mapping repeats a key.
    #[error("mapping key {key:?} already defined, duplicate at line {line}, column {column}")]
    DuplicateKey {
        key: String,
        line: usize,
        column: usize,
    },

    /// A YAML mapping key is a sequence or mapping.
    #[error("mapping keys must be scalars (line {line}, column {column})")]
    NonScalarKey { line: usize, column: usize },

    /// The content is not valid UTF-8.
    #[error("{format} content is not valid UTF-8: {source}")]
    InvalidEncoding {
        format: ConfigFormat,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The document decoded, but its top level is not a mapping.
    #[error("expected a mapping at the top level of the {format} document, found a {found}")]
    NotAMapping {
        format: ConfigFormat,
        found: &'static str,
    },
}

impl ParseError {
    /// Line and column of the failure, when the decoder reports one.
    #[must_use]
    pub const fn location(&self) -> Option<(usize, usize)> {
        match self {
            Self::Json { line, column, .. }
            | Self::Yaml { line, column, .. }
            | Self::InvalidTaggedScalar { line, column, .. }
            | Self::DuplicateKey { line, column, .. }
            | Self::NonScalarKey { line, column } => Some((*line, *column)),
            Self::UnsupportedFormat(_)
            | Self::InvalidEncoding { .. }
            | Self::NotAMapping { .. } => None,
        }
    }
}

/// Decode `content` as `format` into a normalized top-level mapping.
///
/// Empty content decodes to an empty mapping for both formats.
///
/// # Errors
///
/// - [`ParseError::UnsupportedFormat`] for [`ConfigFormat::Unknown`].
/// - [`ParseError::Json`] / [`ParseError::Yaml`] for malformed content.
/// - [`ParseError::InvalidTaggedScalar`], [`ParseError::DuplicateKey`] or
///   [`ParseError::NonScalarKey`] for YAML the normalized model cannot hold.
/// - [`ParseError::NotAMapping`] when the top level is a sequence or scalar.
pub fn parse(content: &[u8], format: ConfigFormat) -> Result<NormalizedConfig, ParseError> {
    match format {
        ConfigFormat::Yaml => parse_yaml(content),
        ConfigFormat::Json => parse_json(content),
        ConfigFormat::Unknown => Err(ParseError::UnsupportedFormat(format)),
    }
}
