//! YAML decoder.
//!
//! The stream is decoded at the event level with `yaml-rust` so scalar style
//! and explicit tags are visible. Plain scalars resolve with the YAML 1.2 core
//! schema; quoted scalars are always strings. Explicit core tags (`!!str`,
//! `!!int`, `!!float`, `!!bool`, `!!null`) override resolution, and any other
//! tag keeps the scalar as a string.

use std::collections::{BTreeMap, HashMap};

use yaml_rust::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust::scanner::{Marker, TScalarStyle, TokenType};

use crate::format::ConfigFormat;
use crate::normalized::{ConfigValue, NormalizedConfig};
use crate::parse::ParseError;

const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Decode YAML content into a normalized mapping.
///
/// The whole stream must be well-formed. For multi-document streams the first
/// document is the configuration; any further documents are ignored with a
/// warning. Empty or comment-only content yields an empty mapping.
///
/// # Errors
///
/// - [`ParseError::InvalidEncoding`] if the content is not UTF-8.
/// - [`ParseError::Yaml`] if the stream is not well-formed YAML.
/// - [`ParseError::InvalidTaggedScalar`] if a core tag does not fit its scalar.
/// - [`ParseError::DuplicateKey`] / [`ParseError::NonScalarKey`] for mapping
///   keys the normalized model cannot hold.
/// - [`ParseError::NotAMapping`] if the first document is not a mapping.
pub fn parse_yaml(content: &[u8]) -> Result<NormalizedConfig, ParseError> {
    let text = std::str::from_utf8(content).map_err(|e| ParseError::InvalidEncoding {
        format: ConfigFormat::Yaml,
        source: e,
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut builder = DocumentBuilder::default();
    Parser::new(text.chars())
        .load(&mut builder, true)
        .map_err(|e| ParseError::Yaml {
            line: e.marker().line(),
            column: e.marker().col() + 1,
            source: e,
        })?;

    let document = builder.finish()?;
    NormalizedConfig::from_document(document, ConfigFormat::Yaml)
}

/// A collection still being filled.
enum Frame {
    Sequence {
        items: Vec<ConfigValue>,
        anchor: usize,
    },
    Mapping {
        entries: BTreeMap<String, ConfigValue>,
        pending_key: Option<(String, Marker)>,
        anchor: usize,
    },
}

/// An anchored node. `key` holds the source text when the node is a scalar,
/// so an alias can still be used as a mapping key.
#[derive(Clone)]
struct Anchored {
    value: ConfigValue,
    key: Option<String>,
}

/// Builds [`ConfigValue`] trees from parser events.
///
/// The first error stops the build; later events are ignored.
#[derive(Default)]
struct DocumentBuilder {
    stack: Vec<Frame>,
    anchors: HashMap<usize, Anchored>,
    documents: usize,
    first: Option<ConfigValue>,
    error: Option<ParseError>,
}

impl DocumentBuilder {
    fn finish(self) -> Result<ConfigValue, ParseError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.documents > 1 {
            tracing::warn!(
                ignored = self.documents - 1,
                "multi-document YAML stream: only the first document is used"
            );
        }
        Ok(self.first.unwrap_or_default())
    }

    fn handle(&mut self, ev: Event, mark: Marker) -> Result<(), ParseError> {
        match ev {
            Event::DocumentStart => self.documents += 1,
            Event::Scalar(text, style, anchor, tag) => {
                let value = resolve_scalar(&text, style, tag.as_ref(), mark)?;
                if anchor > 0 {
                    self.anchors.insert(
                        anchor,
                        Anchored {
                            value: value.clone(),
                            key: Some(text.clone()),
                        },
                    );
                }
                self.attach(value, Some(text), mark)?;
            }
            Event::SequenceStart(anchor) => self.stack.push(Frame::Sequence {
                items: Vec::new(),
                anchor,
            }),
            Event::MappingStart(anchor) => self.stack.push(Frame::Mapping {
                entries: BTreeMap::new(),
                pending_key: None,
                anchor,
            }),
            Event::SequenceEnd | Event::MappingEnd => {
                let Some(frame) = self.stack.pop() else {
                    return Ok(());
                };
                let (value, anchor) = match frame {
                    Frame::Sequence { items, anchor } => (ConfigValue::Sequence(items), anchor),
                    Frame::Mapping {
                        entries, anchor, ..
                    } => (ConfigValue::Mapping(entries), anchor),
                };
                if anchor > 0 {
                    self.anchors.insert(
                        anchor,
                        Anchored {
                            value: value.clone(),
                            key: None,
                        },
                    );
                }
                self.attach(value, None, mark)?;
            }
            Event::Alias(id) => {
                // The parser rejects aliases to unknown anchors.
                if let Some(Anchored { value, key }) = self.anchors.get(&id).cloned() {
                    self.attach(value, key, mark)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Place a finished node into its parent, or make it a document root.
    fn attach(
        &mut self,
        value: ConfigValue,
        key: Option<String>,
        mark: Marker,
    ) -> Result<(), ParseError> {
        let Some(frame) = self.stack.last_mut() else {
            if self.documents <= 1 && self.first.is_none() {
                self.first = Some(value);
            }
            return Ok(());
        };

        match frame {
            Frame::Sequence { items, .. } => items.push(value),
            Frame::Mapping {
                entries,
                pending_key,
                ..
            } => match pending_key.take() {
                None => {
                    let Some(key) = key else {
                        return Err(ParseError::NonScalarKey {
                            line: mark.line(),
                            column: mark.col() + 1,
                        });
                    };
                    *pending_key = Some((key, mark));
                }
                Some((key, key_mark)) => {
                    if entries.contains_key(&key) {
                        return Err(ParseError::DuplicateKey {
                            key,
                            line: key_mark.line(),
                            column: key_mark.col() + 1,
                        });
                    }
                    entries.insert(key, value);
                }
            },
        }
        Ok(())
    }
}

impl MarkedEventReceiver for DocumentBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.handle(ev, mark) {
            self.error = Some(err);
        }
    }
}

fn resolve_scalar(
    text: &str,
    style: TScalarStyle,
    tag: Option<&TokenType>,
    mark: Marker,
) -> Result<ConfigValue, ParseError> {
    if let Some(TokenType::Tag(handle, suffix)) = tag {
        let Some(core) = core_tag(handle, suffix) else {
            return Ok(ConfigValue::String(text.to_owned()));
        };
        return resolve_core(core, text).ok_or_else(|| ParseError::InvalidTaggedScalar {
            tag: format!("!!{core}"),
            value: text.to_owned(),
            line: mark.line(),
            column: mark.col() + 1,
        });
    }

    if matches!(style, TScalarStyle::Plain) {
        Ok(resolve_plain(text))
    } else {
        Ok(ConfigValue::String(text.to_owned()))
    }
}

/// Suffix of a tag in the `tag:yaml.org,2002:` namespace, written either as
/// `!!suffix` or verbatim.
fn core_tag<'a>(handle: &str, suffix: &'a str) -> Option<&'a str> {
    match handle {
        "!!" => Some(suffix),
        "" => suffix.strip_prefix(CORE_TAG_PREFIX),
        _ => None,
    }
}

fn resolve_core(tag: &str, text: &str) -> Option<ConfigValue> {
    match tag {
        "null" => is_null(text).then_some(ConfigValue::Null),
        "bool" => parse_bool(text).map(ConfigValue::Bool),
        "int" => parse_int(text).map(ConfigValue::Integer),
        "float" => parse_float(text).map(ConfigValue::Float),
        _ => Some(ConfigValue::String(text.to_owned())),
    }
}

fn resolve_plain(text: &str) -> ConfigValue {
    if is_null(text) {
        ConfigValue::Null
    } else if let Some(b) = parse_bool(text) {
        ConfigValue::Bool(b)
    } else if let Some(i) = parse_int(text) {
        ConfigValue::Integer(i)
    } else if let Some(f) = parse_float(text) {
        ConfigValue::Float(f)
    } else {
        ConfigValue::String(text.to_owned())
    }
}

fn is_null(text: &str) -> bool {
    matches!(text, "" | "~" | "null" | "Null" | "NULL")
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

fn parse_int(text: &str) -> Option<i64> {
    let (digits, radix) = if let Some(hex) = text.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(oct) = text.strip_prefix("0o") {
        (oct, 8)
    } else {
        (text.strip_prefix(['-', '+']).unwrap_or(text), 10)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    if radix == 10 {
        text.parse().ok()
    } else {
        i64::from_str_radix(digits, radix).ok()
    }
}

fn parse_float(text: &str) -> Option<f64> {
    match text {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => return Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => return Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => return Some(f64::NAN),
        _ => {}
    }
    let numeric = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !numeric || !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
