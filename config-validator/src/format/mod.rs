//! Configuration formats and per-format decoders.
//!
//! - `json`: JSON decoder (`serde_json`)
//! - `yaml`: YAML decoder (`yaml-rust` events, YAML 1.2 core schema)
//!
//! Both decode into [`ConfigValue`](crate::ConfigValue).

pub mod json;
pub mod yaml;

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Syntax of a configuration file, inferred from its extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ConfigFormat {
    /// Extension missing or not recognized.
    #[default]
    Unknown,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Infer the format from the extension of `path`, ignoring case.
    ///
    /// Pure function of the path string: the filesystem is never touched.
    /// Paths without an extension (including dotfiles such as `.yaml`)
    /// and extensions that are not valid UTF-8 yield [`ConfigFormat::Unknown`].
    #[must_use]
    pub fn detect(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Self::Unknown;
        };
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Self::Yaml,
            "json" => Self::Json,
            _ => Self::Unknown,
        }
    }

    /// Human-readable name: `YAML`, `JSON` or `UNKNOWN`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }

    /// Whether a decoder exists for this format.
    #[must_use]
    pub const fn is_known(self) -> bool {
        match self {
            Self::Yaml | Self::Json => true,
            Self::Unknown => false,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Infer the configuration format of `path` from its extension.
///
/// Shorthand for [`ConfigFormat::detect`].
#[must_use]
pub fn detect(path: impl AsRef<Path>) -> ConfigFormat {
    ConfigFormat::detect(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_supported_extensions() {
        assert_eq!(detect("config.yaml"), ConfigFormat::Yaml);
        assert_eq!(detect("config.yml"), ConfigFormat::Yaml);
        assert_eq!(detect("/path/to/my-service.json"), ConfigFormat::Json);
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(detect("x.YAML"), detect("x.yaml"));
        assert_eq!(detect("x.YAML"), ConfigFormat::Yaml);
        assert_eq!(detect("config.JSON"), ConfigFormat::Json);
        assert_eq!(detect("Deploy.YmL"), ConfigFormat::Yaml);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect("config.tf"), ConfigFormat::Unknown);
        assert_eq!(detect("noextension"), ConfigFormat::Unknown);
        assert_eq!(detect(""), ConfigFormat::Unknown);
        assert_eq!(detect("archive.yaml.bak"), ConfigFormat::Unknown);
        assert_eq!(detect("trailing."), ConfigFormat::Unknown);
        assert_eq!(detect(".yaml"), ConfigFormat::Unknown);
    }

    #[test]
    fn test_detect_uses_last_path_component_only() {
        assert_eq!(detect("conf.d/settings"), ConfigFormat::Unknown);
        assert_eq!(detect("conf.json/settings.yml"), ConfigFormat::Yaml);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ConfigFormat::Yaml.to_string(), "YAML");
        assert_eq!(ConfigFormat::Json.to_string(), "JSON");
        assert_eq!(ConfigFormat::Unknown.to_string(), "UNKNOWN");
        assert!(ConfigFormat::Json.is_known());
        assert!(!ConfigFormat::Unknown.is_known());
    }
}
