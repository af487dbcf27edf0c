//! Error types for configuration ingestion.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::format::ConfigFormat;
use crate::parse::ParseError;
use crate::pipeline::Stage;

/// Classification of an ingestion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum FailureKind {
    /// No filesystem entry exists at the path.
    NotFound,
    /// The path exists but could not be inspected, or is not a regular file.
    AccessError,
    /// Reading the content failed after the access check passed.
    IoError,
    /// The extension does not map to a supported format.
    UnsupportedFormat,
    /// The content is malformed for the detected format.
    ParseError,
}

/// A terminal failure of one ingestion run.
///
/// Every variant names the offending path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// Nothing exists at the path.
    #[error("file not found at path: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The metadata query was refused by the operating system.
    #[error("permission denied accessing file {}: {source}", .path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The metadata query failed for another reason, e.g. an invalid path.
    #[error("error accessing file {}: {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path names a directory, FIFO, socket or device.
    #[error("{} is not a regular file", .path.display())]
    NotAFile { path: PathBuf },

    /// The content could not be read after the access check passed.
    #[error("could not read file content of {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The content is longer than the configured size limit.
    #[error("file {} exceeds the maximum size of {limit} bytes", .path.display())]
    FileTooLarge { path: PathBuf, limit: u64 },

    /// The extension does not name a supported format. The content was read
    /// but never decoded.
    #[error(
        "unsupported file extension {} for path: {}. Must be .yaml, .yml, or .json",
        describe_extension(.extension.as_deref()),
        .path.display()
    )]
    UnsupportedFormat {
        path: PathBuf,
        /// The rejected extension, without the leading dot; `None` if the
        /// path has no extension.
        extension: Option<String>,
    },

    /// The content is malformed for the inferred format.
    #[error("parsing error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        format: ConfigFormat,
        #[source]
        source: ParseError,
    },
}

impl IngestError {
    /// The failure classification.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::AccessDenied { .. } | Self::Access { .. } | Self::NotAFile { .. } => {
                FailureKind::AccessError
            }
            Self::Read { .. } | Self::FileTooLarge { .. } => FailureKind::IoError,
            Self::UnsupportedFormat { .. } => FailureKind::UnsupportedFormat,
            Self::Parse { .. } => FailureKind::ParseError,
        }
    }

    /// The path the failing run was given.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::AccessDenied { path, .. }
            | Self::Access { path, .. }
            | Self::NotAFile { path }
            | Self::Read { path, .. }
            | Self::FileTooLarge { path, .. }
            | Self::UnsupportedFormat { path, .. }
            | Self::Parse { path, .. } => path,
        }
    }

    /// The inferred format, if the run got far enough to know it.
    #[must_use]
    pub const fn format(&self) -> Option<ConfigFormat> {
        match self {
            Self::Parse { format, .. } => Some(*format),
            _ => None,
        }
    }

    /// The last pipeline stage completed before the failure.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self.kind() {
            FailureKind::NotFound | FailureKind::AccessError => Stage::Init,
            FailureKind::IoError => Stage::AccessChecked,
            FailureKind::UnsupportedFormat => Stage::Read,
            FailureKind::ParseError => Stage::FormatKnown,
        }
    }
}

fn describe_extension(extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("'.{ext}'"),
        None => "(none)".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_names_extension() {
        let err = IngestError::UnsupportedFormat {
            path: PathBuf::from("service.tf"),
            extension: Some("tf".to_owned()),
        };
        let msg = err.to_string();
        assert!(msg.contains("'.tf'"), "got: {msg}");
        assert!(msg.contains("service.tf"), "got: {msg}");
        assert_eq!(err.kind(), FailureKind::UnsupportedFormat);
        assert_eq!(err.stage(), Stage::Read);
    }

    #[test]
    fn test_unsupported_format_without_extension() {
        let err = IngestError::UnsupportedFormat {
            path: PathBuf::from("Makefile"),
            extension: None,
        };
        assert!(err.to_string().contains("(none)"));
    }

    #[test]
    fn test_kinds_and_paths() {
        let not_found = IngestError::NotFound {
            path: PathBuf::from("missing.yaml"),
        };
        assert_eq!(not_found.kind(), FailureKind::NotFound);
        assert_eq!(not_found.path(), Path::new("missing.yaml"));
        assert_eq!(
            not_found.to_string(),
            "file not found at path: missing.yaml"
        );

        let read = IngestError::Read {
            path: PathBuf::from("a.json"),
            source: io::Error::other("vanished"),
        };
        assert_eq!(read.kind(), FailureKind::IoError);
        assert_eq!(read.stage(), Stage::AccessChecked);

        let dir = IngestError::NotAFile {
            path: PathBuf::from("conf.d"),
        };
        assert_eq!(dir.kind(), FailureKind::AccessError);
        assert_eq!(dir.format(), None);
    }

    #[test]
    fn test_parse_error_wraps_cause() {
        let err = IngestError::Parse {
            path: PathBuf::from("x.yaml"),
            format: ConfigFormat::Yaml,
            source: ParseError::UnsupportedFormat(ConfigFormat::Unknown),
        };
        assert_eq!(err.kind(), FailureKind::ParseError);
        assert_eq!(err.stage(), Stage::FormatKnown);
        assert_eq!(err.format(), Some(ConfigFormat::Yaml));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("UNKNOWN"));
    }
}
