//! The ingestion pipeline: access check, read, format detection, parse.
//!
//! Strictly linear and single-threaded. Each step either advances the run to
//! the next [`Stage`] or ends it with an [`IngestError`]; there are no retries
//! and no partial results.

use std::fmt;
use std::path::Path;

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::format::ConfigFormat;
use crate::fs::{read_file_bounded, verify};
use crate::parse::parse;
use crate::report::IngestReport;

/// Result of one ingestion run.
pub type Outcome = Result<IngestReport, IngestError>;

/// Progress of an ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Nothing has been checked yet.
    Init,
    /// The path names an accessible regular file.
    AccessChecked,
    /// The content is in memory.
    Read,
    /// The extension mapped to a supported format.
    FormatKnown,
    /// The content decoded into a normalized mapping.
    Parsed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Init => "init",
            Self::AccessChecked => "access-checked",
            Self::Read => "read",
            Self::FormatKnown => "format-known",
            Self::Parsed => "parsed",
        })
    }
}

/// Ingest the configuration file at `path` with default options.
///
/// # Errors
///
/// See [`run_with_config`].
pub fn run(path: impl AsRef<Path>) -> Outcome {
    run_with_config(path, &IngestConfig::default())
}

/// Ingest the configuration file at `path`.
///
/// Steps, stopping at the first failure:
/// 1. verify the path exists and is a regular file;
/// 2. read its content (bounded by `config.max_file_size`);
/// 3. infer the format from the extension;
/// 4. parse the content into a [`NormalizedConfig`](crate::NormalizedConfig).
///
/// # Errors
///
/// Returns the first failing step's [`IngestError`]. `UnsupportedFormat` is
/// raised before the parser is invoked, so content of an unknown format is
/// never decoded.
pub fn run_with_config(path: impl AsRef<Path>, config: &IngestConfig) -> Outcome {
    let path = path.as_ref();
    let _span = tracing::debug_span!("ingest", path = %path.display()).entered();

    verify(path)?;
    tracing::debug!(stage = %Stage::AccessChecked, "access check passed");

    let content = read_file_bounded(path, config.max_file_size)?;
    tracing::debug!(stage = %Stage::Read, bytes = content.len(), "content read");

    let format = ConfigFormat::detect(path);
    match format {
        ConfigFormat::Yaml | ConfigFormat::Json => {}
        ConfigFormat::Unknown => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_owned(),
                extension: path
                    .extension()
                    .map(|ext| ext.to_string_lossy().into_owned()),
            });
        }
    }
    tracing::debug!(stage = %Stage::FormatKnown, %format, "format inferred");

    let normalized = parse(&content, format).map_err(|source| IngestError::Parse {
        path: path.to_owned(),
        format,
        source,
    })?;
    tracing::info!(
        stage = %Stage::Parsed,
        %format,
        top_level_keys = normalized.len(),
        "configuration parsed"
    );

    Ok(IngestReport::new(
        path.to_owned(),
        format,
        content.len(),
        normalized,
    ))
}
