//! Result of a successful ingestion run.

use std::path::PathBuf;

use serde::Serialize;

use crate::format::ConfigFormat;
use crate::normalized::NormalizedConfig;

/// A configuration file that was read, recognized and parsed.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct IngestReport {
    /// The path the run was given.
    pub path: PathBuf,
    /// Format inferred from the extension; never `Unknown`.
    pub format: ConfigFormat,
    /// Size of the raw content.
    pub bytes_read: usize,
    /// Number of keys at the top level of the document.
    pub top_level_keys: usize,
    /// The decoded document.
    pub config: NormalizedConfig,
}

impl IngestReport {
    #[must_use]
    pub fn new(
        path: PathBuf,
        format: ConfigFormat,
        bytes_read: usize,
        config: NormalizedConfig,
    ) -> Self {
        Self {
            path,
            format,
            bytes_read,
            top_level_keys: config.len(),
            config,
        }
    }
}
