//! Configuration for an ingestion run.

/// Default upper bound on the size of a configuration file (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10_485_760;

/// Options for one ingestion run.
///
/// Construct with [`IngestConfig::default`] and override fields as needed.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct IngestConfig {
    /// Maximum file size in bytes (default: 10 MiB).
    /// Larger files fail with `IngestError::FileTooLarge` instead of being
    /// read into memory.
    pub max_file_size: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}
